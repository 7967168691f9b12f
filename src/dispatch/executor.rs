//! Outbound request execution for the request form.
//!
//! Sends one request, times it up to the response head, and decodes the
//! body for display. Non-2xx statuses are ordinary results; only failures
//! before a response is obtained (or while reading it) are errors.

use super::decoder::{decode_body, ContentKind, DEFAULT_CONTENT_TYPE};
use super::types::{HeaderList, RequestParams, ResponseData, StatusClass};
use crate::error::AppError;
use crate::shared::{response_status_text, RequestTiming};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use url::Url;

/// Resolves the form URL, using `base` for relative URLs such as
/// `/api/proxy/pokemon/ditto`.
pub fn resolve_url(raw: &str, base: Option<&Url>) -> Result<Url, AppError> {
    let raw = raw.trim();
    match Url::parse(raw) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => match base {
            Some(base) => base
                .join(raw)
                .map_err(|e| AppError::InvalidUrl(e.to_string())),
            None => Err(AppError::InvalidUrl(format!(
                "relative URL without a base: {}",
                raw
            ))),
        },
        Err(e) => Err(AppError::InvalidUrl(e.to_string())),
    }
}

/// Executes `params` with `client` and returns the displayable outcome.
pub async fn execute_request(
    client: &reqwest::Client,
    base: Option<&Url>,
    params: &RequestParams,
) -> Result<ResponseData, AppError> {
    let url = resolve_url(&params.url, base)?;

    let mut builder = client
        .request(params.method.into(), url.clone())
        .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(body) = params.outbound_body() {
        builder = builder.body(body.to_string());
    }

    tracing::debug!(method = %params.method, url = %url, "Dispatching request");

    let mut timing = RequestTiming::start();
    let response = builder.send().await?;
    timing.stop();

    let status = response.status().as_u16();
    let status_text = response_status_text(status, response.extensions());
    let headers = HeaderList::from(response.headers());
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
    let kind = ContentKind::classify(&content_type);

    let body = if kind.reads_body() {
        let bytes = response.bytes().await?;
        decode_body(kind, &content_type, &bytes)
    } else {
        // The body is left unread.
        drop(response);
        decode_body(kind, &content_type, &[])
    };

    Ok(ResponseData {
        status,
        status_text,
        status_class: StatusClass::from_status(status),
        headers,
        body,
        content_kind: kind,
        time: timing.elapsed_ms(),
    })
}
