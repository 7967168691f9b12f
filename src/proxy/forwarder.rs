//! Request forwarding onto the upstream API.
//!
//! The incoming body is streamed to the upstream unchanged; the upstream
//! body is buffered (and transparently decoded by the client) before being
//! returned, which is why its framing headers are dropped and
//! `content-length` is set from the decoded body.

use super::headers::{filter_request_headers, filter_response_headers};
use crate::config::ProxyConfig;
use crate::error::AppError;
use crate::shared::received_reason;
use axum::{
    body::{Body, HttpBody},
    extract::Request,
    http::{header::CONTENT_LENGTH, HeaderValue, Uri},
    response::Response,
};
use std::sync::Arc;
use url::Url;

/// Shared, immutable state of the reverse proxy.
#[derive(Clone)]
pub struct ProxyState {
    pub config: ProxyConfig,
    pub client: reqwest::Client,
}

impl ProxyState {
    pub fn new(config: ProxyConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

/// Replaces the first occurrence of `mount_prefix` in `path` with
/// `upstream_base_path`.
pub fn rewrite_path(path: &str, mount_prefix: &str, upstream_base_path: &str) -> String {
    path.replacen(mount_prefix, upstream_base_path, 1)
}

/// Computes the upstream URL for an incoming request URI. The query string
/// is carried over.
pub fn target_url(config: &ProxyConfig, uri: &Uri) -> Result<Url, AppError> {
    let mut target = rewrite_path(
        uri.path(),
        &config.mount_prefix,
        &config.upstream_base_path,
    );
    if let Some(query) = uri.query() {
        target.push('?');
        target.push_str(query);
    }

    Url::parse(&config.upstream_base_url)
        .and_then(|base| base.join(&target))
        .map_err(|e| AppError::InvalidUrl(e.to_string()))
}

/// Forwards `request` upstream and relays the response.
///
/// Upstream error statuses are relayed like any other response; only
/// transport failures produce an `Err`.
pub async fn forward(state: &ProxyState, request: Request) -> Result<Response, AppError> {
    let (parts, body) = request.into_parts();
    let url = target_url(&state.config, &parts.uri)?;

    tracing::debug!(method = %parts.method, target = %url, "Forwarding request");

    let mut outbound = state
        .client
        .request(parts.method.clone(), url)
        .headers(filter_request_headers(&parts.headers));

    if !body.is_end_stream() {
        outbound = outbound.body(reqwest::Body::wrap_stream(body.into_data_stream()));
    }

    let upstream = outbound.send().await?;
    let status = upstream.status();
    let mut headers = filter_response_headers(upstream.headers());
    let reason = received_reason(upstream.extensions()).cloned();
    let bytes = upstream.bytes().await?;

    tracing::debug!(status = status.as_u16(), size = bytes.len(), "Upstream responded");

    headers.insert(CONTENT_LENGTH, HeaderValue::from(bytes.len()));
    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    if let Some(reason) = reason {
        response.extensions_mut().insert(reason);
    }
    Ok(response)
}
