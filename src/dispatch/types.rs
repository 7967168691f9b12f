use crate::error::AppError;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::decoder::ContentKind;

/// Methods the request form offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// GET requests never carry a body.
    pub fn allows_body(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(AppError::InvalidMethod(s.to_string())),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Request composed in the form, captured at send time.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RequestParams {
    pub url: String,
    #[serde(default)]
    pub method: HttpMethod,
    pub body: Option<String>,
}

impl RequestParams {
    /// Body to attach to the outbound call, if any.
    ///
    /// Only non-GET requests with a non-blank body carry one; the text is
    /// sent untrimmed.
    pub fn outbound_body(&self) -> Option<&str> {
        if !self.method.allows_body() {
            return None;
        }
        self.body.as_deref().filter(|b| !b.trim().is_empty())
    }
}

/// Response headers keyed by lowercase name, iterated in sorted order.
///
/// Repeated headers are merged into one comma-separated value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HeaderList(BTreeMap<String, String>);

impl HeaderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: &str, value: &str) {
        self.0
            .entry(name.to_ascii_lowercase())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_ascii_lowercase()).map(|v| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&HeaderMap> for HeaderList {
    fn from(map: &HeaderMap) -> Self {
        let mut list = HeaderList::new();
        for (name, value) in map {
            list.append(name.as_str(), &String::from_utf8_lossy(value.as_bytes()));
        }
        list
    }
}

/// Visual category of a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    Success,
    Caution,
    Warning,
    Critical,
}

impl StatusClass {
    pub fn from_status(status: u16) -> Self {
        match status {
            s if s < 300 => StatusClass::Success,
            s if s < 400 => StatusClass::Caution,
            s if s < 500 => StatusClass::Warning,
            _ => StatusClass::Critical,
        }
    }
}

/// Outcome of one completed call, used for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseData {
    pub status: u16,
    pub status_text: String,
    pub status_class: StatusClass,
    pub headers: HeaderList,
    pub body: String,
    pub content_kind: ContentKind,
    /// Elapsed time in milliseconds.
    pub time: u64,
}

/// Error data reported to the frontend
#[derive(Debug, Clone, Serialize)]
pub struct ErrorData {
    pub message: String,
    pub code: String,
}

/// Envelope returned by the send endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SendResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorData>,
}

impl SendResponse {
    pub fn success(data: ResponseData) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String, code: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorData { message, code }),
        }
    }
}

impl From<Result<ResponseData, AppError>> for SendResponse {
    fn from(result: Result<ResponseData, AppError>) -> Self {
        match result {
            Ok(data) => SendResponse::success(data),
            Err(e) => SendResponse::error(e.to_string(), e.code().to_string()),
        }
    }
}
