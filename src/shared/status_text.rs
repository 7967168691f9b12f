//! Reason phrases for HTTP status codes.

use axum::http::{Extensions, StatusCode};
use hyper::ext::ReasonPhrase;

/// Returns the canonical reason phrase for `status`, or an empty string
/// when the code is unknown or out of range.
pub fn status_text(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("")
        .to_string()
}

/// Reason phrase the peer actually sent, if it differed from the canonical one.
///
/// hyper only records the phrase when it is non-standard.
pub fn received_reason(extensions: &Extensions) -> Option<&ReasonPhrase> {
    extensions.get::<ReasonPhrase>()
}

/// Reason phrase to display: the one received when present, otherwise the
/// canonical phrase.
pub fn response_status_text(status: u16, extensions: &Extensions) -> String {
    received_reason(extensions)
        .map(|reason| String::from_utf8_lossy(reason.as_bytes()).into_owned())
        .unwrap_or_else(|| status_text(status))
}
