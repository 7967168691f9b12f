//! Header filtering for proxied requests and responses.

use axum::http::HeaderMap;

/// Request headers tied to the incoming connection or its encoding.
pub const REQUEST_HEADER_EXCLUDES: [&str; 3] = ["accept-encoding", "host", "connection"];

/// Response headers describing framing of the body as received upstream,
/// which no longer applies once the body has been buffered and decoded.
pub const RESPONSE_HEADER_EXCLUDES: [&str; 3] =
    ["content-encoding", "content-length", "transfer-encoding"];

/// Copies `headers`, dropping any whose name is in `excludes`
/// (case-insensitive). Repeated headers keep every value.
pub fn filter_headers(headers: &HeaderMap, excludes: &[&str]) -> HeaderMap {
    let mut filtered = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if excludes
            .iter()
            .any(|excluded| name.as_str().eq_ignore_ascii_case(excluded))
        {
            continue;
        }
        filtered.append(name.clone(), value.clone());
    }
    filtered
}

pub fn filter_request_headers(headers: &HeaderMap) -> HeaderMap {
    filter_headers(headers, &REQUEST_HEADER_EXCLUDES)
}

pub fn filter_response_headers(headers: &HeaderMap) -> HeaderMap {
    filter_headers(headers, &RESPONSE_HEADER_EXCLUDES)
}
