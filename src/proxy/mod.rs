//! Same-origin reverse proxy onto the fixed upstream API.

pub mod forwarder;
pub mod headers;

pub use forwarder::{forward, rewrite_path, target_url, ProxyState};
pub use headers::{filter_request_headers, filter_response_headers};
