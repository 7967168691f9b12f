//! Shared utilities used by both the dispatcher and the reverse proxy.

pub mod status_text;
pub mod timing;

pub use status_text::{received_reason, response_status_text, status_text};
pub use timing::RequestTiming;
