pub mod decoder;
pub mod executor;
pub mod json_format;
pub mod service;
pub mod types;

pub use decoder::{decode_body, ContentKind};
pub use executor::{execute_request, resolve_url};
pub use service::{Dispatcher, HttpDispatcher, RequestSession, RequestState};
pub use types::*;
