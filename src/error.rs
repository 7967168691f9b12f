use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid method: {0}")]
    InvalidMethod(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Machine-readable code reported alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::RequestFailed(e) => {
                if e.is_timeout() {
                    "TIMEOUT"
                } else if e.is_connect() {
                    "CONNECTION_FAILED"
                } else if e.is_request() {
                    "REQUEST_ERROR"
                } else {
                    "REQUEST_FAILED"
                }
            }
            AppError::InvalidUrl(_) => "INVALID_URL",
            AppError::InvalidMethod(_) => "INVALID_METHOD",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::RequestFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::InvalidUrl(_) | AppError::InvalidMethod(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": {
                "message": self.to_string(),
                "code": self.code(),
            }
        }));

        (self.status(), body).into_response()
    }
}
