use axum::{extract::Request, extract::State, response::Response};

use crate::error::AppError;
use crate::proxy::forward;
use crate::AppState;

pub async fn proxy_request(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, AppError> {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    forward(&state.proxy, request).await.inspect_err(|e| {
        tracing::warn!(%method, %path, code = e.code(), message = %e, "Proxy request failed");
    })
}
