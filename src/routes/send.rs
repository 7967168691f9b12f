use axum::{extract::State, Json};

use crate::dispatch::{Dispatcher, RequestParams, SendResponse};
use crate::AppState;

pub async fn send_request(
    State(state): State<AppState>,
    Json(params): Json<RequestParams>,
) -> Json<SendResponse> {
    tracing::debug!(
        method = %params.method,
        url = %params.url,
        "Sending request"
    );

    let response = SendResponse::from(state.dispatcher.send(params).await);

    if response.success {
        tracing::debug!("Request succeeded");
    } else if let Some(ref error) = response.error {
        tracing::warn!(code = %error.code, message = %error.message, "Request failed");
    }

    Json(response)
}
