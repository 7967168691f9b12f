use axum::{
    extract::Request,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "frontend/"]
struct FrontendAssets;

pub async fn serve_static(req: Request) -> Response {
    let path = req.uri().path().trim_start_matches('/');

    if let Some(content) = FrontendAssets::get(path) {
        return response_from_asset(path, content.data.into_owned());
    }

    // Anything else is the single-page form
    match FrontendAssets::get("index.html") {
        Some(content) => response_from_asset("index.html", content.data.into_owned()),
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

fn response_from_asset(path: &str, data: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime),
            (header::CACHE_CONTROL, "no-cache".to_string()),
        ],
        data,
    )
        .into_response()
}
