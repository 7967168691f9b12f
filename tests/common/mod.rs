//! Local stand-in for the upstream API, served on a random port.

#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::{Query, Request},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use flate2::{write::GzEncoder, Compression};
use hyper::ext::ReasonPhrase;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Write;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Non-standard reason phrase sent by `/api/v2/custom-reason`.
pub const CUSTOM_REASON: &[u8] = b"Gotta Catch Em All";

/// Body of `/api/v2/gzipped` before compression.
pub const GZIPPED_BODY: &[u8] = br#"{"compressed":true}"#;

/// Smallest valid PNG signature prefix, enough for content checks.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn header_str(headers: &HeaderMap, name: &str) -> Value {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| Value::String(v.to_string()))
        .unwrap_or(Value::Null)
}

async fn ditto() -> impl IntoResponse {
    (
        [
            ("x-upstream", "pokeapi-mock"),
            ("cache-control", "public, max-age=86400"),
        ],
        Json(json!({"id": 132, "name": "ditto", "types": ["normal"]})),
    )
}

async fn echo(method: Method, headers: HeaderMap, body: Bytes) -> Json<Value> {
    Json(json!({
        "method": method.as_str(),
        "body": String::from_utf8_lossy(&body),
        "contentType": header_str(&headers, "content-type"),
        "host": header_str(&headers, "host"),
        "custom": header_str(&headers, "x-custom"),
    }))
}

async fn gzipped() -> impl IntoResponse {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(GZIPPED_BODY)
        .expect("gzip write");
    let compressed = encoder.finish().expect("gzip finish");

    (
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::CONTENT_ENCODING, "gzip"),
        ],
        compressed,
    )
}

async fn missing() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": "Not found."})),
    )
}

async fn failing() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
}

async fn custom_reason() -> Response {
    let mut response = "caught".into_response();
    response
        .extensions_mut()
        .insert(ReasonPhrase::from_static(CUSTOM_REASON));
    response
}

async fn image() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/png")], PNG_BYTES)
}

async fn blob() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/octet-stream")],
        vec![0u8, 1, 2, 3],
    )
}

async fn broken_json() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], "{\"name\": ")
}

async fn floats() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        r#"{"a":1.0,"b":1e2,"c":0.1,"d":1e21}"#,
    )
}

async fn plain() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], "hello there\n")
}

async fn query(Query(params): Query<HashMap<String, String>>, req: Request) -> Json<Value> {
    Json(json!({"path": req.uri().path(), "params": params}))
}

/// Routes of the mock upstream, all under `/api/v2`.
pub fn upstream() -> Router {
    Router::new()
        .route("/api/v2/pokemon/ditto", get(ditto))
        .route("/api/v2/echo", any(echo))
        .route("/api/v2/gzipped", get(gzipped))
        .route("/api/v2/missing", get(missing))
        .route("/api/v2/failing", get(failing))
        .route("/api/v2/image", get(image))
        .route("/api/v2/custom-reason", get(custom_reason))
        .route("/api/v2/blob", get(blob))
        .route("/api/v2/broken-json", get(broken_json))
        .route("/api/v2/plain", get(plain))
        .route("/api/v2/floats", get(floats))
        .route("/api/v2/pokemon", get(query))
}

/// Serves `router` on `127.0.0.1:0` and returns the bound address.
pub async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Starts the mock upstream and returns its base URL.
pub async fn spawn_upstream() -> String {
    let addr = serve(upstream()).await;
    format!("http://{}", addr)
}

/// A base URL nothing listens on.
pub async fn unreachable_base() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
