//! Reverse proxy behavior against a local mock upstream.

mod common;

use api_tester::{app, AppState, HttpDispatcher, ProxyConfig, ProxyState};
use axum::{
    body::{Body, Bytes},
    http::{header, Request, StatusCode},
    response::Response,
};
use http_body_util::BodyExt;
use hyper::ext::ReasonPhrase;
use serde_json::Value;
use tower::ServiceExt;

fn state_for(upstream_base_url: &str) -> AppState {
    let config = ProxyConfig {
        upstream_base_url: upstream_base_url.to_string(),
        ..ProxyConfig::default()
    };
    AppState::new(
        ProxyState::new(config, reqwest::Client::new()),
        HttpDispatcher::default(),
    )
}

async fn body_bytes(response: Response) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn content_length(response: &Response) -> Option<usize> {
    response
        .headers()
        .get(header::CONTENT_LENGTH)
        .map(|v| v.to_str().unwrap().parse().unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn forwards_get_to_upstream_base_path() {
    let upstream = common::spawn_upstream().await;
    let resp = app(state_for(&upstream))
        .oneshot(get("/api/proxy/pokemon/ditto"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("x-upstream").unwrap(), "pokeapi-mock");
    assert!(resp.headers().get(header::TRANSFER_ENCODING).is_none());
    assert!(resp.headers().get(header::CONTENT_ENCODING).is_none());

    // content-length describes the relayed body itself
    let length = content_length(&resp);
    let bytes = body_bytes(resp).await;
    assert_eq!(length, Some(bytes.len()));
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["name"], "ditto");
    assert_eq!(json["id"], 132);
}

#[tokio::test]
async fn forwards_method_headers_and_body() {
    let upstream = common::spawn_upstream().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/proxy/echo")
        .header(header::HOST, "proxy.local")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-custom", "kept")
        .body(Body::from(r#"{"name":"mew"}"#))
        .unwrap();

    let resp = app(state_for(&upstream)).oneshot(request).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["method"], "POST");
    assert_eq!(json["body"], r#"{"name":"mew"}"#);
    assert_eq!(json["contentType"], "application/json");
    assert_eq!(json["custom"], "kept");
    // Host is regenerated for the upstream connection
    assert_eq!(json["host"], upstream.trim_start_matches("http://"));
}

#[tokio::test]
async fn forwards_every_supported_method() {
    let upstream = common::spawn_upstream().await;
    for method in ["GET", "POST", "PUT", "PATCH", "DELETE"] {
        let request = Request::builder()
            .method(method)
            .uri("/api/proxy/echo")
            .body(Body::empty())
            .unwrap();
        let resp = app(state_for(&upstream)).oneshot(request).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{}", method);
        assert_eq!(body_json(resp).await["method"], method);
    }
}

#[tokio::test]
async fn rejects_unsupported_method() {
    let upstream = common::spawn_upstream().await;
    let request = Request::builder()
        .method("TRACE")
        .uri("/api/proxy/echo")
        .body(Body::empty())
        .unwrap();
    let resp = app(state_for(&upstream)).oneshot(request).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn upstream_errors_pass_through() {
    let upstream = common::spawn_upstream().await;

    let resp = app(state_for(&upstream))
        .oneshot(get("/api/proxy/missing"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["detail"], "Not found.");

    let resp = app(state_for(&upstream))
        .oneshot(get("/api/proxy/failing"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(&body_bytes(resp).await[..], b"upstream exploded");
}

#[tokio::test]
async fn compressed_upstream_body_is_decoded() {
    let upstream = common::spawn_upstream().await;
    let resp = app(state_for(&upstream))
        .oneshot(get("/api/proxy/gzipped"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::CONTENT_ENCODING).is_none());

    // The upstream's compressed length is not reused
    let length = content_length(&resp);
    let bytes = body_bytes(resp).await;
    assert_eq!(&bytes[..], common::GZIPPED_BODY);
    assert_eq!(length, Some(common::GZIPPED_BODY.len()));
}

#[tokio::test]
async fn upstream_reason_phrase_is_relayed() {
    let upstream = common::spawn_upstream().await;
    let resp = app(state_for(&upstream))
        .oneshot(get("/api/proxy/custom-reason"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let reason = resp.extensions().get::<ReasonPhrase>().unwrap();
    assert_eq!(reason.as_bytes(), common::CUSTOM_REASON);
}

#[tokio::test]
async fn binary_body_is_relayed_unchanged() {
    let upstream = common::spawn_upstream().await;
    let resp = app(state_for(&upstream))
        .oneshot(get("/api/proxy/image"))
        .await
        .unwrap();

    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
    assert_eq!(&body_bytes(resp).await[..], common::PNG_BYTES);
}

#[tokio::test]
async fn query_string_is_preserved() {
    let upstream = common::spawn_upstream().await;
    let resp = app(state_for(&upstream))
        .oneshot(get("/api/proxy/pokemon?limit=5&offset=10"))
        .await
        .unwrap();

    let json = body_json(resp).await;
    assert_eq!(json["path"], "/api/v2/pokemon");
    assert_eq!(json["params"]["limit"], "5");
    assert_eq!(json["params"]["offset"], "10");
}

#[tokio::test]
async fn unreachable_upstream_is_bad_gateway() {
    let upstream = common::unreachable_base().await;
    let resp = app(state_for(&upstream))
        .oneshot(get("/api/proxy/pokemon/ditto"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(resp).await;
    assert_eq!(json["success"], false);
    assert!(json["error"]["message"].is_string());
}

#[tokio::test]
async fn secondary_prefix_is_not_proxied() {
    let upstream = common::spawn_upstream().await;
    let resp = app(state_for(&upstream))
        .oneshot(get("/proxy/pokemon/ditto"))
        .await
        .unwrap();

    // Falls through to the embedded form
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "text/html");
}
