pub mod config;
pub mod dispatch;
pub mod error;
pub mod proxy;
pub mod routes;
pub mod shared;

use axum::{
    routing::{get, post, MethodRouter},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::{Config, ProxyConfig};
pub use dispatch::{HttpDispatcher, RequestParams, ResponseData};
pub use error::AppError;
pub use proxy::ProxyState;

/// State shared by all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<ProxyState>,
    pub dispatcher: Arc<HttpDispatcher>,
}

impl AppState {
    pub fn new(proxy: ProxyState, dispatcher: HttpDispatcher) -> Self {
        Self {
            proxy: proxy.arc(),
            dispatcher: dispatcher.arc(),
        }
    }
}

/// Builds the application router.
///
/// The reverse proxy is mounted at the prefix named in the proxy config.
pub fn app(state: AppState) -> Router {
    let mount = state.proxy.config.mount_prefix.trim_end_matches('/').to_string();
    let proxy_methods = || -> MethodRouter<AppState> {
        let handler = routes::proxy::proxy_request;
        get(handler)
            .post(handler)
            .put(handler)
            .patch(handler)
            .delete(handler)
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(routes::health::health_check))
        .route("/api/send", post(routes::send::send_request))
        .route(&mount, proxy_methods())
        .route(&format!("{}/*rest", mount), proxy_methods())
        .fallback(routes::static_files::serve_static)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
