use api_tester::{app, AppState, Config, HttpDispatcher, ProxyConfig, ProxyState};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_tester=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let proxy_config = ProxyConfig::default();
    tracing::info!(
        upstream = %proxy_config.upstream_base_url,
        mount = %proxy_config.mount_prefix,
        "Starting API tester on port {}",
        config.port
    );

    let client = reqwest::Client::new();
    let dispatcher = HttpDispatcher::new(client.clone()).with_base(Url::parse(&config.public_origin)?);
    let state = AppState::new(ProxyState::new(proxy_config, client), dispatcher);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
