use std::env;

/// Upstream API every proxied call is forwarded to.
pub const UPSTREAM_BASE_URL: &str = "https://pokeapi.co";

/// Path on the upstream that replaces the mount prefix.
pub const UPSTREAM_BASE_PATH: &str = "/api/v2";

/// Path prefix the reverse proxy is mounted under.
pub const PROXY_MOUNT_PREFIX: &str = "/api/proxy";

/// Process configuration for the hosting server.
pub struct Config {
    pub port: u16,
    /// Origin used to resolve relative URLs typed into the request form.
    pub public_origin: String,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        Self {
            port,
            public_origin: format!("http://127.0.0.1:{}", port),
        }
    }
}

/// Fixed forwarding target of the reverse proxy.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub upstream_base_url: String,
    pub upstream_base_path: String,
    pub mount_prefix: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            upstream_base_url: UPSTREAM_BASE_URL.to_string(),
            upstream_base_path: UPSTREAM_BASE_PATH.to_string(),
            mount_prefix: PROXY_MOUNT_PREFIX.to_string(),
        }
    }
}
