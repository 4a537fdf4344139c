// HTTP client utilities
use crate::domain::error::TranslateError;
use reqwest::{Client, Proxy};

/// Create the shared HTTP client. The per-call timeout is set on each request.
pub fn create_client(http_proxy: Option<&str>) -> Result<Client, TranslateError> {
    let mut builder = Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(std::time::Duration::from_secs(30))
        .user_agent(concat!("nl2sparql/", env!("CARGO_PKG_VERSION")));

    if let Some(proxy) = http_proxy.filter(|p| !p.is_empty()) {
        let proxy = Proxy::all(proxy)
            .map_err(|e| TranslateError::Configuration(format!("Invalid http_proxy: {}", e)))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| TranslateError::Configuration(format!("Cannot build HTTP client: {}", e)))
}
