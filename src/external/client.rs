use std::time::Duration;

use crate::config::HttpConfig;
use crate::error::{AppError, AppResult};

use super::user_agent::random_user_agent;

/// Build the HTTP client shared by every vendor source and the notifier.
///
/// Built once at startup and cloned into each collaborator; `reqwest::Client`
/// is reference counted so clones share the connection pool.
///
/// - Timeouts from `[http]`
/// - gzip, deflate, brotli and zstd response decoding
/// - Cookie store (vendors set session cookies on first contact)
/// - A desktop browser User-Agent chosen once per process
pub fn build_http_client(config: &HttpConfig) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.request_timeout())
        .connect_timeout(config.connect_timeout())
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .zstd(true)
        .cookie_store(true)
        .user_agent(random_user_agent())
        .build()
        .map_err(|e| AppError::Configuration {
            key: "http".to_string(),
            source: e.into(),
        })
}
