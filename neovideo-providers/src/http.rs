//! Shared HTTP client construction

use std::time::Duration;

use reqwest::Client;

use crate::error::ProviderClientError;

/// Settings for the pooled client shared by every upstream source.
#[derive(Debug, Clone)]
pub struct HttpClientOptions {
    pub user_agent: String,
    pub connect_timeout: Duration,
    /// Whole-request deadline, so a hung backend cannot pin its task forever.
    pub timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub max_redirects: usize,
}

impl Default for HttpClientOptions {
    fn default() -> Self {
        Self {
            user_agent: concat!("neovideo/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(15),
            pool_max_idle_per_host: 10,
            max_redirects: 5,
        }
    }
}

/// Build the pooled upstream client.
pub fn build_http_client(options: &HttpClientOptions) -> Result<Client, ProviderClientError> {
    Client::builder()
        .user_agent(options.user_agent.as_str())
        .connect_timeout(options.connect_timeout)
        .timeout(options.timeout)
        .pool_max_idle_per_host(options.pool_max_idle_per_host)
        .redirect(reqwest::redirect::Policy::limited(options.max_redirects))
        .build()
        .map_err(|e| {
            ProviderClientError::InvalidConfig(format!("failed to build HTTP client: {e}"))
        })
}
