//! Shared HTTP client for search and article fetches.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

/// HTTP client with a bounded timeout and a generic browser-like identity.
///
/// Both link discovery and article extraction go through this client so the
/// whole scraping surface shares one connection pool and one timeout policy.
pub struct PageClient {
    client: Client,
}

impl PageClient {
    /// Creates a `PageClient` with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches `url` and returns the status plus the body decoded lossily as
    /// UTF-8. News pages occasionally declare one charset and serve another;
    /// lossy decoding keeps the usable text instead of failing the fetch.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] on network, TLS, or timeout failure.
    pub(crate) async fn get_page(
        &self,
        url: &str,
    ) -> Result<(reqwest::StatusCode, String), ScraperError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        Ok((status, String::from_utf8_lossy(&bytes).into_owned()))
    }
}
