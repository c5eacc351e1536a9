use std::time::Duration;

use reqwest::Client;

use crate::error::ScrapeError;

/// HTTP client for the schedule page fetch.
///
/// Thin wrapper over `reqwest` with a configured timeout and `User-Agent`.
/// There are no internal retries: a run is one-shot, and recovery happens on
/// the next scheduled invocation.
pub struct PageClient {
    client: Client,
}

impl PageClient {
    /// Creates a `PageClient` with the given timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches the schedule page and returns its body.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::UnexpectedStatus`] — any non-2xx status.
    /// - [`ScrapeError::Http`] — network or TLS failure.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScrapeError> {
        tracing::debug!(url, "fetching schedule page");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }
        Ok(response.text().await?)
    }
}
