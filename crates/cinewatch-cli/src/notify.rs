//! Telegram change notifications.
//!
//! A notification failure is reported to the caller but never rolls back or
//! invalidates artifacts the run already persisted.

use std::time::Duration;

use reqwest::Client;
use serde_json::json;
use thiserror::Error;

const DEFAULT_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Telegram API returned status {status}")]
    Api { status: u16 },
}

/// Client for the Telegram bot `sendMessage` endpoint.
pub struct TelegramNotifier {
    client: Client,
    token: String,
    chat_id: String,
    api_base: String,
}

impl TelegramNotifier {
    /// Creates a notifier pointed at the production Telegram API.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(token: &str, chat_id: &str, timeout_secs: u64) -> Result<Self, NotifyError> {
        Self::with_api_base(token, chat_id, timeout_secs, DEFAULT_API_BASE)
    }

    /// Creates a notifier with a custom API base URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_api_base(
        token: &str,
        chat_id: &str,
        timeout_secs: u64,
        api_base: &str,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            token: token.to_owned(),
            chat_id: chat_id.to_owned(),
            api_base: api_base.trim_end_matches('/').to_owned(),
        })
    }

    /// Sends `text` to the configured chat. Returns `true` when Telegram
    /// accepted the message.
    ///
    /// # Errors
    ///
    /// - [`NotifyError::Api`] — non-2xx response from the Telegram API.
    /// - [`NotifyError::Http`] — network or TLS failure.
    pub async fn send(&self, text: &str) -> Result<bool, NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.token);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "chat_id": self.chat_id, "text": text }))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Api {
                status: status.as_u16(),
            });
        }
        Ok(true)
    }
}

/// Message posted to the channel when the programme changed.
pub fn change_message(schedule_url: &str) -> String {
    format!(
        "È stata aggiornata la programmazione dei film UCI Cinemas nelle sale IMAX! 🎥 🍿\n\n{schedule_url}"
    )
}
