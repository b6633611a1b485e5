//! Outbound webhook sender.

use crate::config::{WebhookConfig, secret};
use crate::error::UpstreamError;

/// Posts JSON payloads to a single configured webhook URL.
#[derive(Debug, Clone)]
pub struct WebhookSender {
    client: reqwest::Client,
    url: String,
}

impl WebhookSender {
    /// Create a sender targeting `url`.
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Create the "link places" sender, or `None` when no URL is set.
    pub fn link_places(config: &WebhookConfig, client: reqwest::Client) -> Option<Self> {
        secret(config.link_places_url.as_ref()).map(|url| Self::new(client, url))
    }

    /// Forward `payload` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Rejected`] when the webhook answers with a
    /// non-success status, or a transport error.
    pub async fn send(&self, payload: &serde_json::Value) -> Result<(), UpstreamError> {
        let response = self.client.post(&self.url).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Rejected(format!(
                "Webhook failed: {}",
                status.as_u16()
            )));
        }

        Ok(())
    }
}
