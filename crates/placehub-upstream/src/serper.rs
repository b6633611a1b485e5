//! Serper.dev adapter.
//!
//! Serper answers with shapes close to what the front-end consumes, so
//! this adapter mostly forwards parameters and types the response by mode.

use placehub_types::{
    SerperPlacesResponse, SerperResult, SerperSearchMode, SerperSearchParams,
    SerperSearchResponse,
};

use crate::config::{SerperConfig, secret};
use crate::error::{UpstreamError, provider_message};

/// Client for the Serper.dev search API.
#[derive(Debug, Clone)]
pub struct SerperClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SerperClient {
    /// Create a client with an explicit key and base URL.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Create a client from configuration, or `None` when no key is set.
    pub fn from_config(config: &SerperConfig, client: reqwest::Client) -> Option<Self> {
        secret(config.api_key.as_ref()).map(|key| Self::new(client, config.base_url.clone(), key))
    }

    /// Run a search in the given mode.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Rejected`] with Serper's `message` when the
    /// call is refused, or a transport/decode error.
    pub async fn search(
        &self,
        mode: SerperSearchMode,
        params: &SerperSearchParams,
    ) -> Result<SerperResult, UpstreamError> {
        let url = format!("{}/{}", self.base_url, mode.as_str());

        let response = self
            .client
            .post(&url)
            .header("X-API-KEY", &self.api_key)
            .json(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let status_text = status.as_u16().to_string();
            return Err(UpstreamError::Rejected(provider_message(
                body.get("message").and_then(serde_json::Value::as_str),
                Some(&status_text),
                "Serper request failed",
                "Search failed",
            )));
        }

        let result = match mode {
            SerperSearchMode::Places => {
                SerperResult::Places(response.json::<SerperPlacesResponse>().await?)
            }
            SerperSearchMode::Search => {
                SerperResult::Search(response.json::<SerperSearchResponse>().await?)
            }
        };

        Ok(result)
    }
}
