//! Configuration types for the upstream adapters.
//!
//! Secrets are optional: an adapter whose key is missing (or empty) is
//! simply not constructed, and the routes that need it answer with a
//! configuration error.

use std::time::Duration;

use serde::Deserialize;

use crate::error::UpstreamError;

/// Browser user agent sent when fetching images from arbitrary hosts.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Settings for every external API PlaceHub talks to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Google Places API.
    pub google_places: GooglePlacesConfig,
    /// Serper.dev API.
    pub serper: SerperConfig,
    /// Instagram public web API.
    pub instagram: InstagramConfig,
    /// Outbound webhooks.
    pub webhook: WebhookConfig,
    /// Timeout applied to every outbound request, in seconds.
    pub request_timeout_secs: u64,
    /// User agent for image fetches.
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            google_places: GooglePlacesConfig::default(),
            serper: SerperConfig::default(),
            instagram: InstagramConfig::default(),
            webhook: WebhookConfig::default(),
            request_timeout_secs: 15,
            user_agent: BROWSER_USER_AGENT.to_owned(),
        }
    }
}

impl UpstreamConfig {
    /// Timeout applied to every outbound request.
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Names of the integrations whose secrets are present.
    pub fn configured_integrations(&self) -> Vec<String> {
        [
            ("google_places", secret(self.google_places.api_key.as_ref())),
            ("serper", secret(self.serper.api_key.as_ref())),
            ("instagram", secret(self.instagram.app_id.as_ref())),
            ("webhook", secret(self.webhook.link_places_url.as_ref())),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_some())
        .map(|(name, _)| name.to_owned())
        .collect()
    }
}

/// Google Places API settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GooglePlacesConfig {
    /// API key. Env: `GPLACES_API_KEY`.
    pub api_key: Option<String>,
    /// Base URL of the legacy Places web service.
    pub base_url: String,
}

impl Default for GooglePlacesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: String::from("https://maps.googleapis.com/maps/api/place"),
        }
    }
}

/// Serper.dev settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SerperConfig {
    /// API key. Env: `SERPER_API_KEY`.
    pub api_key: Option<String>,
    /// Base URL of the Serper API.
    pub base_url: String,
}

impl Default for SerperConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: String::from("https://google.serper.dev"),
        }
    }
}

/// Instagram web API settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InstagramConfig {
    /// Web app id sent as `x-ig-app-id`. Env: `INSTAGRAM_APP_ID`.
    pub app_id: Option<String>,
    /// Base URL of the Instagram private web API.
    pub base_url: String,
}

impl Default for InstagramConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            base_url: String::from("https://i.instagram.com"),
        }
    }
}

/// Outbound webhook settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Target of the "link places" webhook. Env: `WEBHOOK_LINK_PLACES`.
    pub link_places_url: Option<String>,
}

/// Treat empty strings as absent secrets.
pub fn secret(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

/// Build the shared HTTP client used by all adapters.
pub fn build_http_client(config: &UpstreamConfig) -> Result<reqwest::Client, UpstreamError> {
    reqwest::Client::builder()
        .timeout(config.request_timeout())
        .build()
        .map_err(|e| UpstreamError::Request(format!("failed to build HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_endpoints() {
        let config = UpstreamConfig::default();
        assert_eq!(
            config.google_places.base_url,
            "https://maps.googleapis.com/maps/api/place"
        );
        assert_eq!(config.serper.base_url, "https://google.serper.dev");
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
        assert!(config.configured_integrations().is_empty());
    }

    #[test]
    fn blank_secrets_count_as_missing() {
        let mut config = UpstreamConfig::default();
        config.serper.api_key = Some(String::from("   "));
        config.google_places.api_key = Some(String::from("key"));
        assert_eq!(config.configured_integrations(), vec![String::from("google_places")]);
    }
}
