//! Shared application state for the PlaceHub API server.
//!
//! [`AppState`] holds one adapter per integration. Adapters whose secrets
//! are missing stay `None`; the routes that need them answer with
//! [`ApiError::NotConfigured`]. Nothing here is mutated after startup, so
//! requests never contend on shared state.

use placehub_storage::{ObjectStore, StorageConfig, StorageError};
use placehub_upstream::{
    GooglePlacesClient, InstagramClient, MediaFetcher, SerperClient, UpstreamConfig, UpstreamError,
    WebhookSender, build_http_client,
};

use crate::error::ApiError;

/// Default upper bound on upload bodies (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Google Places adapter.
    pub places: Option<GooglePlacesClient>,
    /// Serper.dev adapter.
    pub serper: Option<SerperClient>,
    /// Instagram adapter.
    pub instagram: Option<InstagramClient>,
    /// "Link places" webhook.
    pub link_places_webhook: Option<WebhookSender>,
    /// Image fetcher for the image proxy and upload-from-URL.
    pub media: MediaFetcher,
    /// Object storage bucket.
    pub storage: Option<ObjectStore>,
    /// Largest accepted request body on upload routes.
    pub max_upload_bytes: usize,
}

/// Errors raised while assembling [`AppState`] from configuration.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// The outbound HTTP client could not be built.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    /// The storage backend could not be built.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AppState {
    /// State with no integrations configured.
    pub const fn new(media: MediaFetcher) -> Self {
        Self {
            places: None,
            serper: None,
            instagram: None,
            link_places_webhook: None,
            media,
            storage: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Build every adapter whose settings are present.
    ///
    /// # Errors
    ///
    /// Returns [`StateError`] if the HTTP client or storage backend cannot
    /// be constructed.
    pub fn from_config(upstream: &UpstreamConfig, storage: &StorageConfig) -> Result<Self, StateError> {
        let client = build_http_client(upstream)?;

        Ok(Self {
            places: GooglePlacesClient::from_config(&upstream.google_places, client.clone()),
            serper: SerperClient::from_config(&upstream.serper, client.clone()),
            instagram: InstagramClient::from_config(&upstream.instagram, client.clone()),
            link_places_webhook: WebhookSender::link_places(&upstream.webhook, client.clone()),
            media: MediaFetcher::new(client, upstream.user_agent.clone()),
            storage: ObjectStore::from_config(storage)?,
            max_upload_bytes: storage.max_upload_bytes,
        })
    }

    /// Attach a Google Places adapter.
    #[must_use]
    pub fn with_places(mut self, places: GooglePlacesClient) -> Self {
        self.places = Some(places);
        self
    }

    /// Attach a Serper adapter.
    #[must_use]
    pub fn with_serper(mut self, serper: SerperClient) -> Self {
        self.serper = Some(serper);
        self
    }

    /// Attach an Instagram adapter.
    #[must_use]
    pub fn with_instagram(mut self, instagram: InstagramClient) -> Self {
        self.instagram = Some(instagram);
        self
    }

    /// Attach the "link places" webhook.
    #[must_use]
    pub fn with_link_places_webhook(mut self, webhook: WebhookSender) -> Self {
        self.link_places_webhook = Some(webhook);
        self
    }

    /// Attach an object store.
    #[must_use]
    pub fn with_storage(mut self, storage: ObjectStore) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Cap request bodies (uploads) at `bytes`.
    #[must_use]
    pub const fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    /// Google Places adapter, or a configuration error.
    pub fn places(&self) -> Result<&GooglePlacesClient, ApiError> {
        self.places
            .as_ref()
            .ok_or_else(|| ApiError::NotConfigured(String::from("API key not configured")))
    }

    /// Serper adapter, or a configuration error.
    pub fn serper(&self) -> Result<&SerperClient, ApiError> {
        self.serper
            .as_ref()
            .ok_or_else(|| ApiError::NotConfigured(String::from("API key not configured")))
    }

    /// Instagram adapter, or a configuration error.
    pub fn instagram(&self) -> Result<&InstagramClient, ApiError> {
        self.instagram
            .as_ref()
            .ok_or_else(|| ApiError::NotConfigured(String::from("Instagram app id not configured")))
    }

    /// "Link places" webhook, or a configuration error.
    pub fn link_places_webhook(&self) -> Result<&WebhookSender, ApiError> {
        self.link_places_webhook
            .as_ref()
            .ok_or_else(|| ApiError::NotConfigured(String::from("Webhook URL not configured")))
    }

    /// Object store, or a configuration error.
    pub fn storage(&self) -> Result<&ObjectStore, ApiError> {
        self.storage
            .as_ref()
            .ok_or_else(|| ApiError::NotConfigured(String::from("Storage not configured")))
    }

    /// Names of the configured integrations.
    pub fn integrations(&self) -> Vec<String> {
        [
            ("google_places", self.places.is_some()),
            ("serper", self.serper.is_some()),
            ("instagram", self.instagram.is_some()),
            ("webhook", self.link_places_webhook.is_some()),
            ("storage", self.storage.is_some()),
        ]
        .into_iter()
        .filter(|(_, present)| *present)
        .map(|(name, _)| name.to_owned())
        .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use placehub_storage::StorageBackendKind;

    use super::*;

    #[test]
    fn missing_secrets_leave_integrations_unconfigured() {
        let state =
            AppState::from_config(&UpstreamConfig::default(), &StorageConfig::default()).unwrap();
        assert!(state.integrations().is_empty());
        assert!(matches!(state.places(), Err(ApiError::NotConfigured(_))));
        assert!(matches!(state.storage(), Err(ApiError::NotConfigured(_))));
    }

    #[test]
    fn configured_secrets_build_adapters() {
        let mut upstream = UpstreamConfig::default();
        upstream.serper.api_key = Some(String::from("serper-key"));
        upstream.webhook.link_places_url = Some(String::from("https://hooks.test/link"));
        let storage = StorageConfig {
            backend: StorageBackendKind::Memory,
            max_upload_bytes: 1024,
            ..StorageConfig::default()
        };

        let state = AppState::from_config(&upstream, &storage).unwrap();
        assert_eq!(state.integrations(), vec!["serper", "webhook", "storage"]);
        assert_eq!(state.max_upload_bytes, 1024);
        assert!(state.serper().is_ok());
    }
}
