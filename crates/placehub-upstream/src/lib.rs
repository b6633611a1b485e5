//! External API adapters for PlaceHub.
//!
//! Each adapter wraps exactly one provider, performs a single outbound
//! call per operation, and reshapes the provider's JSON into the types in
//! [`placehub_types`]. There is no caching and no retry: a failed call is
//! reported once through [`UpstreamError`].
//!
//! ```text
//! API route --> adapter --> provider (HTTP, secret key) --> reshaped type
//! ```
//!
//! Adapters are built from [`UpstreamConfig`] with `from_config`, which
//! returns `None` when the provider's secret is missing.

pub mod config;
pub mod error;
pub mod gplaces;
pub mod instagram;
pub mod media;
pub mod serper;
pub mod webhook;

pub use config::{UpstreamConfig, build_http_client};
pub use error::UpstreamError;
pub use gplaces::GooglePlacesClient;
pub use instagram::InstagramClient;
pub use media::{MediaFetcher, MediaPayload};
pub use serper::SerperClient;
pub use webhook::WebhookSender;
