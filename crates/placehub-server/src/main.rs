//! PlaceHub server binary.
//!
//! Loads configuration, initializes logging, builds one adapter per
//! configured integration, and serves the proxy API until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `placehub-config.yaml` (or `PLACEHUB_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the upstream adapters and the storage backend
//! 4. Serve until shutdown

mod config;
mod error;

use std::path::PathBuf;
use std::sync::Arc;

use placehub_api::{AppState, start_server};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, LogFormat, LoggingConfig, ServiceConfig};
use crate::error::ServiceError;

/// Application entry point for the PlaceHub server.
///
/// # Errors
///
/// Returns an error if configuration, startup, or serving fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config_path = std::env::var(CONFIG_PATH_ENV)
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config_found = config_path.exists();
    let config = ServiceConfig::load(&config_path).map_err(ServiceError::from)?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging)?;
    info!("placehub-server starting");
    if config_found {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }

    // 3. Build adapters and storage.
    let state = AppState::from_config(&config.upstream, &config.storage).map_err(ServiceError::from)?;
    let integrations = state.integrations();
    for name in ["google_places", "serper", "instagram", "webhook", "storage"] {
        if !integrations.iter().any(|i| i == name) {
            warn!(integration = name, "not configured; its routes will answer 500");
        }
    }
    if let Some(store) = &state.storage {
        info!(
            backend = store.backend_name(),
            bucket = %config.storage.bucket,
            "Object storage ready"
        );
    }

    // 4. Serve.
    start_server(&config.server, Arc::new(state))
        .await
        .map_err(ServiceError::from)?;

    info!("placehub-server stopped");
    Ok(())
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the
/// configured level.
fn init_tracing(logging: &LoggingConfig) -> Result<(), ServiceError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let result = match logging.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };

    result.map_err(|e| ServiceError::Logging {
        message: e.to_string(),
    })
}
