//! Error types for the PlaceHub server binary.

/// Top-level error for the server binary.
///
/// Each variant wraps a specific subsystem error, giving `main` a single
/// type to propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: crate::config::ConfigError,
    },

    /// Adapters or storage could not be built.
    #[error("startup error: {source}")]
    State {
        /// The underlying state error.
        #[from]
        source: placehub_api::StateError,
    },

    /// The HTTP server failed.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: placehub_api::ServerError,
    },

    /// The log subscriber could not be installed.
    #[error("logging error: {message}")]
    Logging {
        /// Description of the failure.
        message: String,
    },
}
