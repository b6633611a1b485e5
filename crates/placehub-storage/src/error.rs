//! Error types for the storage adapter.

/// Errors that can occur while talking to the object store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backend refused or failed the operation.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// The object key is unusable.
    #[error("invalid object key: {0}")]
    InvalidKey(String),

    /// Storage settings are incomplete or contradictory.
    #[error("storage config error: {0}")]
    Config(String),
}
