//! Object storage adapter for PlaceHub.
//!
//! A thin wrapper issuing put/list/delete calls against a single bucket
//! used as a flat blob store, plus the public URL rule
//! `{public_base}/{bucket}/{key}`.
//!
//! # Backends
//!
//! [`ObjectStore`] dispatches over an enum rather than a trait object
//! because async methods are not dyn-compatible:
//!
//! - [`S3Store`] -- any S3-compatible service via `aws-sdk-s3`
//! - [`MemoryStore`] -- process-local map for development and tests

pub mod config;
pub mod error;
pub mod key;
pub mod memory;
pub mod s3;

use chrono::{DateTime, SecondsFormat, Utc};
use placehub_types::StorageFile;
use tracing::debug;

pub use config::{StorageBackendKind, StorageConfig, StorageLocation};
pub use error::StorageError;
pub use memory::{MemoryObject, MemoryStore};
pub use s3::S3Store;

/// Most keys returned by a single listing.
pub const MAX_LIST_KEYS: usize = 100;

/// A raw listing entry as reported by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectEntry {
    /// Full object key.
    pub key: String,
    /// Size in bytes.
    pub size: Option<u64>,
    /// Last modification time.
    pub last_modified: Option<DateTime<Utc>>,
}

/// The concrete storage backend.
#[derive(Debug, Clone)]
pub enum Backend {
    /// S3-compatible service.
    S3(S3Store),
    /// In-memory bucket.
    Memory(MemoryStore),
}

/// A bucket plus the rule for its public URLs.
#[derive(Debug, Clone)]
pub struct ObjectStore {
    backend: Backend,
    location: StorageLocation,
}

impl ObjectStore {
    /// Wrap a backend reachable at `location`.
    pub const fn new(backend: Backend, location: StorageLocation) -> Self {
        Self { backend, location }
    }

    /// Build the store described by `config`.
    ///
    /// Returns `Ok(None)` for an S3 backend without endpoint or
    /// credentials.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Config`] when the settings are unusable.
    pub fn from_config(config: &StorageConfig) -> Result<Option<Self>, StorageError> {
        let backend = match config.backend {
            StorageBackendKind::Memory => Some(Backend::Memory(MemoryStore::new())),
            StorageBackendKind::S3 => S3Store::from_config(config)?.map(Backend::S3),
        };
        Ok(backend.map(|backend| Self::new(backend, config.location())))
    }

    /// An in-memory store with the given location, for tests and local runs.
    pub fn memory(location: StorageLocation) -> (Self, MemoryStore) {
        let store = MemoryStore::new();
        (Self::new(Backend::Memory(store.clone()), location), store)
    }

    /// Human-readable backend name for logging.
    pub const fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::S3(_) => "s3",
            Backend::Memory(_) => "memory",
        }
    }

    /// Public URL of `key`.
    pub fn public_url(&self, key: &str) -> String {
        self.location.public_url(key)
    }

    /// Store `bytes` under `key` and return the object's public URL.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] for unusable keys or
    /// [`StorageError::Backend`] when the backend fails.
    pub async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        key::validate_key(key)?;
        let size = bytes.len();

        match &self.backend {
            Backend::S3(store) => store.put(key, bytes, content_type).await?,
            Backend::Memory(store) => store.put(key, bytes, content_type).await,
        }

        debug!(key, size, content_type, backend = self.backend_name(), "upload complete");
        Ok(self.public_url(key))
    }

    /// List the files directly or transitively under `folder`.
    ///
    /// An empty folder lists the bucket root. At most [`MAX_LIST_KEYS`]
    /// keys are returned and folder placeholder keys (ending in `/`) are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] when the backend fails.
    pub async fn list(&self, folder: &str) -> Result<Vec<StorageFile>, StorageError> {
        let prefix = key::list_prefix(folder);

        let entries = match &self.backend {
            Backend::S3(store) => store.list(prefix.as_deref(), MAX_LIST_KEYS).await?,
            Backend::Memory(store) => store.list(prefix.as_deref(), MAX_LIST_KEYS).await,
        };

        Ok(entries
            .into_iter()
            .filter(|entry| !entry.key.is_empty() && !entry.key.ends_with('/'))
            .map(|entry| StorageFile {
                name: key::file_name_of(&entry.key).to_owned(),
                url: self.public_url(&entry.key),
                size: entry.size,
                last_modified: entry
                    .last_modified
                    .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true)),
                path: entry.key,
            })
            .collect())
    }

    /// Delete the object at `key`. Missing objects are not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] for unusable keys or
    /// [`StorageError::Backend`] when the backend fails.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        key::validate_key(key)?;

        match &self.backend {
            Backend::S3(store) => store.delete(key).await?,
            Backend::Memory(store) => store.delete(key).await,
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn location() -> StorageLocation {
        StorageLocation {
            bucket: String::from("gplaces"),
            public_base: String::from("https://cdn.test"),
        }
    }

    #[tokio::test]
    async fn put_returns_public_url() {
        let (store, memory) = ObjectStore::memory(location());
        let url = store.put("places/a.jpg", vec![1, 2, 3], "image/jpeg").await.unwrap();

        assert_eq!(url, "https://cdn.test/gplaces/places/a.jpg");
        let object = memory.get("places/a.jpg").await.unwrap();
        assert_eq!(object.content_type, "image/jpeg");
        assert_eq!(object.bytes, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn list_scopes_to_folder_and_skips_placeholders() {
        let (store, _) = ObjectStore::memory(location());
        store.put("places/a.jpg", vec![0; 4], "image/jpeg").await.unwrap();
        store.put("places/b.png", vec![0; 2], "image/png").await.unwrap();
        store.put("placesextra/c.jpg", vec![0], "image/jpeg").await.unwrap();
        store.put("other/d.jpg", vec![0], "image/jpeg").await.unwrap();

        let files = store.list("places").await.unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.jpg", "b.png"]);
        assert_eq!(files[0].path, "places/a.jpg");
        assert_eq!(files[0].size, Some(4));
        assert!(files[0].last_modified.as_deref().unwrap().ends_with('Z'));

        assert_eq!(store.list("").await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn delete_removes_object() {
        let (store, memory) = ObjectStore::memory(location());
        store.put("a.jpg", vec![1], "image/jpeg").await.unwrap();
        store.delete("a.jpg").await.unwrap();
        assert!(memory.is_empty().await);

        // Deleting again is fine.
        store.delete("a.jpg").await.unwrap();
        assert!(store.delete("").await.is_err());
    }

    #[test]
    fn s3_without_credentials_is_unconfigured() {
        let config = StorageConfig::default();
        assert!(ObjectStore::from_config(&config).unwrap().is_none());

        let config = StorageConfig {
            backend: StorageBackendKind::Memory,
            ..StorageConfig::default()
        };
        let store = ObjectStore::from_config(&config).unwrap().unwrap();
        assert_eq!(store.backend_name(), "memory");
    }
}
