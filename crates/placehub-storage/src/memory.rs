//! In-memory object store.
//!
//! Behaves like a bucket for development and tests. Shares the listing
//! rules of the S3 backend.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::ObjectEntry;

/// A stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryObject {
    /// Object body.
    pub bytes: Vec<u8>,
    /// Content type given at upload.
    pub content_type: String,
    /// Upload time.
    pub last_modified: DateTime<Utc>,
}

/// Bucket held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    objects: Arc<RwLock<BTreeMap<String, MemoryObject>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) {
        let object = MemoryObject {
            bytes,
            content_type: content_type.to_owned(),
            last_modified: Utc::now(),
        };
        self.objects.write().await.insert(key.to_owned(), object);
    }

    pub(crate) async fn list(&self, prefix: Option<&str>, max_keys: usize) -> Vec<ObjectEntry> {
        let prefix = prefix.unwrap_or_default();
        self.objects
            .read()
            .await
            .range(prefix.to_owned()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .take(max_keys)
            .map(|(key, object)| ObjectEntry {
                key: key.clone(),
                size: u64::try_from(object.bytes.len()).ok(),
                last_modified: Some(object.last_modified),
            })
            .collect()
    }

    /// Deleting a missing key succeeds, as it does on S3.
    pub(crate) async fn delete(&self, key: &str) {
        self.objects.write().await.remove(key);
    }

    /// Read back an object.
    pub async fn get(&self, key: &str) -> Option<MemoryObject> {
        self.objects.read().await.get(key).cloned()
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Whether the store holds no objects.
    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}
