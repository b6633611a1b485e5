//! Object storage request and response shapes.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Optional placement of an uploaded object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UploadOptions {
    /// Folder (key prefix) to place the object under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    /// Filename to use instead of a generated one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Uniform outcome of an upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UploadResult {
    /// Whether the object was stored.
    pub success: bool,
    /// Public URL of the stored object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Object key inside the bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadResult {
    /// A successful upload stored at `path`, reachable at `url`.
    pub fn stored(url: String, path: String) -> Self {
        Self {
            success: true,
            url: Some(url),
            path: Some(path),
            error: None,
        }
    }

    /// A failed upload.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            url: None,
            path: None,
            error: Some(error.into()),
        }
    }
}

/// Uniform outcome of a delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DeleteResult {
    /// Whether the object was removed.
    pub success: bool,
    /// Failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Metadata of one stored object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct StorageFile {
    /// Last path segment of the key.
    pub name: String,
    /// Full object key.
    pub path: String,
    /// Public URL.
    pub url: String,
    /// Size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Last modification time, RFC 3339.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

/// Response body of `GET /api/storage/list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FileList {
    /// Files under the requested folder.
    pub files: Vec<StorageFile>,
    /// Failure message (client side only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
