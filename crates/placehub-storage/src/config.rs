//! Storage configuration and public URL derivation.

use serde::Deserialize;

/// Which backend serves the bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    /// An S3-compatible service (AWS, `MinIO`, Supabase storage, ...).
    #[default]
    S3,
    /// Process-local memory. Contents vanish on restart.
    Memory,
}

/// Object storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend selection.
    pub backend: StorageBackendKind,
    /// S3 endpoint URL. Env: `S3_ENDPOINT`.
    pub endpoint: Option<String>,
    /// Region. Env: `S3_REGION`.
    pub region: String,
    /// Access key id. Env: `S3_ACCESS_KEY_ID`.
    pub access_key_id: Option<String>,
    /// Secret access key. Env: `S3_SECRET_ACCESS_KEY`.
    pub secret_access_key: Option<String>,
    /// Bucket name. Env: `S3_BUCKET`.
    pub bucket: String,
    /// Base of public object URLs. Derived from the endpoint when unset.
    pub public_url: Option<String>,
    /// Largest accepted upload body, in bytes.
    pub max_upload_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::S3,
            endpoint: None,
            region: String::from("us-east-1"),
            access_key_id: None,
            secret_access_key: None,
            bucket: String::from("gplaces"),
            public_url: None,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl StorageConfig {
    /// Where objects of this bucket are publicly reachable.
    pub fn location(&self) -> StorageLocation {
        let public_base = self
            .public_url
            .clone()
            .or_else(|| self.endpoint.as_deref().map(derive_public_base))
            .unwrap_or_default();

        StorageLocation {
            bucket: self.bucket.clone(),
            public_base: public_base.trim_end_matches('/').to_owned(),
        }
    }
}

/// Turn an S3 API endpoint into the matching public object endpoint.
///
/// Supabase exposes the S3 protocol under `/storage/v1/s3` and serves
/// public objects under `/storage/v1/object/public`; other endpoints are
/// returned unchanged.
pub fn derive_public_base(endpoint: &str) -> String {
    endpoint.replace("/storage/v1/s3", "/storage/v1/object/public")
}

/// Bucket plus public URL base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLocation {
    /// Bucket name.
    pub bucket: String,
    /// Public URL base without a trailing slash.
    pub public_base: String,
}

impl StorageLocation {
    /// Public URL of `key`: `{public_base}/{bucket}/{key}`.
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_base, self.bucket, key)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn supabase_endpoint_maps_to_public_objects() {
        let config = StorageConfig {
            endpoint: Some(String::from("https://abc.supabase.co/storage/v1/s3")),
            ..StorageConfig::default()
        };
        let location = config.location();
        assert_eq!(
            location.public_url("places/a.jpg"),
            "https://abc.supabase.co/storage/v1/object/public/gplaces/places/a.jpg"
        );
    }

    #[test]
    fn explicit_public_url_wins() {
        let config = StorageConfig {
            endpoint: Some(String::from("http://minio:9000")),
            public_url: Some(String::from("https://cdn.example.com/")),
            bucket: String::from("media"),
            ..StorageConfig::default()
        };
        assert_eq!(
            config.location().public_url("x.png"),
            "https://cdn.example.com/media/x.png"
        );
    }

    #[test]
    fn yaml_defaults_fill_missing_fields() {
        let config: StorageConfig = serde_yml::from_str("backend: memory\nbucket: test\n").unwrap();
        assert_eq!(config.backend, StorageBackendKind::Memory);
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.bucket, "test");
    }
}
