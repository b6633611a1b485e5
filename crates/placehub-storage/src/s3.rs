//! S3-compatible backend built on `aws-sdk-s3`.
//!
//! Uses path-style addressing and static credentials so it works against
//! `MinIO`, Supabase storage, and other S3 lookalikes as well as AWS.

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use chrono::DateTime;
use tracing::debug;

use crate::ObjectEntry;
use crate::config::StorageConfig;
use crate::error::StorageError;

/// A bucket on an S3-compatible service.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Store {
    /// Build a store from configuration.
    ///
    /// Returns `Ok(None)` when the endpoint or credentials are missing so
    /// the server can run with storage routes disabled.
    pub fn from_config(config: &StorageConfig) -> Result<Option<Self>, StorageError> {
        let (Some(endpoint), Some(access_key), Some(secret_key)) = (
            non_empty(config.endpoint.as_ref()),
            non_empty(config.access_key_id.as_ref()),
            non_empty(config.secret_access_key.as_ref()),
        ) else {
            return Ok(None);
        };

        if config.bucket.trim().is_empty() {
            return Err(StorageError::Config(String::from("bucket name is empty")));
        }

        let credentials = Credentials::new(access_key, secret_key, None, None, "placehub-config");
        let sdk_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(endpoint)
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Ok(Some(Self {
            client: aws_sdk_s3::Client::from_conf(sdk_config),
            bucket: config.bucket.clone(),
        }))
    }

    pub(crate) async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::Backend(DisplayErrorContext(&e).to_string()))?;

        debug!(bucket = self.bucket, key, "object stored");
        Ok(())
    }

    pub(crate) async fn list(
        &self,
        prefix: Option<&str>,
        max_keys: usize,
    ) -> Result<Vec<ObjectEntry>, StorageError> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .set_prefix(prefix.map(ToOwned::to_owned))
            .max_keys(i32::try_from(max_keys).unwrap_or(i32::MAX))
            .send()
            .await
            .map_err(|e| StorageError::Backend(DisplayErrorContext(&e).to_string()))?;

        Ok(output
            .contents()
            .iter()
            .filter_map(|object| {
                let key = object.key()?.to_owned();
                Some(ObjectEntry {
                    key,
                    size: object.size().and_then(|s| u64::try_from(s).ok()),
                    last_modified: object
                        .last_modified()
                        .and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos())),
                })
            })
            .collect())
    }

    pub(crate) async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Backend(DisplayErrorContext(&e).to_string()))?;

        debug!(bucket = self.bucket, key, "object deleted");
        Ok(())
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}
