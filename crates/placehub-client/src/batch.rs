//! Sequential batch photo upload.
//!
//! Photos picked on the details view are copied into the bucket one at a
//! time with a fixed pause between calls. There is no cancellation and no
//! rollback; each photo lands in either the succeeded or the failed list.

use std::future::Future;
use std::time::Duration;

use placehub_types::{DETAIL_PHOTO_WIDTH, PlaceDetails, UploadOptions, UploadResult};
use tracing::{debug, info};

use crate::api::ApiClient;

/// Pause between consecutive uploads.
pub const UPLOAD_PAUSE: Duration = Duration::from_millis(500);

/// One photo queued for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUploadItem {
    /// Google photo reference.
    pub reference: String,
    /// Absolute URL the server fetches the photo from.
    pub source_url: String,
}

/// A photo that was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedPhoto {
    /// Google photo reference.
    pub reference: String,
    /// Public URL of the stored copy.
    pub url: String,
    /// Object key of the stored copy.
    pub path: String,
}

/// A photo that could not be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedPhoto {
    /// Google photo reference.
    pub reference: String,
    /// Failure message.
    pub error: String,
}

/// Result of a batch: one entry per input photo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Photos that were stored, in upload order.
    pub succeeded: Vec<UploadedPhoto>,
    /// Photos that failed, in upload order.
    pub failed: Vec<FailedPhoto>,
}

impl BatchOutcome {
    /// Number of photos processed.
    pub fn len(&self) -> usize {
        self.succeeded.len().saturating_add(self.failed.len())
    }

    /// Whether the batch was empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record(&mut self, item: &PhotoUploadItem, result: UploadResult) {
        match result {
            UploadResult {
                success: true,
                url: Some(url),
                path,
                ..
            } => self.succeeded.push(UploadedPhoto {
                reference: item.reference.clone(),
                url,
                path: path.unwrap_or_default(),
            }),
            other => self.failed.push(FailedPhoto {
                reference: item.reference.clone(),
                error: other.error.unwrap_or_else(|| String::from("Upload failed")),
            }),
        }
    }
}

/// Queue the photos of `details` whose references are in `selected`,
/// in the order they appear on the place.
pub fn select_photos(api: &ApiClient, details: &PlaceDetails, selected: &[String]) -> Vec<PhotoUploadItem> {
    details
        .photos()
        .iter()
        .filter(|photo| selected.contains(&photo.reference))
        .map(|photo| PhotoUploadItem {
            reference: photo.reference.clone(),
            source_url: match photo.url.as_deref() {
                Some(url) => api.resolve(url),
                None => api.photo_url(&photo.reference, DETAIL_PHOTO_WIDTH),
            },
        })
        .collect()
}

/// Run `upload` over `items` one at a time, sleeping `pause` between
/// calls.
pub async fn upload_sequentially<F, Fut>(
    items: &[PhotoUploadItem],
    pause: Duration,
    mut upload: F,
) -> BatchOutcome
where
    F: FnMut(&PhotoUploadItem) -> Fut,
    Fut: Future<Output = UploadResult>,
{
    let mut outcome = BatchOutcome::default();

    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            tokio::time::sleep(pause).await;
        }
        let result = upload(item).await;
        debug!(reference = %item.reference, success = result.success, "photo upload finished");
        outcome.record(item, result);
    }

    outcome
}

impl ApiClient {
    /// Copy the selected photos of a place into `places/{place_id}`.
    pub async fn upload_place_photos(&self, details: &PlaceDetails, selected: &[String]) -> BatchOutcome {
        let items = select_photos(self, details, selected);
        let options = UploadOptions {
            folder: Some(format!("places/{}", details.id)),
            filename: None,
        };

        let options = &options;
        let outcome = upload_sequentially(&items, UPLOAD_PAUSE, |item| {
            let source_url = item.source_url.clone();
            async move { self.upload_from_url(&source_url, options).await }
        })
        .await;

        info!(
            place_id = %details.id,
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "batch photo upload finished"
        );
        outcome
    }
}
