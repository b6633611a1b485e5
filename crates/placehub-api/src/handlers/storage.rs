//! Object storage routes.
//!
//! Uploads land under `{folder}/{filename}`; when no filename is given a
//! fresh one is generated from the current time and a random suffix.

use std::sync::Arc;

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Query, State};
use placehub_storage::key;
use placehub_types::{DeleteResult, FileList, UploadResult};
use placehub_upstream::UpstreamError;
use placehub_upstream::media::DEFAULT_IMAGE_CONTENT_TYPE;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::error::{ApiError, non_blank, required};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// JSON body of `POST /api/storage/upload-url`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadFromUrlRequest {
    /// Image to copy into the bucket.
    #[validate(url(message = "Source URL is not a valid URL"))]
    pub source_url: Option<String>,
    /// Target folder.
    pub folder: Option<String>,
    /// Target filename; generated when absent.
    #[validate(length(max = 255, message = "Filename is too long"))]
    pub filename: Option<String>,
}

/// JSON body of `DELETE /api/storage/delete`.
#[derive(Debug, Deserialize, Validate)]
pub struct DeleteRequest {
    /// Object key to remove.
    #[validate(length(max = 1024, message = "Path is too long"))]
    pub path: Option<String>,
}

/// Query parameters for `GET /api/storage/list`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Folder to list; the bucket root when absent.
    pub folder: Option<String>,
}

/// The `file` part of a multipart upload.
struct UploadedFile {
    name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

fn invalid(errors: &validator::ValidationErrors) -> ApiError {
    ApiError::InvalidParameter(format!("Invalid request: {errors}"))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `POST /api/storage/upload`: multipart fields `file`, `folder`, `filename`.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResult>, ApiError> {
    let mut multipart = multipart?;
    let mut file = None;
    let mut folder = None;
    let mut filename = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_owned();
        match field_name.as_str() {
            "file" => {
                let name = field.file_name().map(ToOwned::to_owned);
                let content_type = field.content_type().map(ToOwned::to_owned);
                let bytes = field.bytes().await?.to_vec();
                file = Some(UploadedFile {
                    name,
                    content_type,
                    bytes,
                });
            }
            "folder" => folder = non_blank(Some(field.text().await?)),
            "filename" => filename = non_blank(Some(field.text().await?)),
            _ => {}
        }
    }

    // Browsers send an empty, unnamed part when no file was picked.
    let file = file
        .filter(|f| !f.bytes.is_empty() || f.name.as_deref().is_some_and(|n| !n.is_empty()))
        .ok_or_else(|| ApiError::MissingParameter(String::from("No file provided")))?;
    let store = state.storage()?;

    let filename = filename.unwrap_or_else(|| {
        key::generate_filename(key::extension_from_name(file.name.as_deref().unwrap_or_default()))
    });
    let object_key = key::object_key(folder.as_deref(), &filename);
    let content_type = file
        .content_type
        .unwrap_or_else(|| DEFAULT_IMAGE_CONTENT_TYPE.to_owned());
    let size = file.bytes.len();

    let url = store
        .put(&object_key, file.bytes, &content_type)
        .await
        .map_err(|e| ApiError::from_storage(&e, "Upload failed"))?;

    info!(key = %object_key, size, "file uploaded");
    Ok(Json(UploadResult::stored(url, object_key)))
}

/// `POST /api/storage/upload-url`: copy a remote image into the bucket.
pub async fn upload_from_url(
    State(state): State<Arc<AppState>>,
    body: Result<Json<UploadFromUrlRequest>, JsonRejection>,
) -> Result<Json<UploadResult>, ApiError> {
    let Json(request) = body?;
    let source_url = required(request.source_url.as_deref(), "No source URL provided")?;
    request.validate().map_err(|e| invalid(&e))?;
    let store = state.storage()?;

    let payload = state.media.fetch(source_url).await.map_err(|e| match e {
        UpstreamError::Status { message, .. } => ApiError::UpstreamRejected(message),
        other => ApiError::from_upstream(other, "Upload failed"),
    })?;

    let filename = non_blank(request.filename.clone()).unwrap_or_else(|| {
        key::generate_filename(key::extension_for_content_type(&payload.content_type))
    });
    let object_key = key::object_key(request.folder.as_deref(), &filename);
    let size = payload.bytes.len();

    let url = store
        .put(&object_key, payload.bytes, &payload.content_type)
        .await
        .map_err(|e| ApiError::from_storage(&e, "Upload failed"))?;

    info!(key = %object_key, size, source = source_url, "remote image stored");
    Ok(Json(UploadResult::stored(url, object_key)))
}

/// `GET /api/storage/list`.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<FileList>, ApiError> {
    let store = state.storage()?;
    let folder = query.folder.unwrap_or_default();

    let files = store
        .list(&folder)
        .await
        .map_err(|e| ApiError::from_storage(&e, "List failed"))?;

    Ok(Json(FileList { files, error: None }))
}

/// `DELETE /api/storage/delete`.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    body: Result<Json<DeleteRequest>, JsonRejection>,
) -> Result<Json<DeleteResult>, ApiError> {
    let Json(request) = body?;
    let path = required(request.path.as_deref(), "No path provided")?;
    request.validate().map_err(|e| invalid(&e))?;
    let store = state.storage()?;

    store
        .delete(path)
        .await
        .map_err(|e| ApiError::from_storage(&e, "Delete failed"))?;

    info!(key = path, "file deleted");
    Ok(Json(DeleteResult {
        success: true,
        error: None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_url_must_be_a_url() {
        let request = UploadFromUrlRequest {
            source_url: Some(String::from("not a url")),
            folder: None,
            filename: None,
        };
        assert!(request.validate().is_err());

        let request = UploadFromUrlRequest {
            source_url: Some(String::from("https://cdn.test/a.png")),
            folder: Some(String::from("places")),
            filename: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn body_uses_camel_case_source_url() {
        let request: Result<UploadFromUrlRequest, _> =
            serde_json::from_str(r#"{"sourceUrl":"https://cdn.test/a.png","folder":"x"}"#);
        assert!(request.is_ok_and(|r| r.source_url.is_some()));
    }
}
