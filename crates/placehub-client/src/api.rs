//! Typed wrappers over the PlaceHub HTTP routes.
//!
//! Read operations return `Result<_, ClientError>`. Storage and webhook
//! operations fold every failure into their uniform result shape
//! (`success: false` plus `error`) so callers can render them directly.

use placehub_types::{
    DeleteResult, FileList, IgPostsResponse, IgProfile, PlaceDetails, SearchCandidate,
    SearchResponse, SerperResult, SerperSearchMode, SerperSearchParams, UploadOptions,
    UploadResult, WebhookResponse, photo_proxy_url,
};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use crate::error::{ClientError, check};

/// HTTP client for a PlaceHub server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Client for the server at `base_url` (e.g. `http://localhost:8080`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Client sharing an existing `reqwest` connection pool.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Server base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    // -----------------------------------------------------------------------
    // Google Places
    // -----------------------------------------------------------------------

    /// Search places by free text.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails or the server refuses it.
    pub async fn search_places(&self, query: &str) -> Result<Vec<SearchCandidate>, ClientError> {
        let response = self
            .client
            .get(self.url("/api/gplaces/search"))
            .query(&[("q", query)])
            .send()
            .await?;

        let body: SearchResponse = check(response, "Search").await?.json().await?;
        Ok(body.candidates)
    }

    /// Fetch the details of one place.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails or the place is unknown.
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, ClientError> {
        let response = self
            .client
            .get(self.url("/api/gplaces/details"))
            .query(&[("id", place_id)])
            .send()
            .await?;

        Ok(check(response, "Details").await?.json().await?)
    }

    /// Absolute URL of a photo served through the photo proxy.
    pub fn photo_url(&self, reference: &str, max_width: u32) -> String {
        self.url(&photo_proxy_url(reference, max_width))
    }

    /// Resolve a server-relative URL (as found in search and detail
    /// responses) against this server.
    pub fn resolve(&self, url: &str) -> String {
        if url.starts_with('/') {
            self.url(url)
        } else {
            url.to_owned()
        }
    }

    // -----------------------------------------------------------------------
    // Serper and Instagram
    // -----------------------------------------------------------------------

    /// Run a Serper search.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails or Serper refuses it.
    pub async fn serper_search(
        &self,
        mode: SerperSearchMode,
        params: &SerperSearchParams,
    ) -> Result<SerperResult, ClientError> {
        let response = self
            .client
            .post(self.url(&format!("/api/serper/{}", mode.as_str())))
            .json(params)
            .send()
            .await?;

        Ok(check(response, "Serper search").await?.json().await?)
    }

    /// Fetch an Instagram profile.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails or the user is unknown.
    pub async fn instagram_profile(&self, username: &str) -> Result<IgProfile, ClientError> {
        let response = self
            .client
            .get(self.url("/api/instagram/profile"))
            .query(&[("username", username)])
            .send()
            .await?;

        Ok(check(response, "Instagram profile").await?.json().await?)
    }

    /// Fetch recent Instagram posts; the server default applies when
    /// `limit` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails, the user is unknown,
    /// or the profile is private.
    pub async fn instagram_posts(
        &self,
        username: &str,
        limit: Option<usize>,
    ) -> Result<IgPostsResponse, ClientError> {
        let mut request = self
            .client
            .get(self.url("/api/instagram/posts"))
            .query(&[("username", username)]);
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }

        let response = request.send().await?;
        Ok(check(response, "Instagram posts").await?.json().await?)
    }

    // -----------------------------------------------------------------------
    // Storage
    // -----------------------------------------------------------------------

    /// Upload raw bytes as a multipart `file`.
    pub async fn upload_file(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        content_type: &str,
        options: &UploadOptions,
    ) -> UploadResult {
        let result = async {
            let part = reqwest::multipart::Part::bytes(bytes)
                .file_name(file_name.to_owned())
                .mime_str(content_type)
                .map_err(|e| ClientError::InvalidInput(format!("invalid content type: {e}")))?;

            let mut form = reqwest::multipart::Form::new().part("file", part);
            if let Some(folder) = &options.folder {
                form = form.text("folder", folder.clone());
            }
            if let Some(filename) = &options.filename {
                form = form.text("filename", filename.clone());
            }

            let response = self
                .client
                .post(self.url("/api/storage/upload"))
                .multipart(form)
                .send()
                .await?;
            Ok::<UploadResult, ClientError>(check(response, "Upload").await?.json().await?)
        }
        .await;

        result.unwrap_or_else(|e| {
            warn!(error = %e, file_name, "upload failed");
            UploadResult::failed(e.to_string())
        })
    }

    /// Ask the server to copy `source_url` into the bucket.
    pub async fn upload_from_url(&self, source_url: &str, options: &UploadOptions) -> UploadResult {
        let body = json!({
            "sourceUrl": source_url,
            "folder": options.folder,
            "filename": options.filename,
        });

        let result = async {
            let response = self
                .client
                .post(self.url("/api/storage/upload-url"))
                .json(&body)
                .send()
                .await?;
            Ok::<UploadResult, ClientError>(check(response, "Upload").await?.json().await?)
        }
        .await;

        result.unwrap_or_else(|e| {
            warn!(error = %e, source_url, "upload from URL failed");
            UploadResult::failed(e.to_string())
        })
    }

    /// Delete the object at `path`.
    pub async fn delete_file(&self, path: &str) -> DeleteResult {
        let result = async {
            let response = self
                .client
                .delete(self.url("/api/storage/delete"))
                .json(&json!({ "path": path }))
                .send()
                .await?;
            check(response, "Delete").await
        }
        .await;

        match result {
            Ok(_) => DeleteResult {
                success: true,
                error: None,
            },
            Err(e) => DeleteResult {
                success: false,
                error: Some(e.to_string()),
            },
        }
    }

    /// List the files under `folder` (empty for the bucket root).
    pub async fn list_files(&self, folder: &str) -> FileList {
        let result = async {
            let response = self
                .client
                .get(self.url("/api/storage/list"))
                .query(&[("folder", folder)])
                .send()
                .await?;
            Ok::<FileList, ClientError>(check(response, "List").await?.json().await?)
        }
        .await;

        result.unwrap_or_else(|e| FileList {
            files: Vec::new(),
            error: Some(e.to_string()),
        })
    }

    // -----------------------------------------------------------------------
    // Webhooks
    // -----------------------------------------------------------------------

    /// Forward `payload` to the "link places" webhook.
    pub async fn send_webhook<T: Serialize + Sync>(&self, payload: &T) -> WebhookResponse {
        let result = async {
            let response = self
                .client
                .post(self.url("/api/webhook/link-places"))
                .json(payload)
                .send()
                .await?;
            check(response, "Webhook").await
        }
        .await;

        match result {
            Ok(_) => WebhookResponse {
                success: true,
                error: None,
            },
            Err(e) => {
                warn!(error = %e, "webhook failed");
                WebhookResponse {
                    success: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_urls_are_absolute() {
        let api = ApiClient::new("http://localhost:8080/");
        assert_eq!(api.base_url(), "http://localhost:8080");
        assert_eq!(
            api.photo_url("REF", 800),
            "http://localhost:8080/api/gplaces/photo?ref=REF&maxwidth=800"
        );
        assert_eq!(
            api.resolve("/api/gplaces/photo?ref=A&maxwidth=400"),
            "http://localhost:8080/api/gplaces/photo?ref=A&maxwidth=400"
        );
        assert_eq!(api.resolve("https://cdn.test/a.jpg"), "https://cdn.test/a.jpg");
    }
}
