//! Binary media fetching.
//!
//! Used by the photo proxy, the generic image proxy, and upload-from-URL.
//! Bodies are buffered whole; images served through PlaceHub are small.

use crate::error::UpstreamError;

/// Content type assumed when the upstream omits one.
pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// A fetched binary body with its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPayload {
    /// Raw body bytes.
    pub bytes: Vec<u8>,
    /// Content type reported by the upstream.
    pub content_type: String,
}

/// Fetches images from arbitrary public URLs.
#[derive(Debug, Clone)]
pub struct MediaFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl MediaFetcher {
    /// Create a fetcher that identifies itself with `user_agent`.
    pub fn new(client: reqwest::Client, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            user_agent: user_agent.into(),
        }
    }

    /// Download `url` and return its body.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::InvalidInput`] for non-HTTP URLs,
    /// [`UpstreamError::Status`] when the host answers with a non-success
    /// status, and [`UpstreamError::Request`] on transport failure.
    pub async fn fetch(&self, url: &str) -> Result<MediaPayload, UpstreamError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|e| UpstreamError::InvalidInput(format!("invalid URL {url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(UpstreamError::InvalidInput(format!(
                "unsupported URL scheme: {}",
                parsed.scheme()
            )));
        }

        let response = self
            .client
            .get(parsed)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: format!("Failed to fetch image: {}", status.as_u16()),
            });
        }

        read_media(response).await
    }
}

/// Buffer a successful response into a [`MediaPayload`].
pub(crate) async fn read_media(response: reqwest::Response) -> Result<MediaPayload, UpstreamError> {
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_IMAGE_CONTENT_TYPE)
        .to_owned();

    let bytes = response.bytes().await?.to_vec();

    Ok(MediaPayload {
        bytes,
        content_type,
    })
}
