//! Generic image passthrough.
//!
//! Lets the front-end display images from hosts that block hotlinking or
//! lack CORS headers. Only image content types are relayed.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Response;
use serde::Deserialize;
use tracing::warn;

use super::image_response;
use crate::error::{ApiError, required};
use crate::state::AppState;

/// Query parameters for `GET /api/proxy/image`.
#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    /// Absolute http(s) URL of the image.
    pub url: Option<String>,
}

/// Fetch `url` and relay it with a one-day cache header.
pub async fn proxy_image(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ImageQuery>,
) -> Result<Response, ApiError> {
    let url = required(query.url.as_deref(), "Image URL is required")?;

    let payload = state
        .media
        .fetch(url)
        .await
        .map_err(|e| ApiError::from_upstream(e, "Failed to fetch image"))?;

    if !payload.content_type.starts_with("image/") {
        warn!(url, content_type = %payload.content_type, "refusing non-image content");
        return Err(ApiError::InvalidParameter(String::from(
            "URL does not point to an image",
        )));
    }

    Ok(image_response(payload))
}
