//! Google Places proxy routes.
//!
//! The API key stays on the server. Photo references in responses are
//! rewritten to `/api/gplaces/photo`, so the browser only ever talks to
//! PlaceHub.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::response::Response;
use placehub_types::{DEFAULT_PHOTO_WIDTH, PlaceDetails, SearchResponse};
use serde::Deserialize;
use tracing::debug;

use super::image_response;
use crate::error::{ApiError, required};
use crate::state::AppState;

/// Largest photo width Google serves.
pub const MAX_PHOTO_WIDTH: u32 = 1600;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for `GET /api/gplaces/search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Free-text query.
    pub q: Option<String>,
}

/// Query parameters for `GET /api/gplaces/details`.
#[derive(Debug, Deserialize)]
pub struct DetailsQuery {
    /// Google place id.
    pub id: Option<String>,
}

/// Query parameters for `GET /api/gplaces/photo`.
#[derive(Debug, Deserialize)]
pub struct PhotoQuery {
    /// Photo reference.
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    /// Requested width; kept as text so bad input yields our error shape.
    pub maxwidth: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Text search for places.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let q = required(query.q.as_deref(), "Query parameter is required")?;
    let places = state.places()?;

    let candidates = places
        .find_place(q)
        .await
        .map_err(|e| ApiError::from_upstream(e, "Failed to search places"))?;

    debug!(query = q, count = candidates.len(), "place search");
    Ok(Json(SearchResponse { candidates }))
}

/// Full details of a single place.
pub async fn details(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DetailsQuery>,
) -> Result<Json<PlaceDetails>, ApiError> {
    let id = required(query.id.as_deref(), "Place ID is required")?;
    let places = state.places()?;

    let details = places
        .details(id)
        .await
        .map_err(|e| ApiError::from_upstream(e, "Failed to get place details"))?;

    Ok(Json(details))
}

/// Photo passthrough. Non-OK upstream statuses are relayed as-is.
pub async fn photo(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PhotoQuery>,
) -> Result<Response, ApiError> {
    let reference = required(query.reference.as_deref(), "Photo reference is required")?;
    let max_width = parse_max_width(query.maxwidth.as_deref())?;
    let places = state.places()?;

    let payload = places
        .photo(reference, max_width)
        .await
        .map_err(|e| ApiError::from_upstream(e, "Failed to fetch photo"))?;

    Ok(image_response(payload))
}

/// Parse `maxwidth`, defaulting to [`DEFAULT_PHOTO_WIDTH`].
fn parse_max_width(raw: Option<&str>) -> Result<u32, ApiError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(DEFAULT_PHOTO_WIDTH);
    };

    raw.parse::<u32>()
        .ok()
        .filter(|w| (1..=MAX_PHOTO_WIDTH).contains(w))
        .ok_or_else(|| {
            ApiError::InvalidParameter(format!("maxwidth must be between 1 and {MAX_PHOTO_WIDTH}"))
        })
}
