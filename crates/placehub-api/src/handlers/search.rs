//! Serper.dev proxy route.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use placehub_types::{SerperResult, SerperSearchMode, SerperSearchParams};
use tracing::debug;

use crate::error::{ApiError, non_blank, required};
use crate::state::AppState;

/// `POST /api/serper/{mode}`: forward the search to Serper.
///
/// `mode` is `places` or `search`; the response is tagged with it.
pub async fn serper_search(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
    body: Result<Json<SerperSearchParams>, JsonRejection>,
) -> Result<Json<SerperResult>, ApiError> {
    let mode: SerperSearchMode = mode.parse().map_err(ApiError::InvalidParameter)?;
    let Json(params) = body?;
    let q = required(Some(params.q.as_str()), "Query parameter is required")?.to_owned();

    let params = SerperSearchParams {
        q,
        location: non_blank(params.location),
        gl: non_blank(params.gl),
        hl: non_blank(params.hl),
        num: params.num,
    };
    let serper = state.serper()?;

    let result = serper
        .search(mode, &params)
        .await
        .map_err(|e| ApiError::from_upstream(e, "Search failed"))?;

    debug!(mode = mode.as_str(), query = %params.q, "serper search");
    Ok(Json(result))
}
