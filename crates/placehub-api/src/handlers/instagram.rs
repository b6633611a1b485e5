//! Instagram public profile routes.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use placehub_types::{IgPostsResponse, IgProfile};
use placehub_upstream::instagram::DEFAULT_POST_LIMIT;
use serde::Deserialize;

use crate::error::{ApiError, required};
use crate::state::AppState;

/// Query parameters for the Instagram routes.
#[derive(Debug, Deserialize)]
pub struct InstagramQuery {
    /// Account name, with or without a leading `@`.
    pub username: Option<String>,
    /// Number of posts (posts route only), kept raw and parsed by the handler.
    pub limit: Option<String>,
}

fn username(query: &InstagramQuery) -> Result<&str, ApiError> {
    let raw = query.username.as_deref().map(|u| u.trim().trim_start_matches('@'));
    required(raw, "Username is required")
}

/// `GET /api/instagram/profile`.
pub async fn profile(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InstagramQuery>,
) -> Result<Json<IgProfile>, ApiError> {
    let username = username(&query)?;
    let instagram = state.instagram()?;

    instagram
        .profile(username)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_upstream(e, "Failed to fetch Instagram profile"))
}

/// `GET /api/instagram/posts`.
pub async fn posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InstagramQuery>,
) -> Result<Json<IgPostsResponse>, ApiError> {
    let username = username(&query)?;
    let limit = parse_limit(query.limit.as_deref())?;
    let instagram = state.instagram()?;

    instagram
        .posts(username, limit)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_upstream(e, "Failed to fetch Instagram posts"))
}

/// Parse `limit`, defaulting to [`DEFAULT_POST_LIMIT`]. The adapter clamps
/// the value, so only non-numeric input is refused.
fn parse_limit(raw: Option<&str>) -> Result<usize, ApiError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(DEFAULT_POST_LIMIT);
    };

    raw.parse::<usize>()
        .ok()
        .ok_or_else(|| ApiError::InvalidParameter(String::from("limit must be a non-negative integer")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_rejects_garbage() {
        assert_eq!(parse_limit(None).ok(), Some(DEFAULT_POST_LIMIT));
        assert_eq!(parse_limit(Some(" ")).ok(), Some(DEFAULT_POST_LIMIT));
        assert_eq!(parse_limit(Some("5")).ok(), Some(5));
        assert!(parse_limit(Some("abc")).is_err());
        assert!(parse_limit(Some("-3")).is_err());
    }
}
