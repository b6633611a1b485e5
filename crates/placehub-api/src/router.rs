//! Axum router construction for the PlaceHub API.
//!
//! Assembles all proxy routes into a single [`Router`] with permissive
//! CORS and HTTP tracing.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{health, instagram, media, places, search, storage, webhook};
use crate::state::AppState;

/// Build the complete Axum router for the PlaceHub server.
///
/// The router includes:
/// - `GET /api/health` -- liveness and configured integrations
/// - `GET /api/gplaces/search` -- Google place text search
/// - `GET /api/gplaces/details` -- Google place details
/// - `GET /api/gplaces/photo` -- Google photo passthrough
/// - `POST /api/serper/{mode}` -- Serper places or web search
/// - `GET /api/instagram/profile` -- Instagram public profile
/// - `GET /api/instagram/posts` -- Instagram recent posts
/// - `GET /api/proxy/image` -- arbitrary image passthrough
/// - `POST /api/storage/upload` -- multipart upload
/// - `POST /api/storage/upload-url` -- upload from a remote URL
/// - `GET /api/storage/list` -- list a folder
/// - `DELETE /api/storage/delete` -- delete an object
/// - `POST /api/webhook/link-places` -- forward to the link-places webhook
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/api/health", get(health::health))
        // Google Places
        .route("/api/gplaces/search", get(places::search))
        .route("/api/gplaces/details", get(places::details))
        .route("/api/gplaces/photo", get(places::photo))
        // Serper
        .route("/api/serper/{mode}", post(search::serper_search))
        // Instagram
        .route("/api/instagram/profile", get(instagram::profile))
        .route("/api/instagram/posts", get(instagram::posts))
        // Media
        .route("/api/proxy/image", get(media::proxy_image))
        // Storage
        .route("/api/storage/upload", post(storage::upload))
        .route("/api/storage/upload-url", post(storage::upload_from_url))
        .route("/api/storage/list", get(storage::list))
        .route("/api/storage/delete", delete(storage::delete))
        // Webhooks
        .route("/api/webhook/link-places", post(webhook::link_places))
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
