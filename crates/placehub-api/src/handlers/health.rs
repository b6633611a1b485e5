//! `GET /api/health`.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use chrono::{SecondsFormat, Utc};
use placehub_types::HealthResponse;

use crate::state::AppState;

/// Report liveness, version, and which integrations are configured.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        integrations: state.integrations(),
    })
}
