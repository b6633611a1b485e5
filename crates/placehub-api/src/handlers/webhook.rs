//! Webhook forwarding route.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use placehub_types::WebhookResponse;
use serde_json::Value;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

/// `POST /api/webhook/link-places`: forward the JSON body unchanged.
pub async fn link_places(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<WebhookResponse>, ApiError> {
    let Json(payload) = body?;
    let webhook = state.link_places_webhook()?;

    webhook
        .send(&payload)
        .await
        .map_err(|e| ApiError::from_upstream(e, "Webhook failed"))?;

    info!("link-places webhook delivered");
    Ok(Json(WebhookResponse {
        success: true,
        error: None,
    }))
}
