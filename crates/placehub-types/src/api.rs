//! Envelope types shared by every route.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// HTTP status code.
    #[serde(default)]
    pub status: u16,
}

/// Outcome of forwarding a payload to a webhook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WebhookResponse {
    /// Whether the webhook accepted the payload.
    pub success: bool,
    /// Failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HealthResponse {
    /// Always `ok` while the server answers.
    pub status: String,
    /// Server time, RFC 3339.
    pub timestamp: String,
    /// Server version.
    pub version: String,
    /// Integrations with their secrets configured.
    pub integrations: Vec<String>,
}
