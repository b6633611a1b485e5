//! Error types for the PlaceHub API server.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Every
//! error answers with the same JSON envelope, `{"error", "status"}`.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use placehub_storage::StorageError;
use placehub_types::ErrorBody;
use placehub_upstream::UpstreamError;
use tracing::{error, warn};

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required parameter was absent or empty.
    #[error("missing parameter: {0}")]
    MissingParameter(String),

    /// A parameter was present but unusable.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A secret or backend this route needs is not configured.
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// The upstream has no record for the request.
    #[error("not found: {0}")]
    NotFound(String),

    /// The upstream answered but refused the request.
    #[error("upstream rejected: {0}")]
    UpstreamRejected(String),

    /// The upstream status is relayed to the caller unchanged.
    #[error("upstream status {status}: {message}")]
    UpstreamStatus {
        /// Upstream HTTP status code.
        status: u16,
        /// Message for the caller.
        message: String,
    },

    /// The request body exceeds the configured upload limit.
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    /// Network, parsing, or storage failure. The message is the route's
    /// generic failure text.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Map an adapter failure, using `fallback` as the message for
    /// transport and decode errors.
    pub fn from_upstream(err: UpstreamError, fallback: &str) -> Self {
        match err {
            UpstreamError::Rejected(message) => {
                warn!(%message, "upstream rejected request");
                Self::UpstreamRejected(message)
            }
            UpstreamError::NotFound(message) => Self::NotFound(message),
            UpstreamError::Status { status, message } => {
                warn!(status, %message, "upstream answered with failure status");
                Self::UpstreamStatus { status, message }
            }
            UpstreamError::InvalidInput(message) => Self::InvalidParameter(message),
            e @ (UpstreamError::Request(_) | UpstreamError::Decode(_)) => {
                error!(error = %e, "{fallback}");
                Self::Internal(fallback.to_owned())
            }
        }
    }

    /// Map a storage failure to a generic 500, logging the cause.
    pub fn from_storage(err: &StorageError, fallback: &str) -> Self {
        match err {
            StorageError::InvalidKey(message) => Self::InvalidParameter(message.clone()),
            StorageError::Backend(_) | StorageError::Config(_) => {
                error!(error = %err, "{fallback}");
                Self::Internal(fallback.to_owned())
            }
        }
    }

    /// HTTP status this error answers with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_) | Self::InvalidParameter(_) | Self::UpstreamRejected(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UpstreamStatus { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::NotConfigured(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the caller.
    pub fn message(&self) -> &str {
        match self {
            Self::MissingParameter(msg)
            | Self::InvalidParameter(msg)
            | Self::NotConfigured(msg)
            | Self::NotFound(msg)
            | Self::UpstreamRejected(msg)
            | Self::PayloadTooLarge(msg)
            | Self::Internal(msg) => msg,
            Self::UpstreamStatus { message, .. } => message,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidParameter(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::InvalidParameter(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(String::from("File too large"))
        } else {
            Self::InvalidParameter(err.body_text())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.message().to_owned(),
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Return the trimmed value of a required parameter, or
/// [`ApiError::MissingParameter`] with `message` when it is absent or blank.
pub fn required<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str, ApiError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::MissingParameter(message.to_owned()))
}

/// Treat blank optional strings as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
