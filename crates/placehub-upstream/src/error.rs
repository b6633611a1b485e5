//! Error types for the upstream adapters.
//!
//! Each variant tells the API layer how to answer: a rejection becomes a
//! 400, a missing record a 404, a raw status is passed through, and
//! transport or decode failures become a generic 500.

/// Errors that can occur while calling an external API.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The request could not be sent or the connection failed.
    #[error("request failed: {0}")]
    Request(String),

    /// The response body could not be decoded.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The provider answered but refused the request.
    #[error("{0}")]
    Rejected(String),

    /// The provider has no record for the requested identifier.
    #[error("{0}")]
    NotFound(String),

    /// The provider answered with a non-success HTTP status that should be
    /// relayed as-is.
    #[error("{message}")]
    Status {
        /// Upstream HTTP status code.
        status: u16,
        /// Message for the caller.
        message: String,
    },

    /// An input could not be turned into a valid request.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}

/// Pick the message for a refused provider call: the provider's own
/// message when present, else `{prefix}: {status}`, else `fallback`.
pub fn provider_message(
    error_message: Option<&str>,
    status: Option<&str>,
    prefix: &str,
    fallback: &str,
) -> String {
    if let Some(msg) = error_message.filter(|m| !m.is_empty()) {
        return msg.to_owned();
    }
    if let Some(status) = status.filter(|s| !s.is_empty()) {
        return format!("{prefix}: {status}");
    }
    fallback.to_owned()
}
