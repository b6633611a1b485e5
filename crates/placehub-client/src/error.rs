//! Client-side error type.

use placehub_types::ErrorBody;

/// Errors returned by [`ApiClient`](crate::ApiClient) calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a failure status.
    ///
    /// `message` is the `error` field of the response body, or
    /// `{operation} failed: {status}` when the body carried none.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message for display.
        message: String,
    },

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Request(String),

    /// The response body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The caller supplied unusable input.
    #[error("{0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}

impl ClientError {
    /// HTTP status of an API failure.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Pass successful responses through; turn failures into
/// [`ClientError::Api`].
pub(crate) async fn check(
    response: reqwest::Response,
    operation: &str,
) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.json::<ErrorBody>().await.ok();
    Err(ClientError::Api {
        status: status.as_u16(),
        message: failure_message(body.map(|b| b.error), operation, status.as_u16()),
    })
}

fn failure_message(error: Option<String>, operation: &str, status: u16) -> String {
    error
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("{operation} failed: {status}"))
}
