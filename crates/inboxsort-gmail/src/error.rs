//! Error types for Gmail API operations.

use serde::Deserialize;

/// Result type alias for Gmail operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Gmail client error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error returned by the Gmail API.
    #[error("Gmail API error {code} ({status}): {message}")]
    Api {
        /// HTTP status code.
        code: u16,
        /// Google status string (e.g., `NOT_FOUND`).
        status: String,
        /// Human-readable message.
        message: String,
    },

    /// The bearer token expired before the request was sent.
    #[error("Access token expired")]
    TokenExpired,

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A message ID that cannot name a single path segment.
    #[error("Invalid resource ID: {0:?}")]
    InvalidId(String),

    /// URL parsing error.
    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),
}

impl Error {
    /// Returns true if the API rejected the request as not found.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { code: 404, .. })
    }
}

/// Google API error envelope: `{"error": {"code", "message", "status"}}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

impl ErrorResponse {
    /// Converts to an Error.
    pub(crate) fn into_error(self) -> Error {
        Error::Api {
            code: self.error.code,
            status: self.error.status,
            message: self.error.message,
        }
    }
}

/// Builds an API error from a raw non-success body.
///
/// Falls back to the status line when the body is not a Google envelope.
pub(crate) fn api_error(code: u16, reason: Option<&str>, body: &str) -> Error {
    serde_json::from_str::<ErrorResponse>(body).map_or_else(
        |_| Error::Api {
            code,
            status: reason.unwrap_or_default().to_string(),
            message: body.trim().to_string(),
        },
        ErrorResponse::into_error,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_from_envelope() {
        let body = r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#;
        let err = api_error(404, Some("Not Found"), body);

        assert!(err.is_not_found());
        match err {
            Error::Api {
                code,
                status,
                message,
            } => {
                assert_eq!(code, 404);
                assert_eq!(status, "NOT_FOUND");
                assert_eq!(message, "Requested entity was not found.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_from_plain_body() {
        let err = api_error(502, Some("Bad Gateway"), "upstream unavailable\n");

        match err {
            Error::Api {
                code,
                status,
                message,
            } => {
                assert_eq!(code, 502);
                assert_eq!(status, "Bad Gateway");
                assert_eq!(message, "upstream unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
