//! Error types for Gemini operations.

use serde::Deserialize;

/// Result type alias for Gemini operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Gemini client error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error returned by the API (auth, quota, invalid request).
    #[error("Gemini API error {code} ({status}): {message}")]
    Api {
        /// HTTP status code.
        code: u16,
        /// Google status string (e.g., `RESOURCE_EXHAUSTED`).
        status: String,
        /// Human-readable message.
        message: String,
    },

    /// The prompt was rejected before generation.
    #[error("Prompt blocked: {0}")]
    Blocked(String),

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// URL parsing error.
    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    code: u16,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Builds an API error from a raw non-success body.
pub(crate) fn api_error(code: u16, reason: Option<&str>, body: &str) -> Error {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse { error }) => Error::Api {
            code: error.code,
            status: error.status,
            message: error.message,
        },
        Err(_) => Error::Api {
            code,
            status: reason.unwrap_or_default().to_string(),
            message: body.trim().to_string(),
        },
    }
}
