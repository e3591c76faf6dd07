//! Bearer token handed to the client by the caller.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// `OAuth2` access token with metadata.
///
/// Acquisition and refresh happen upstream; this type only carries the
/// token and knows when it should no longer be used.
#[derive(Clone, Serialize, Deserialize)]
pub struct Token {
    /// Access token string.
    pub access_token: String,
    /// Token type (usually "Bearer").
    pub token_type: String,
    /// Expiration time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(access_token: impl Into<String>, token_type: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: token_type.into(),
            expires_at: None,
        }
    }

    /// Creates a bearer token with no known expiry.
    #[must_use]
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self::new(access_token, "Bearer")
    }

    /// Sets the expiration time.
    #[must_use]
    pub const fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Checks if the token is expired (with 60 second buffer).
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|exp| Utc::now() + Duration::seconds(60) >= exp)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token() {
        let token = Token::bearer("ya29.abc");
        assert_eq!(token.access_token, "ya29.abc");
        assert_eq!(token.token_type, "Bearer");
        assert!(token.expires_at.is_none());
        assert!(!token.is_expired());
    }

    #[test]
    fn test_token_expiration_buffer() {
        let nearly_expired =
            Token::bearer("ya29.abc").with_expires_at(Utc::now() + Duration::seconds(30));
        assert!(nearly_expired.is_expired());

        let valid = Token::bearer("ya29.abc").with_expires_at(Utc::now() + Duration::seconds(3600));
        assert!(!valid.is_expired());
    }

    #[test]
    fn test_debug_redacts_access_token() {
        let token = Token::bearer("secret-value");
        let printed = format!("{token:?}");
        assert!(!printed.contains("secret-value"));
        assert!(printed.contains("Bearer"));
    }

    #[test]
    fn test_token_deserialization() {
        let json = r#"{"access_token":"abc","token_type":"Bearer"}"#;
        let token: Token = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "abc");
        assert!(token.expires_at.is_none());
    }
}
