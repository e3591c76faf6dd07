//! HTTP client for the Gmail REST v1 API.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::Token;
use crate::error::{Error, Result, api_error};
use crate::types::{Label, LabelList, Message, MessageFormat, MessageList, MessageRef, ModifyRequest};

/// Base URL for the authenticated user's mailbox.
pub const DEFAULT_BASE_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me/";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Gmail's hard limit for `maxResults` on `users.messages.list`.
const MAX_RESULTS_LIMIT: u32 = 500;

/// Client bound to one user's mailbox and bearer token.
#[derive(Debug, Clone)]
pub struct GmailClient {
    base_url: Url,
    token: Token,
    http_client: reqwest::Client,
}

impl GmailClient {
    /// Creates a client with the default endpoint and timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(token: Token) -> Result<Self> {
        Self::with_timeout(token, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the
    /// token is empty.
    pub fn with_timeout(token: Token, timeout: Duration) -> Result<Self> {
        if token.access_token.trim().is_empty() {
            return Err(Error::InvalidConfig("access token is empty".to_string()));
        }

        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: Url::parse(DEFAULT_BASE_URL)?,
            token,
            http_client,
        })
    }

    /// Overrides the API base URL (for proxies and test servers).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Result<Self> {
        let mut raw = base_url.as_ref().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        self.base_url = Url::parse(&raw)?;
        Ok(self)
    }

    /// Returns the configured base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Lists every label in the mailbox, system and user alike.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_labels(&self) -> Result<Vec<Label>> {
        let list: LabelList = Self::send_json(self.request(Method::GET, &["labels"])?).await?;
        debug!(count = list.labels.len(), "Listed labels");
        Ok(list.labels)
    }

    /// Searches messages with a Gmail query, returning at most `max_results`
    /// references in the order the API returns them.
    ///
    /// Only the first page is read.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_messages(&self, query: &str, max_results: u32) -> Result<Vec<MessageRef>> {
        let max_results = max_results.clamp(1, MAX_RESULTS_LIMIT).to_string();
        let request = self
            .request(Method::GET, &["messages"])?
            .query(&[("q", query), ("maxResults", max_results.as_str())]);
        let list: MessageList = Self::send_json(request).await?;
        debug!(
            query,
            count = list.messages.len(),
            estimate = ?list.result_size_estimate,
            "Listed messages"
        );
        Ok(list.messages)
    }

    /// Fetches one message in the requested representation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidId`] for an empty, `.` or `..` ID, or an error
    /// if the request fails.
    pub async fn get_message(&self, id: &str, format: MessageFormat) -> Result<Message> {
        let request = self
            .request(Method::GET, &["messages", message_id(id)?])?
            .query(&[("format", format.as_str())]);
        Self::send_json(request).await
    }

    /// Adds and removes labels on one message.
    ///
    /// Adding a label the message already carries is a no-op on the server.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidId`] for an empty, `.` or `..` ID, or an error
    /// if the request fails.
    pub async fn modify_message(
        &self,
        id: &str,
        add_label_ids: &[String],
        remove_label_ids: &[String],
    ) -> Result<Message> {
        let request = self
            .request(Method::POST, &["messages", message_id(id)?, "modify"])?
            .json(&ModifyRequest {
                add_label_ids,
                remove_label_ids,
            });
        let message: Message = Self::send_json(request).await?;
        debug!(id, added = ?add_label_ids, removed = ?remove_label_ids, "Modified message");
        Ok(message)
    }

    /// Builds an authenticated request against path segments under the
    /// base URL. Each segment is percent-encoded on its own.
    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        if self.token.is_expired() {
            return Err(Error::TokenExpired);
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                Error::InvalidConfig(format!("base URL cannot hold a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(self
            .http_client
            .request(method, url)
            .bearer_auth(&self.token.access_token))
    }

    /// Sends a request and maps non-success statuses to [`Error::Api`].
    async fn send(request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(api_error(status.as_u16(), status.canonical_reason(), &body))
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        let response = Self::send(request).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Into::into)
    }
}

/// Rejects IDs that would vanish or climb when used as a path segment.
fn message_id(id: &str) -> Result<&str> {
    match id {
        "" | "." | ".." => Err(Error::InvalidId(id.to_string())),
        _ => Ok(id),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration as ChronoDuration, Utc};

    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GmailClient::new(Token::bearer("ya29.test")).unwrap();
        assert_eq!(client.base_url().as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_empty_token_rejected() {
        let err = GmailClient::new(Token::bearer("  ")).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = GmailClient::new(Token::bearer("ya29.test"))
            .unwrap()
            .with_base_url("http://127.0.0.1:9000/gmail/v1/users/me")
            .unwrap();
        let request = client
            .request(Method::GET, &["messages", "abc", "modify"])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://127.0.0.1:9000/gmail/v1/users/me/messages/abc/modify"
        );
        assert_eq!(
            request.headers()["authorization"].to_str().unwrap(),
            "Bearer ya29.test"
        );
    }

    #[test]
    fn test_expired_token_never_reaches_network() {
        let token =
            Token::bearer("ya29.test").with_expires_at(Utc::now() - ChronoDuration::seconds(5));
        let client = GmailClient::new(token)
            .unwrap()
            .with_base_url("http://127.0.0.1:1/")
            .unwrap();

        let err = tokio_test::block_on(client.list_labels()).unwrap_err();
        assert!(matches!(err, Error::TokenExpired));
    }

    #[test]
    fn test_message_id_is_one_encoded_segment() {
        let client = GmailClient::new(Token::bearer("ya29.test")).unwrap();
        let request = client
            .request(Method::POST, &["messages", "a/../b?c#d", "modify"])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://gmail.googleapis.com/gmail/v1/users/me/messages/a%2F..%2Fb%3Fc%23d/modify"
        );
        assert_eq!(request.url().query(), None);
    }

    #[test]
    fn test_dot_message_ids_rejected_before_sending() {
        let client = GmailClient::new(Token::bearer("ya29.test"))
            .unwrap()
            .with_base_url("http://127.0.0.1:1/")
            .unwrap();

        for id in ["", ".", ".."] {
            let err = tokio_test::block_on(client.get_message(id, MessageFormat::Metadata))
                .unwrap_err();
            assert!(matches!(err, Error::InvalidId(ref bad) if bad == id), "id {id:?}");

            let err = tokio_test::block_on(client.modify_message(id, &["L1".to_string()], &[]))
                .unwrap_err();
            assert!(matches!(err, Error::InvalidId(_)), "id {id:?}");
        }
    }

    #[test]
    fn test_list_messages_query_parameters() {
        let client = GmailClient::new(Token::bearer("ya29.test")).unwrap();
        let request = client
            .request(Method::GET, &["messages"])
            .unwrap()
            .query(&[("q", "is:unread"), ("maxResults", "20")])
            .build()
            .unwrap();
        assert_eq!(request.url().query(), Some("q=is%3Aunread&maxResults=20"));
    }
}
