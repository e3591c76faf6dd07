//! [`Mailbox`] over the Gmail REST API.

use async_trait::async_trait;
use inboxsort_gmail::{GmailClient, Message, MessageFormat};

use super::Mailbox;
use crate::config::ExcerptSource;
use crate::error::MailboxError;
use crate::model::{ItemContent, Label};

/// Gmail-backed mailbox.
#[derive(Debug, Clone)]
pub struct GmailMailbox {
    client: GmailClient,
    excerpt_source: ExcerptSource,
}

impl GmailMailbox {
    /// Wrap a client.
    #[must_use]
    pub const fn new(client: GmailClient, excerpt_source: ExcerptSource) -> Self {
        Self {
            client,
            excerpt_source,
        }
    }

    const fn message_format(&self) -> MessageFormat {
        match self.excerpt_source {
            ExcerptSource::Snippet => MessageFormat::Metadata,
            ExcerptSource::PlainText => MessageFormat::Full,
        }
    }
}

/// Extract classification content from a fetched message.
fn item_content(message: Message, source: ExcerptSource) -> ItemContent {
    let from = message.header("From").unwrap_or_default().to_string();
    let subject = message.header("Subject").unwrap_or_default().to_string();
    let body = match source {
        ExcerptSource::Snippet => None,
        ExcerptSource::PlainText => message.plain_text(),
    }
    .unwrap_or_else(|| message.snippet.clone());

    ItemContent {
        id: message.id,
        from,
        subject,
        body,
    }
}

fn map_error(id: &str, err: inboxsort_gmail::Error) -> MailboxError {
    if err.is_not_found() {
        MailboxError::NotFound(id.to_string())
    } else {
        err.into()
    }
}

#[async_trait]
impl Mailbox for GmailMailbox {
    async fn list_labels(&self) -> Result<Vec<Label>, MailboxError> {
        let labels = self.client.list_labels().await?;
        Ok(labels.into_iter().map(Label::from).collect())
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, MailboxError> {
        let max_results = u32::try_from(limit).unwrap_or(u32::MAX);
        let refs = self.client.list_messages(query, max_results).await?;
        Ok(refs.into_iter().take(limit).map(|r| r.id).collect())
    }

    async fn fetch_item(&self, id: &str) -> Result<ItemContent, MailboxError> {
        let message = self
            .client
            .get_message(id, self.message_format())
            .await
            .map_err(|e| map_error(id, e))?;
        Ok(item_content(message, self.excerpt_source))
    }

    async fn add_label(&self, id: &str, label_id: &str) -> Result<(), MailboxError> {
        self.client
            .modify_message(id, &[label_id.to_string()], &[])
            .await
            .map_err(|e| map_error(id, e))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn message(json: serde_json::Value) -> Message {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_item_content_from_metadata() {
        let msg = message(serde_json::json!({
            "id": "m1",
            "snippet": "Your flight to Lisbon is confirmed",
            "payload": {
                "headers": [
                    {"name": "From", "value": "TAP <noreply@flytap.com>"},
                    {"name": "Subject", "value": "Booking confirmation"}
                ]
            }
        }));

        let content = item_content(msg, ExcerptSource::Snippet);
        assert_eq!(content.id, "m1");
        assert_eq!(content.from, "TAP <noreply@flytap.com>");
        assert_eq!(content.subject, "Booking confirmation");
        assert_eq!(content.body, "Your flight to Lisbon is confirmed");
    }

    #[test]
    fn test_missing_headers_are_empty() {
        let msg = message(serde_json::json!({"id": "m2", "snippet": "hello"}));

        let content = item_content(msg, ExcerptSource::Snippet);
        assert_eq!(content.from, "");
        assert_eq!(content.subject, "");
        assert_eq!(content.body, "hello");
    }

    #[test]
    fn test_plain_text_falls_back_to_snippet() {
        let msg = message(serde_json::json!({
            "id": "m3",
            "snippet": "snippet text",
            "payload": {"mimeType": "text/html", "body": {"size": 4, "data": "PGI-"}}
        }));

        let content = item_content(msg, ExcerptSource::PlainText);
        assert_eq!(content.body, "snippet text");
    }

    #[test]
    fn test_plain_text_preferred_when_present() {
        // "Full body text" in base64url
        let msg = message(serde_json::json!({
            "id": "m4",
            "snippet": "Full body…",
            "payload": {"mimeType": "text/plain", "body": {"size": 14, "data": "RnVsbCBib2R5IHRleHQ"}}
        }));

        let content = item_content(msg, ExcerptSource::PlainText);
        assert_eq!(content.body, "Full body text");
    }

    #[test]
    fn test_not_found_mapping() {
        let err = inboxsort_gmail::Error::Api {
            code: 404,
            status: "NOT_FOUND".into(),
            message: "Requested entity was not found.".into(),
        };
        assert!(matches!(map_error("m9", err), MailboxError::NotFound(id) if id == "m9"));

        let err = inboxsort_gmail::Error::TokenExpired;
        assert!(matches!(map_error("m9", err), MailboxError::Gmail(_)));
    }
}
