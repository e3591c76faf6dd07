//! Message resources and payload helpers.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::{Deserialize, Serialize};

/// Gmail encodes part bodies as base64url, with or without padding.
const BODY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Representation requested from `users.messages.get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageFormat {
    /// Headers and snippet, no body data.
    Metadata,
    /// Full parsed MIME payload.
    #[default]
    Full,
}

impl MessageFormat {
    /// Convert to the API query parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Metadata => "metadata",
            Self::Full => "full",
        }
    }
}

/// Message reference returned by `users.messages.list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRef {
    /// Message ID.
    pub id: String,
    /// Thread ID.
    #[serde(default)]
    pub thread_id: String,
}

/// Response body of `users.messages.list`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageList {
    /// Matching messages in result order. Absent when nothing matched.
    #[serde(default)]
    pub messages: Vec<MessageRef>,
    /// Token for the next page, if any.
    #[serde(default)]
    pub next_page_token: Option<String>,
    /// Estimated total number of results.
    #[serde(default)]
    pub result_size_estimate: Option<u32>,
}

/// A message header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Header name as sent (case preserved).
    pub name: String,
    /// Header value.
    pub value: String,
}

/// Body of a MIME part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePartBody {
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// base64url-encoded data; absent for attachments and containers.
    #[serde(default)]
    pub data: Option<String>,
    /// Attachment ID when the data must be fetched separately.
    #[serde(default)]
    pub attachment_id: Option<String>,
}

/// One node of the parsed MIME tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePart {
    /// MIME type (e.g., `text/plain`, `multipart/alternative`).
    #[serde(default)]
    pub mime_type: String,
    /// Filename for attachments.
    #[serde(default)]
    pub filename: String,
    /// Part headers; the root part carries the message headers.
    #[serde(default)]
    pub headers: Vec<Header>,
    /// Part body.
    #[serde(default)]
    pub body: Option<MessagePartBody>,
    /// Child parts for multipart containers.
    #[serde(default)]
    pub parts: Vec<MessagePart>,
}

impl MessagePart {
    /// Depth-first search for the first non-attachment `text/plain` part with data.
    fn find_plain_text(&self) -> Option<&str> {
        if self.mime_type.eq_ignore_ascii_case("text/plain")
            && self.filename.is_empty()
            && let Some(data) = self.body.as_ref().and_then(|b| b.data.as_deref())
        {
            return Some(data);
        }
        self.parts.iter().find_map(Self::find_plain_text)
    }
}

/// A Gmail message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message ID.
    pub id: String,
    /// Thread ID.
    #[serde(default)]
    pub thread_id: String,
    /// Labels currently applied.
    #[serde(default)]
    pub label_ids: Vec<String>,
    /// Short provider-generated summary of the body.
    #[serde(default)]
    pub snippet: String,
    /// Parsed payload.
    #[serde(default)]
    pub payload: Option<MessagePart>,
}

impl Message {
    /// Look up a top-level header, ignoring case. Returns the first match.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.payload
            .as_ref()?
            .headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Decoded text of the first `text/plain` part, whitespace collapsed.
    ///
    /// Returns `None` when there is no such part, the data does not decode,
    /// or the decoded text is blank.
    #[must_use]
    pub fn plain_text(&self) -> Option<String> {
        let data = self.payload.as_ref()?.find_plain_text()?;
        let bytes = BODY_ENGINE.decode(data.trim()).ok()?;
        let text = String::from_utf8_lossy(&bytes);
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        (!collapsed.is_empty()).then_some(collapsed)
    }
}

/// Request body of `users.messages.modify`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyRequest<'a> {
    /// Label IDs to add.
    pub add_label_ids: &'a [String],
    /// Label IDs to remove.
    pub remove_label_ids: &'a [String],
}
