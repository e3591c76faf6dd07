//! Label resources.

use serde::{Deserialize, Serialize};

/// Owner of a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelType {
    /// Provider-defined label (`INBOX`, `UNREAD`, `CATEGORY_SOCIAL`, ...).
    ///
    /// Labels whose type the API omits are treated as system labels so they
    /// never become classification targets.
    #[default]
    System,
    /// Label created by the user.
    User,
}

/// A Gmail label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    /// Immutable label ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Owner type.
    #[serde(rename = "type", default)]
    pub label_type: LabelType,
    /// Visibility in the message list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_list_visibility: Option<String>,
    /// Visibility in the label list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_list_visibility: Option<String>,
}

impl Label {
    /// Returns true for labels created by the user.
    #[must_use]
    pub const fn is_user(&self) -> bool {
        matches!(self.label_type, LabelType::User)
    }
}

/// Response body of `users.labels.list`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelList {
    /// Labels in provider order. Absent when the mailbox has none.
    #[serde(default)]
    pub labels: Vec<Label>,
}
