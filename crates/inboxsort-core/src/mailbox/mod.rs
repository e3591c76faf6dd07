//! Mailbox provider seam.
//!
//! The orchestrator only talks to a [`Mailbox`]: an already-authenticated
//! handle onto one user's mail. [`GmailMailbox`] is the production
//! implementation; tests substitute an in-memory one.

mod gmail;

use async_trait::async_trait;

pub use gmail::GmailMailbox;

use crate::error::MailboxError;
use crate::model::{ItemContent, Label};

/// Authenticated access to one user's mailbox.
#[async_trait]
pub trait Mailbox: Send + Sync {
    /// Every label, system and user, in provider order.
    async fn list_labels(&self) -> Result<Vec<Label>, MailboxError>;

    /// IDs of items matching `query`, at most `limit`, in provider order.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, MailboxError>;

    /// Headers and body text of one item. Missing headers are empty strings.
    async fn fetch_item(&self, id: &str) -> Result<ItemContent, MailboxError>;

    /// Add `label_id` to item `id`. Adding a label already present succeeds.
    async fn add_label(&self, id: &str, label_id: &str) -> Result<(), MailboxError>;
}
