//! Mutation applier.

use tracing::debug;

use crate::error::MailboxError;
use crate::mailbox::Mailbox;
use crate::model::{CandidateItem, Label};

/// Add `label` to `item`. Nothing is removed.
///
/// # Errors
///
/// Returns the mailbox error if the modify call fails.
pub async fn apply_label<M: Mailbox + ?Sized>(
    mailbox: &M,
    item: &CandidateItem,
    label: &Label,
) -> Result<(), MailboxError> {
    mailbox.add_label(&item.id, &label.id).await?;
    debug!(item_id = %item.id, label_id = %label.id, "Label applied");
    Ok(())
}
