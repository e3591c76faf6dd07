//! Label catalog accessor.

use tracing::debug;

use crate::error::MailboxError;
use crate::mailbox::Mailbox;
use crate::model::LabelCatalog;

/// Read every label and keep the user-created ones, in provider order.
///
/// # Errors
///
/// Returns the mailbox error if the label list cannot be read.
pub async fn fetch_catalog<M: Mailbox + ?Sized>(mailbox: &M) -> Result<LabelCatalog, MailboxError> {
    let labels = mailbox.list_labels().await?;
    let total = labels.len();
    let catalog = LabelCatalog::from_labels(labels);
    debug!(total, user = catalog.len(), "Fetched label catalog");
    Ok(catalog)
}
