//! Mailbox query accessor.
//!
//! Candidate selection is two reads: one search for IDs, then one content
//! fetch per ID. The second happens lazily, per item, so that a single
//! unreadable message does not sink the whole run.

use std::collections::HashSet;

use tracing::debug;

use crate::error::MailboxError;
use crate::mailbox::Mailbox;
use crate::model::CandidateItem;

/// IDs of items matching `query`, deduplicated, in provider order, at most
/// `max_items`.
///
/// # Errors
///
/// Returns the mailbox error if the search fails.
pub async fn query_candidates<M: Mailbox + ?Sized>(
    mailbox: &M,
    query: &str,
    max_items: usize,
) -> Result<Vec<String>, MailboxError> {
    let ids = mailbox.search(query, max_items).await?;
    let returned = ids.len();

    let mut seen = HashSet::new();
    let ids: Vec<String> = ids
        .into_iter()
        .filter(|id| seen.insert(id.clone()))
        .take(max_items)
        .collect();

    debug!(query, returned, kept = ids.len(), "Queried candidates");
    Ok(ids)
}

/// Fetch one item and bound its body excerpt.
///
/// # Errors
///
/// Returns the mailbox error if the item cannot be read.
pub async fn fetch_candidate<M: Mailbox + ?Sized>(
    mailbox: &M,
    id: &str,
    excerpt_chars: usize,
) -> Result<CandidateItem, MailboxError> {
    let content = mailbox.fetch_item(id).await?;
    Ok(CandidateItem::from_content(content, excerpt_chars))
}
