//! Error types for the core library.

use thiserror::Error;

/// Run-level errors. Any of these aborts the run before or instead of
/// processing items.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The label catalog could not be read.
    #[error("Failed to fetch labels: {0}")]
    Catalog(#[source] MailboxError),

    /// The candidate query failed.
    #[error("Failed to query candidate messages: {0}")]
    Candidates(#[source] MailboxError),

    /// Gmail client could not be constructed.
    #[error("Gmail error: {0}")]
    Gmail(#[from] inboxsort_gmail::Error),

    /// Gemini client could not be constructed.
    #[error("Gemini error: {0}")]
    Gemini(#[from] inboxsort_gemini::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by a [`Mailbox`](crate::Mailbox) implementation.
#[derive(Debug, Error)]
pub enum MailboxError {
    /// Error from the Gmail API client.
    #[error(transparent)]
    Gmail(#[from] inboxsort_gmail::Error),

    /// The item or label no longer exists.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other backend failure.
    #[error("Mailbox backend error: {0}")]
    Backend(String),
}

/// Why a single item could not be processed. Never aborts the run.
#[derive(Debug, Error)]
pub enum ItemError {
    /// Reading the item's headers or body failed.
    #[error("failed to fetch message content: {0}")]
    Fetch(#[source] MailboxError),

    /// The selected label could not be applied.
    #[error("failed to apply label {label_id}: {source}")]
    Apply {
        /// Label that was selected.
        label_id: String,
        /// Underlying mailbox failure.
        #[source]
        source: MailboxError,
    },
}
