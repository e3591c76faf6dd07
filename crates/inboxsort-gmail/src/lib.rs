//! # inboxsort-gmail
//!
//! Async client for the subset of the Gmail REST v1 API used by `InboxSort`.
//!
//! ## Features
//!
//! - **Labels**: list every label with its owner type
//! - **Messages**: search with Gmail query syntax, fetch, and modify labels
//! - **Search queries**: typed builder for `in:`, `is:` and `category:` terms
//! - **Body excerpts**: header lookup and `text/plain` extraction from MIME payloads
//!
//! Authentication is out of scope: the client is handed an already-issued
//! `OAuth2` bearer [`Token`] and refuses to send requests once it has expired.
//!
//! ## Quick Start
//!
//! ```ignore
//! use inboxsort_gmail::{GmailClient, MessageFormat, SearchQuery, Token};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GmailClient::new(Token::bearer("ya29..."))?;
//!
//!     let labels = client.list_labels().await?;
//!     let query = SearchQuery::unread_primary_inbox();
//!     for msg in client.list_messages(&query.to_string(), 20).await? {
//!         let message = client.get_message(&msg.id, MessageFormat::Full).await?;
//!         println!("{}: {}", message.header("From").unwrap_or_default(), message.snippet);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod auth;
mod client;
mod error;
pub mod query;
pub mod types;

pub use auth::Token;
pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, GmailClient};
pub use error::{Error, Result};
pub use query::{Category, SearchQuery};
pub use types::{Header, Label, LabelType, Message, MessageFormat, MessagePart, MessageRef};
