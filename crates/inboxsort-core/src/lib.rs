//! # inboxsort-core
//!
//! Label classification pipeline for `InboxSort`.
//!
//! This crate provides:
//! - Domain models (labels, catalog, candidates, run reports)
//! - The [`Mailbox`] seam and its Gmail implementation
//! - The [`TextGenerator`] seam and the label oracle built on it
//! - The [`Classifier`] orchestrator
//! - Configuration loading
//!
//! ```ignore
//! use std::sync::Arc;
//! use inboxsort_core::{Classifier, Config, GmailMailbox};
//!
//! let config = Config::load()?;
//! config.validate()?;
//! let gemini = config.gemini.build_client()?;
//! let gmail = config.gmail.build_client(token)?;
//!
//! let classifier = Classifier::new(Arc::new(gemini), config.run_options());
//! let report = classifier.run(&GmailMailbox::new(gmail, config.excerpt_source)).await?;
//! println!("{}", report.message);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod applier;
pub mod candidates;
pub mod catalog;
pub mod config;
mod error;
pub mod mailbox;
pub mod model;
pub mod oracle;
mod pipeline;

pub use config::{Config, ExcerptSource, GeminiConfig, GmailConfig, MAX_ITEMS_CAP, RunOptions};
pub use error::{Error, ItemError, MailboxError, Result};
pub use mailbox::{GmailMailbox, Mailbox};
pub use model::{
    CandidateItem, ClassificationOutcome, ItemContent, ItemOutcome, ItemReport, Label,
    LabelCatalog, LabelKind, RunReport, RunStatus, RunSummary,
};
pub use oracle::{LabelOracle, OracleError, TextGenerator};
pub use pipeline::Classifier;
