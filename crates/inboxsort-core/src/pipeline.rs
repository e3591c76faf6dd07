//! Run orchestration.
//!
//! One run walks a fixed sequence of states:
//!
//! ```text
//! FETCH_CATALOG -> (empty -> DONE) -> FETCH_CANDIDATES -> (empty -> DONE)
//!               -> PROCESS_ITEMS[0..n) -> DONE
//! ```
//!
//! Only the two fetches can fail the run. Everything that goes wrong while
//! processing an item is recorded in that item's [`ItemReport`].

use std::sync::Arc;

use tracing::{info, warn};

use crate::applier::apply_label;
use crate::candidates::{fetch_candidate, query_candidates};
use crate::catalog::fetch_catalog;
use crate::config::{MAX_ITEMS_CAP, RunOptions};
use crate::error::{Error, ItemError, Result};
use crate::mailbox::Mailbox;
use crate::model::{
    ClassificationOutcome, ItemOutcome, ItemReport, LabelCatalog, RunReport, RunStatus,
};
use crate::oracle::{LabelOracle, TextGenerator};

/// Classifies unread inbox items into the user's own labels.
#[derive(Debug, Clone)]
pub struct Classifier {
    oracle: LabelOracle,
    options: RunOptions,
}

impl Classifier {
    /// Create a classifier around a text generator.
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>, options: RunOptions) -> Self {
        Self {
            oracle: LabelOracle::new(generator, options.oracle_timeout),
            options,
        }
    }

    /// Run one classification pass over `mailbox`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Catalog`] or [`Error::Candidates`] if the label list
    /// or the candidate search cannot be read. Item-level failures are
    /// reported in the returned [`RunReport`].
    pub async fn run<M: Mailbox + ?Sized>(&self, mailbox: &M) -> Result<RunReport> {
        let catalog = fetch_catalog(mailbox).await.map_err(Error::Catalog)?;
        if catalog.is_empty() {
            info!("No user labels, nothing to classify");
            return Ok(RunReport::empty(RunStatus::NoCatalog));
        }

        let max_items = self.options.max_items.min(MAX_ITEMS_CAP);
        let ids = query_candidates(mailbox, &self.options.query, max_items)
            .await
            .map_err(Error::Candidates)?;
        if ids.is_empty() {
            info!("No candidate messages");
            return Ok(RunReport::empty(RunStatus::NoCandidates));
        }

        info!(
            labels = catalog.len(),
            candidates = ids.len(),
            "Starting classification"
        );

        let mut items = Vec::with_capacity(ids.len());
        for id in ids {
            let outcome = self.process_item(mailbox, &id, &catalog).await;
            if let ItemOutcome::Failed { error } = &outcome {
                warn!(item_id = %id, error = %error, "Skipping item");
            }
            items.push(ItemReport {
                item_id: id,
                outcome,
            });
        }

        let report = RunReport::new(RunStatus::Completed, items);
        info!(
            applied = report.summary.applied_count,
            considered = report.summary.total_considered,
            "Classification complete"
        );
        Ok(report)
    }

    async fn process_item<M: Mailbox + ?Sized>(
        &self,
        mailbox: &M,
        id: &str,
        catalog: &LabelCatalog,
    ) -> ItemOutcome {
        let item = match fetch_candidate(mailbox, id, self.options.excerpt_chars).await {
            Ok(item) => item,
            Err(e) => {
                return ItemOutcome::Failed {
                    error: ItemError::Fetch(e),
                };
            }
        };

        let label = match self.oracle.classify(&item, catalog).await {
            ClassificationOutcome::Selected(label) => label,
            ClassificationOutcome::NoDecision => return ItemOutcome::NoDecision,
        };

        match apply_label(mailbox, &item, &label).await {
            Ok(()) => {
                info!(item_id = %id, label = %label.name, "Applied label");
                ItemOutcome::Applied { label }
            }
            Err(source) => ItemOutcome::Failed {
                error: ItemError::Apply {
                    label_id: label.id,
                    source,
                },
            },
        }
    }
}
