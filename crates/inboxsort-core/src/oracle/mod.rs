//! Classification oracle adapter.
//!
//! Turns one [`CandidateItem`] and the run's [`LabelCatalog`] into a
//! [`ClassificationOutcome`]. The text model behind it is any
//! [`TextGenerator`]; failures of that model never escape this module.

mod prompt;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::model::{CandidateItem, ClassificationOutcome, LabelCatalog};

/// Errors a [`TextGenerator`] may report.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// Gemini API failure.
    #[error(transparent)]
    Gemini(#[from] inboxsort_gemini::Error),

    /// Any other generator failure.
    #[error("Text generation failed: {0}")]
    Unavailable(String),
}

/// Free-form text in, free-form text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt`.
    async fn generate_text(&self, prompt: &str) -> Result<String, OracleError>;
}

#[async_trait]
impl TextGenerator for inboxsort_gemini::GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, OracleError> {
        Ok(Self::generate_text(self, prompt).await?)
    }
}

/// Picks one label per item from the catalog.
#[derive(Clone)]
pub struct LabelOracle {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl std::fmt::Debug for LabelOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelOracle")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl LabelOracle {
    /// Create an adapter over `generator`. Each call is abandoned after `timeout`.
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    /// Classify one item.
    ///
    /// Returns [`ClassificationOutcome::NoDecision`] when the item has no
    /// body text, the generator fails or times out, or the answer does not
    /// name a catalog label.
    pub async fn classify(
        &self,
        item: &CandidateItem,
        catalog: &LabelCatalog,
    ) -> ClassificationOutcome {
        if catalog.is_empty() {
            return ClassificationOutcome::NoDecision;
        }
        if item.body_excerpt.trim().is_empty() {
            debug!(item_id = %item.id, "Empty body, skipping oracle");
            return ClassificationOutcome::NoDecision;
        }

        let prompt = prompt::build(item, catalog);
        debug!(item_id = %item.id, labels = catalog.len(), "Asking oracle for a label");

        let answer = match tokio::time::timeout(self.timeout, self.generator.generate_text(&prompt))
            .await
        {
            Ok(Ok(answer)) => answer,
            Ok(Err(e)) => {
                warn!(item_id = %item.id, error = %e, "Oracle call failed");
                return ClassificationOutcome::NoDecision;
            }
            Err(_) => {
                warn!(item_id = %item.id, timeout = ?self.timeout, "Oracle call timed out");
                return ClassificationOutcome::NoDecision;
            }
        };

        let outcome = match_answer(&answer, catalog);
        match &outcome {
            ClassificationOutcome::Selected(label) => {
                debug!(item_id = %item.id, label_id = %label.id, label = %label.name, "Oracle selected label");
            }
            ClassificationOutcome::NoDecision => {
                debug!(item_id = %item.id, answer = %answer.trim(), "Oracle answer matched no label");
            }
        }
        outcome
    }
}

/// Match a raw oracle answer against the catalog.
///
/// Surrounding whitespace is ignored and names compare case-insensitively;
/// anything else must match exactly.
#[must_use]
pub fn match_answer(answer: &str, catalog: &LabelCatalog) -> ClassificationOutcome {
    let answer = answer.trim();
    if answer.is_empty() {
        return ClassificationOutcome::NoDecision;
    }
    catalog
        .find_by_name(answer)
        .cloned()
        .map_or(ClassificationOutcome::NoDecision, ClassificationOutcome::Selected)
}
