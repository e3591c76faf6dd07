//! Classification pipeline data models.

use serde::{Serialize, Serializer};

use crate::error::ItemError;

/// Who owns a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelKind {
    /// Defined by the mailbox provider (`INBOX`, `UNREAD`, ...).
    System,
    /// Created by the user. Only these are classification targets.
    User,
}

/// A label as seen by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    /// Opaque provider ID. Identity of the label.
    pub id: String,
    /// Display name; what the oracle sees and answers with.
    pub name: String,
    /// Owner kind.
    pub kind: LabelKind,
}

impl Label {
    /// Create a user label.
    #[must_use]
    pub fn user(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: LabelKind::User,
        }
    }

    /// Create a system label.
    #[must_use]
    pub fn system(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: LabelKind::System,
        }
    }
}

impl From<inboxsort_gmail::Label> for Label {
    fn from(label: inboxsort_gmail::Label) -> Self {
        let kind = if label.is_user() {
            LabelKind::User
        } else {
            LabelKind::System
        };
        Self {
            id: label.id,
            name: label.name,
            kind,
        }
    }
}

/// The user labels visible at the start of a run, in provider order.
///
/// Built once per run and never refreshed mid-run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelCatalog {
    labels: Vec<Label>,
}

impl LabelCatalog {
    /// Keep only [`LabelKind::User`] labels, preserving order.
    #[must_use]
    pub fn from_labels(labels: impl IntoIterator<Item = Label>) -> Self {
        Self {
            labels: labels
                .into_iter()
                .filter(|l| l.kind == LabelKind::User)
                .collect(),
        }
    }

    /// Returns true if there is nothing to classify with.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Iterate labels in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    /// Label names in catalog order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.labels.iter().map(|l| l.name.as_str()).collect()
    }

    /// Case-insensitive exact lookup by name. The first label in catalog
    /// order wins when names differ only by case.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Label> {
        let wanted = name.to_lowercase();
        self.labels.iter().find(|l| l.name.to_lowercase() == wanted)
    }
}

/// Raw item content as returned by a mailbox, before excerpt bounding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemContent {
    /// Item ID.
    pub id: String,
    /// `From` header, empty if absent.
    pub from: String,
    /// `Subject` header, empty if absent.
    pub subject: String,
    /// Body text or provider snippet.
    pub body: String,
}

/// One unread message eligible for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateItem {
    /// Item ID.
    pub id: String,
    /// Sender.
    pub from: String,
    /// Subject line.
    pub subject: String,
    /// Body excerpt, at most the configured number of characters.
    pub body_excerpt: String,
}

impl CandidateItem {
    /// Build a candidate, cutting the body to `max_excerpt_chars` characters.
    #[must_use]
    pub fn from_content(content: ItemContent, max_excerpt_chars: usize) -> Self {
        let body_excerpt = if content.body.chars().count() > max_excerpt_chars {
            content.body.chars().take(max_excerpt_chars).collect()
        } else {
            content.body
        };

        Self {
            id: content.id,
            from: content.from,
            subject: content.subject,
            body_excerpt,
        }
    }
}

/// What the oracle decided for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationOutcome {
    /// A label from the catalog, with its full catalog entry.
    Selected(Label),
    /// The oracle abstained, answered outside the catalog, or failed.
    NoDecision,
}

impl ClassificationOutcome {
    /// The selected label, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<&Label> {
        match self {
            Self::Selected(label) => Some(label),
            Self::NoDecision => None,
        }
    }
}

/// Final state of one visited item.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ItemOutcome {
    /// The label was applied.
    Applied {
        /// Applied label.
        label: Label,
    },
    /// No label was selected; the item was left untouched.
    NoDecision,
    /// Processing failed; the item was skipped.
    Failed {
        /// What went wrong.
        #[serde(serialize_with = "serialize_display")]
        error: ItemError,
    },
}

impl ItemOutcome {
    /// Returns true if a label was applied.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

fn serialize_display<S: Serializer>(error: &ItemError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Per-item record of a run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemReport {
    /// Item ID.
    pub item_id: String,
    /// What happened.
    #[serde(flatten)]
    pub outcome: ItemOutcome,
}

/// Counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Items that received a label.
    pub applied_count: usize,
    /// Items visited, whatever their outcome.
    pub total_considered: usize,
}

impl RunSummary {
    /// Tally one visited item.
    pub const fn record(&mut self, outcome: &ItemOutcome) {
        self.total_considered += 1;
        if outcome.is_applied() {
            self.applied_count += 1;
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RunStatus {
    /// The user has no labels of their own; nothing was processed.
    NoCatalog,
    /// No message matched the candidate query.
    NoCandidates,
    /// Every candidate was visited.
    Completed,
}

/// Everything a run returns to its caller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// How the run ended.
    pub status: RunStatus,
    /// Human-readable status line.
    pub message: String,
    /// Counts.
    #[serde(flatten)]
    pub summary: RunSummary,
    /// Per-item records in processing order.
    pub items: Vec<ItemReport>,
}

impl RunReport {
    /// Aggregate item records into a report.
    #[must_use]
    pub fn new(status: RunStatus, items: Vec<ItemReport>) -> Self {
        let mut summary = RunSummary::default();
        for item in &items {
            summary.record(&item.outcome);
        }

        let message = match status {
            RunStatus::NoCatalog => {
                "No custom labels found to classify with. Please create some labels first."
                    .to_string()
            }
            RunStatus::NoCandidates => "No unread inbox emails to classify.".to_string(),
            RunStatus::Completed => format!(
                "Classification complete. Applied labels to {} emails.",
                summary.applied_count
            ),
        };

        Self {
            status,
            message,
            summary,
            items,
        }
    }

    /// Report for a run that stopped before visiting any item.
    #[must_use]
    pub fn empty(status: RunStatus) -> Self {
        Self::new(status, Vec::new())
    }
}
