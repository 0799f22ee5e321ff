//! Outcome and report types for tagging runs

use autotag_blocks::BlockAction;
use serde::{Serialize, Serializer};

use crate::tags::TagSet;

fn serialize_action<S: Serializer>(action: &BlockAction, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(action)
}

/// What tagging did to one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentOutcome {
    /// Where the document lives now
    pub path: String,
    /// Previous path, when title stamping renamed the document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renamed_from: Option<String>,
    /// Effect of the patch on the text
    #[serde(serialize_with = "serialize_action")]
    pub action: BlockAction,
    /// Whether the new text was written back
    pub written: bool,
    /// Tags the managed block holds after the patch
    pub tags: TagSet,
}

impl DocumentOutcome {
    pub fn is_changed(&self) -> bool {
        self.action != BlockAction::Unchanged || self.renamed_from.is_some()
    }
}

/// Result of handling one lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// The document's extension is not configured for tagging
    Skipped { path: String },
    Tagged(DocumentOutcome),
}

impl EventOutcome {
    pub fn tagged(&self) -> Option<&DocumentOutcome> {
        match self {
            Self::Tagged(outcome) => Some(outcome),
            Self::Skipped { .. } => None,
        }
    }
}

/// A document that could not be reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentError {
    pub path: String,
    pub message: String,
}

/// Options for bulk runs
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// If true, compute every patch but write nothing.
    pub dry_run: bool,
}

/// Report from a bulk run over the vault
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    /// Whether every document was reconciled without error
    pub success: bool,
    pub dry_run: bool,
    /// Documents whose text changed, or would change on a dry run
    pub changed: Vec<DocumentOutcome>,
    /// Number of documents that were already current
    pub unchanged: usize,
    /// Number of documents with an ineligible extension
    pub skipped: usize,
    /// Per-document failures; they never abort the run
    pub errors: Vec<DocumentError>,
}

impl SyncReport {
    pub fn new(options: &SyncOptions) -> Self {
        Self {
            success: true,
            dry_run: options.dry_run,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: DocumentOutcome) {
        if outcome.is_changed() {
            self.changed.push(outcome);
        } else {
            self.unchanged += 1;
        }
    }

    pub fn record_error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.success = false;
        self.errors.push(DocumentError {
            path: path.into(),
            message: message.into(),
        });
    }

    /// Whether every eligible document already matched its rules.
    pub fn is_current(&self) -> bool {
        self.success && self.changed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(action: BlockAction) -> DocumentOutcome {
        DocumentOutcome {
            path: "a.md".into(),
            renamed_from: None,
            action,
            written: false,
            tags: TagSet::new(),
        }
    }

    #[test]
    fn test_record_splits_changed_and_unchanged() {
        let mut report = SyncReport::new(&SyncOptions::default());
        report.record(outcome(BlockAction::Unchanged));
        report.record(outcome(BlockAction::Inserted));
        assert_eq!(report.unchanged, 1);
        assert_eq!(report.changed.len(), 1);
        assert!(!report.is_current());
    }

    #[test]
    fn test_error_clears_success() {
        let mut report = SyncReport::new(&SyncOptions::default());
        report.record_error("a.md", "boom");
        assert!(!report.success);
        assert!(!report.is_current());
    }

    #[test]
    fn test_action_serializes_as_label() {
        let json = serde_json::to_value(outcome(BlockAction::Replaced)).unwrap();
        assert_eq!(json["action"], "replaced");
        assert!(json.get("renamed_from").is_none());
    }
}
