//! Key reconciliation between a document's placeholders and a dataset's keys.
//!
//! Reconciliation is diagnostic only. A partial match never blocks
//! substitution: matched keys are still filled in and unmatched
//! placeholders stay in the output as literal text.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

/// Overall match status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    /// Document and dataset reference exactly the same keys
    Ok,
    /// Some keys exist on only one side
    Warning,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Ok => "ok",
            MatchStatus::Warning => "warning",
        }
    }
}

/// Comparison of document keys against dataset keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationReport {
    pub status: MatchStatus,

    /// Keys present on both sides
    pub matched: BTreeSet<String>,

    /// Keys the document references but the dataset lacks
    pub doc_only: BTreeSet<String>,

    /// Keys the dataset defines but the document never references
    pub dataset_only: BTreeSet<String>,

    #[serde(skip)]
    doc_keys: BTreeSet<String>,

    #[serde(skip)]
    dataset_keys: BTreeSet<String>,
}

/// Classify `doc_keys` and `dataset_keys` into matched and one-sided sets
pub fn reconcile(
    doc_keys: &BTreeSet<String>,
    dataset_keys: &BTreeSet<String>,
) -> ReconciliationReport {
    let matched: BTreeSet<String> = doc_keys.intersection(dataset_keys).cloned().collect();
    let doc_only: BTreeSet<String> = doc_keys.difference(&matched).cloned().collect();
    let dataset_only: BTreeSet<String> = dataset_keys.difference(&matched).cloned().collect();

    let status = if doc_only.is_empty() && dataset_only.is_empty() {
        MatchStatus::Ok
    } else {
        MatchStatus::Warning
    };

    ReconciliationReport {
        status,
        matched,
        doc_only,
        dataset_only,
        doc_keys: doc_keys.clone(),
        dataset_keys: dataset_keys.clone(),
    }
}

impl ReconciliationReport {
    pub fn is_full_match(&self) -> bool {
        self.status == MatchStatus::Ok
    }

    pub fn doc_keys(&self) -> &BTreeSet<String> {
        &self.doc_keys
    }

    pub fn dataset_keys(&self) -> &BTreeSet<String> {
        &self.dataset_keys
    }

    /// Human-readable diagnostic lines
    pub fn messages(&self) -> Vec<String> {
        if self.is_full_match() {
            return vec![
                "Dataset keys and document placeholders match exactly.".to_string(),
            ];
        }

        let mut messages = vec![
            "Dataset keys and document placeholders do not match; matched keys will still be substituted.".to_string(),
            format!("Matched keys: {}", format_keys(&self.matched)),
        ];

        if !self.doc_only.is_empty() {
            messages.push(format!(
                "Dataset is missing these keys: {}",
                format_keys(&self.doc_only)
            ));
        }

        if !self.dataset_only.is_empty() {
            messages.push(format!(
                "Document does not reference these keys: {}",
                format_keys(&self.dataset_only)
            ));
        }

        messages
    }
}

impl fmt::Display for ReconciliationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("\n"))
    }
}

fn format_keys(keys: &BTreeSet<String>) -> String {
    let quoted: Vec<String> = keys.iter().map(|k| format!("'{}'", k)).collect();
    format!("[{}]", quoted.join(", "))
}
