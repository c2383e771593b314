//! Report generation: one dataset, one document, one filled-in result.
//!
//! The generator ties the engine together. It reads the dataset, extracts
//! the document's placeholder names, reconciles both key sets, and walks
//! the document substituting values in place. Reconciliation never blocks
//! generation; a partial match is logged and reported.

mod stats;

use std::collections::BTreeSet;
use std::sync::atomic::Ordering;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::dataset::{Binding, Bindings, DatasetResult, TableSource};
use crate::domain::document::{walk_and_substitute, Document, WalkStats};
use crate::domain::reconcile::{reconcile, MatchStatus, ReconciliationReport};
use crate::domain::template::extract_document_keys;
use crate::metrics::{DatasetMetrics, GenerationMetrics};

pub use stats::{GeneratorStats, GeneratorStatsSnapshot};

/// Default number of characters in a document preview
pub const DEFAULT_PREVIEW_CHARS: usize = 1000;

/// What a dataset and document look like before generation
#[derive(Debug, Clone, Serialize)]
pub struct Preview {
    /// Dataset rows in upload order
    pub rows: Vec<Binding>,
    /// Leading text of the document's top-level paragraphs
    pub document_text: String,
    pub document_keys: BTreeSet<String>,
    pub dataset_keys: BTreeSet<String>,
    pub duplicate_keys: BTreeSet<String>,
    /// Dataset rows dropped for a blank key
    pub skipped_rows: Vec<usize>,
    pub report: ReconciliationReport,
    pub messages: Vec<String>,
}

/// A generated document with its diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub id: Uuid,
    pub document: Document,
    pub report: ReconciliationReport,
    pub messages: Vec<String>,
    pub stats: WalkStats,
    pub duplicate_keys: BTreeSet<String>,
    pub skipped_rows: Vec<usize>,
    pub generated_at: DateTime<Utc>,
}

/// Fills document templates from datasets
#[derive(Debug)]
pub struct ReportGenerator {
    preview_chars: usize,
    stats: GeneratorStats,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_CHARS)
    }
}

impl ReportGenerator {
    pub fn new(preview_chars: usize) -> Self {
        Self {
            preview_chars,
            stats: GeneratorStats::default(),
        }
    }

    /// Get generator statistics
    pub fn stats(&self) -> GeneratorStatsSnapshot {
        self.stats.snapshot()
    }

    /// Read a dataset, counting rejections
    pub fn read_dataset(&self, source: &TableSource) -> DatasetResult<Bindings> {
        match source.read() {
            Ok(bindings) => {
                DatasetMetrics::record_rows(source.kind(), bindings.len());
                Ok(bindings)
            }
            Err(e) => {
                self.stats.datasets_rejected.fetch_add(1, Ordering::Relaxed);
                DatasetMetrics::record_rejected(source.kind());
                tracing::warn!(format = source.kind(), error = %e, "Dataset rejected");
                Err(e)
            }
        }
    }

    /// Diagnostics for a dataset and document without generating anything
    pub fn preview(&self, source: &TableSource, document: &Document) -> DatasetResult<Preview> {
        let bindings = self.read_dataset(source)?;
        let document_keys = extract_document_keys(document);
        let dataset_keys = bindings.keys();
        let report = reconcile(&document_keys, &dataset_keys);
        let messages = diagnostic_messages(&report, &bindings);

        Ok(Preview {
            rows: bindings.rows().to_vec(),
            document_text: document.preview(self.preview_chars),
            document_keys,
            dataset_keys,
            duplicate_keys: bindings.duplicate_keys().clone(),
            skipped_rows: bindings.skipped_rows().to_vec(),
            report,
            messages,
        })
    }

    /// Read `source` and fill `document` from it
    pub fn generate_from_source(
        &self,
        source: &TableSource,
        document: Document,
    ) -> DatasetResult<GenerationOutcome> {
        let bindings = self.read_dataset(source)?;
        Ok(self.generate(&bindings, document))
    }

    /// Fill `document` from `bindings`
    pub fn generate(&self, bindings: &Bindings, mut document: Document) -> GenerationOutcome {
        let id = Uuid::new_v4();
        let started = Instant::now();

        let document_keys = extract_document_keys(&document);
        let report = reconcile(&document_keys, &bindings.keys());

        if report.status == MatchStatus::Warning {
            tracing::warn!(
                generation_id = %id,
                missing_in_dataset = ?report.doc_only,
                unreferenced = ?report.dataset_only,
                "Dataset keys and document placeholders differ"
            );
        }

        if !bindings.duplicate_keys().is_empty() {
            tracing::warn!(
                generation_id = %id,
                duplicate_keys = ?bindings.duplicate_keys(),
                "Duplicate dataset keys, last row wins"
            );
        }

        if !bindings.skipped_rows().is_empty() {
            tracing::warn!(
                generation_id = %id,
                rows = ?bindings.skipped_rows(),
                "Dataset rows without a key skipped"
            );
        }

        let stats = walk_and_substitute(&mut document, bindings);
        self.record(&report, &stats);
        GenerationMetrics::record(report.status, &stats, started.elapsed());

        tracing::info!(
            generation_id = %id,
            status = report.status.as_str(),
            paragraphs = stats.paragraphs_visited,
            replaced = stats.placeholders_replaced,
            unresolved = stats.placeholders_unresolved,
            "Document generated"
        );

        GenerationOutcome {
            id,
            document,
            messages: diagnostic_messages(&report, bindings),
            report,
            stats,
            duplicate_keys: bindings.duplicate_keys().clone(),
            skipped_rows: bindings.skipped_rows().to_vec(),
            generated_at: Utc::now(),
        }
    }

    fn record(&self, report: &ReconciliationReport, walk: &WalkStats) {
        self.stats.total_generated.fetch_add(1, Ordering::Relaxed);
        match report.status {
            MatchStatus::Ok => self.stats.full_matches.fetch_add(1, Ordering::Relaxed),
            MatchStatus::Warning => self.stats.partial_matches.fetch_add(1, Ordering::Relaxed),
        };
        self.stats
            .placeholders_replaced
            .fetch_add(walk.placeholders_replaced as u64, Ordering::Relaxed);
        self.stats
            .placeholders_unresolved
            .fetch_add(walk.placeholders_unresolved as u64, Ordering::Relaxed);
    }
}

fn diagnostic_messages(report: &ReconciliationReport, bindings: &Bindings) -> Vec<String> {
    let mut messages = report.messages();
    if !bindings.duplicate_keys().is_empty() {
        let keys: Vec<&str> = bindings.duplicate_keys().iter().map(String::as_str).collect();
        messages.push(format!(
            "Dataset repeats these keys, the last row is used: {}",
            keys.join(", ")
        ));
    }
    if !bindings.skipped_rows().is_empty() {
        let rows: Vec<String> = bindings.skipped_rows().iter().map(usize::to_string).collect();
        messages.push(format!(
            "Dataset rows without a key were skipped: {}",
            rows.join(", ")
        ));
    }
    messages
}
