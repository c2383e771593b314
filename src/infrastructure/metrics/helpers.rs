//! Metrics helper structs for convenient metric recording

use std::time::Duration;

use prometheus::{Encoder, TextEncoder};

use super::{
    DATASETS_REJECTED_TOTAL, DATASET_ROWS, GENERATIONS_TOTAL, GENERATION_LATENCY,
    PARAGRAPHS_PER_DOCUMENT, PLACEHOLDERS_REPLACED_TOTAL, PLACEHOLDERS_UNRESOLVED_TOTAL,
    TEMPLATES_STORED,
};
use crate::domain::document::WalkStats;
use crate::domain::reconcile::MatchStatus;

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording generation metrics
pub struct GenerationMetrics;

impl GenerationMetrics {
    /// Record one generated document
    pub fn record(status: MatchStatus, stats: &WalkStats, elapsed: Duration) {
        GENERATIONS_TOTAL.with_label_values(&[status.as_str()]).inc();
        GENERATION_LATENCY.observe(elapsed.as_secs_f64());
        PARAGRAPHS_PER_DOCUMENT.observe(stats.paragraphs_visited as f64);
        PLACEHOLDERS_REPLACED_TOTAL.inc_by(stats.placeholders_replaced as u64);
        PLACEHOLDERS_UNRESOLVED_TOTAL.inc_by(stats.placeholders_unresolved as u64);
    }
}

/// Helper struct for recording dataset metrics
pub struct DatasetMetrics;

impl DatasetMetrics {
    /// Record a dataset that was read successfully
    pub fn record_rows(format: &str, rows: usize) {
        DATASET_ROWS.with_label_values(&[format]).observe(rows as f64);
    }

    /// Record a dataset that could not be read
    pub fn record_rejected(format: &str) {
        DATASETS_REJECTED_TOTAL.with_label_values(&[format]).inc();
    }
}

/// Helper struct for template store metrics
pub struct TemplateMetrics;

impl TemplateMetrics {
    /// Set the number of stored templates
    pub fn set_stored(count: usize) {
        TEMPLATES_STORED.set(count as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_includes_recorded_metrics() {
        GenerationMetrics::record(
            MatchStatus::Ok,
            &WalkStats {
                paragraphs_visited: 3,
                paragraphs_changed: 1,
                placeholders_replaced: 2,
                placeholders_unresolved: 0,
            },
            Duration::from_millis(1),
        );
        DatasetMetrics::record_rows("delimited", 4);

        let output = encode_metrics().unwrap();
        assert!(output.contains("report_generations_total"));
        assert!(output.contains("report_dataset_rows"));
    }
}
