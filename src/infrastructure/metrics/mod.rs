//! Prometheus metrics for the report service.
//!
//! This module provides metrics for monitoring document generation:
//! - Generation metrics (documents generated by match status, latency)
//! - Placeholder metrics (replaced and unresolved occurrences)
//! - Dataset metrics (rows per dataset, rejected datasets)
//! - Template store metrics

mod helpers;

pub use helpers::{encode_metrics, DatasetMetrics, GenerationMetrics, TemplateMetrics};

use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_histogram_vec, register_int_counter, register_int_counter_vec,
    register_int_gauge, Histogram, HistogramVec, IntCounter, IntCounterVec, IntGauge,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "report";

lazy_static! {
    // ============================================================================
    // Generation Metrics
    // ============================================================================

    /// Documents generated, by reconciliation status
    pub static ref GENERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_generations_total", METRIC_PREFIX),
        "Total documents generated",
        &["status"]
    ).unwrap();

    /// Time spent reconciling and substituting one document
    pub static ref GENERATION_LATENCY: Histogram = register_histogram!(
        format!("{}_generation_latency_seconds", METRIC_PREFIX),
        "Document generation latency in seconds",
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]
    ).unwrap();

    /// Paragraphs visited per generated document
    pub static ref PARAGRAPHS_PER_DOCUMENT: Histogram = register_histogram!(
        format!("{}_paragraphs_per_document", METRIC_PREFIX),
        "Distribution of paragraphs visited per document",
        vec![1.0, 10.0, 50.0, 100.0, 500.0, 1000.0, 5000.0]
    ).unwrap();

    // ============================================================================
    // Placeholder Metrics
    // ============================================================================

    /// Placeholder occurrences replaced with a dataset value
    pub static ref PLACEHOLDERS_REPLACED_TOTAL: IntCounter = register_int_counter!(
        format!("{}_placeholders_replaced_total", METRIC_PREFIX),
        "Total placeholder occurrences replaced"
    ).unwrap();

    /// Placeholder occurrences left untouched for lack of a matching key
    pub static ref PLACEHOLDERS_UNRESOLVED_TOTAL: IntCounter = register_int_counter!(
        format!("{}_placeholders_unresolved_total", METRIC_PREFIX),
        "Total placeholder occurrences without a matching dataset key"
    ).unwrap();

    // ============================================================================
    // Dataset Metrics
    // ============================================================================

    /// Rows per dataset, by format
    pub static ref DATASET_ROWS: HistogramVec = register_histogram_vec!(
        format!("{}_dataset_rows", METRIC_PREFIX),
        "Distribution of rows per uploaded dataset",
        &["format"],
        vec![1.0, 5.0, 10.0, 50.0, 100.0, 500.0, 1000.0]
    ).unwrap();

    /// Datasets rejected as unreadable, by format
    pub static ref DATASETS_REJECTED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_datasets_rejected_total", METRIC_PREFIX),
        "Total datasets rejected as unreadable",
        &["format"]
    ).unwrap();

    // ============================================================================
    // Template Store Metrics
    // ============================================================================

    /// Document templates currently stored
    pub static ref TEMPLATES_STORED: IntGauge = register_int_gauge!(
        format!("{}_templates_stored", METRIC_PREFIX),
        "Number of document templates in the store"
    ).unwrap();
}
