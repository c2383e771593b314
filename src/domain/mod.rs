//! Domain layer modules
//!
//! This module contains the template resolution engine:
//! - `dataset`: Key/value datasets and table sources
//! - `document`: Document text tree and its traversal
//! - `template`: Placeholder normalization, extraction, substitution and template storage
//! - `reconcile`: Document/dataset key reconciliation
//! - `generator`: End-to-end report generation

pub mod dataset;
pub mod document;
pub mod generator;
pub mod reconcile;
pub mod template;
