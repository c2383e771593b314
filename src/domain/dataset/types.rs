//! Dataset types and error definitions

use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dataset-specific error type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatasetError {
    #[error("Dataset is empty")]
    Empty,

    #[error("Dataset is missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("Row {row} has a non-scalar value in column '{column}'")]
    NonScalarCell { row: usize, column: String },

    #[error("Unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },

    #[error("Invalid delimiter: {0:?}")]
    InvalidDelimiter(char),
}

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

/// A single dataset cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    Null,
}

impl Scalar {
    /// Text form used when the value is substituted into a document
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Scalar::Text(s) => Cow::Borrowed(s),
            Scalar::Number(n) => Cow::Owned(n.to_string()),
            Scalar::Bool(b) => Cow::Owned(b.to_string()),
            Scalar::Null => Cow::Borrowed(""),
        }
    }

    /// Convert a JSON cell, rejecting arrays and objects
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Scalar::Text(s)),
            serde_json::Value::Number(n) => Some(Scalar::Number(n)),
            serde_json::Value::Bool(b) => Some(Scalar::Bool(b)),
            serde_json::Value::Null => Some(Scalar::Null),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(Scalar::Number)
            .unwrap_or(Scalar::Null)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// One dataset row: a key and the value substituted for `{{key}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub key: String,
    pub value: Scalar,
}

impl Binding {
    pub fn new(key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Ordered dataset rows with key lookup.
///
/// Rows keep their dataset order. When a key appears on more than one row
/// the last row wins; such keys are recorded in [`Bindings::duplicate_keys`].
/// Rows dropped for a blank key are listed in [`Bindings::skipped_rows`].
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    rows: Vec<Binding>,
    index: HashMap<String, usize>,
    duplicates: BTreeSet<String>,
    skipped: Vec<usize>,
}

impl Bindings {
    pub fn from_rows(rows: Vec<Binding>) -> Self {
        let mut index = HashMap::with_capacity(rows.len());
        let mut duplicates = BTreeSet::new();

        for (position, row) in rows.iter().enumerate() {
            if index.insert(row.key.clone(), position).is_some() {
                duplicates.insert(row.key.clone());
            }
        }

        Self {
            rows,
            index,
            duplicates,
            skipped: Vec::new(),
        }
    }

    /// Record 1-based dataset rows that were dropped while reading
    pub fn with_skipped_rows(mut self, rows: Vec<usize>) -> Self {
        self.skipped = rows;
        self
    }

    /// Value bound to `key`, taken from the last row carrying it
    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.index.get(key).map(|&position| &self.rows[position].value)
    }

    /// Distinct keys of the dataset
    pub fn keys(&self) -> BTreeSet<String> {
        self.index.keys().cloned().collect()
    }

    /// Keys that appear on more than one row
    pub fn duplicate_keys(&self) -> &BTreeSet<String> {
        &self.duplicates
    }

    /// 1-based row numbers (header included) skipped for a blank key
    pub fn skipped_rows(&self) -> &[usize] {
        &self.skipped
    }

    /// Rows in dataset order, duplicates included
    pub fn rows(&self) -> &[Binding] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<Binding> for Bindings {
    fn from_iter<I: IntoIterator<Item = Binding>>(iter: I) -> Self {
        Self::from_rows(iter.into_iter().collect())
    }
}
