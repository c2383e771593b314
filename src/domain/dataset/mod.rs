//! Key/value datasets.
//!
//! This module provides:
//! - `TableSource`: the uploaded dataset, as delimited text or a spreadsheet grid
//! - `Bindings`: ordered `(key, value)` rows with last-row-wins lookup
//! - RFC 4180 style record splitting for delimited text
//!
//! # Example
//!
//! ```ignore
//! let bindings = TableSource::csv("key,value\nname,Alice\nage,30").read()?;
//! assert_eq!(bindings.get("name").unwrap().render(), "Alice");
//! ```

mod delimited;
mod source;
mod types;

pub use delimited::parse_records;
pub use source::{TableSource, KEY_COLUMN, VALUE_COLUMN};
pub use types::{Binding, Bindings, DatasetError, DatasetResult, Scalar};
