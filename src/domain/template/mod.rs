//! Document template engine.
//!
//! This module provides:
//! - Placeholder normalization (`{{ name }}` → `{{name}}`)
//! - Placeholder name extraction
//! - Single-pass variable substitution
//! - In-memory document template storage with CRUD operations
//!
//! # Example
//!
//! ```ignore
//! let bindings = TableSource::csv("key,value\nclient,ACME").read()?;
//!
//! let text = normalize("Prepared for {{ client }}");
//! assert!(extract_keys(&text).contains("client"));
//! assert_eq!(substitute(&text, &bindings), "Prepared for ACME");
//! ```

mod extract;
mod normalize;
mod patterns;
mod store;
mod substitution;
mod types;

pub use extract::{extract_document_keys, extract_keys};
pub use normalize::normalize;
pub use store::{create_template_store, TemplateStore, DEFAULT_MAX_TEMPLATES};
pub use substitution::{substitute, substitute_counted, SubstitutionCounts};
pub use types::{
    CreateTemplateRequest, DocumentTemplate, TemplateError, TemplateListResponse,
    TemplateResult, UpdateTemplateRequest,
};
