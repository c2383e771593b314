//! Placeholder name extraction

use std::collections::BTreeSet;

use super::normalize::normalize;
use super::patterns::PLACEHOLDER;
use crate::domain::document::Document;

/// Collect the distinct placeholder names referenced by `text`.
///
/// Only innermost `{{...}}` spans without braces are matched, so malformed
/// or nested markers never yield a name containing a brace. Names are
/// trimmed and empty names are dropped.
pub fn extract_keys(text: &str) -> BTreeSet<String> {
    PLACEHOLDER
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Collect the placeholder names referenced anywhere in a document,
/// including paragraphs inside (nested) table cells.
pub fn extract_document_keys(document: &Document) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    document.for_each_paragraph(&mut |paragraph| {
        keys.extend(extract_keys(&normalize(&paragraph.text)));
    });
    keys
}
