//! Placeholder regex patterns shared by the extractor and substitution engine

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A `{{name}}` placeholder whose name contains no braces
    pub(super) static ref PLACEHOLDER: Regex = Regex::new(r"\{\{([^{}]+)\}\}").unwrap();
}
