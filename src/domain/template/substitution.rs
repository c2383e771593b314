//! Variable substitution engine for templates

use super::patterns::PLACEHOLDER;
use crate::domain::dataset::Bindings;

/// Placeholder counts from a single substitution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubstitutionCounts {
    /// Placeholder occurrences replaced with a bound value
    pub replaced: usize,
    /// Placeholder occurrences left untouched because no binding matched
    pub unresolved: usize,
}

impl std::ops::AddAssign for SubstitutionCounts {
    fn add_assign(&mut self, other: Self) {
        self.replaced += other.replaced;
        self.unresolved += other.unresolved;
    }
}

/// Replace every `{{key}}` in normalized text with its bound value.
///
/// Unbound placeholders are left as literal text.
pub fn substitute(text: &str, bindings: &Bindings) -> String {
    substitute_counted(text, bindings).0
}

/// Like [`substitute`], also reporting how many placeholders were replaced
/// and how many were left unresolved.
///
/// The text is scanned once. Inserted values are never re-scanned, so a
/// value containing `{{other}}` lands verbatim in the output.
pub fn substitute_counted(text: &str, bindings: &Bindings) -> (String, SubstitutionCounts) {
    let mut counts = SubstitutionCounts::default();

    let rendered = PLACEHOLDER.replace_all(text, |caps: &regex::Captures| {
        match bindings.get(&caps[1]) {
            Some(value) => {
                counts.replaced += 1;
                value.render().into_owned()
            }
            None => {
                counts.unresolved += 1;
                caps[0].to_string()
            }
        }
    });

    (rendered.into_owned(), counts)
}
