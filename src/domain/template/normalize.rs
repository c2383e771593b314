//! Placeholder whitespace normalization

/// Strip whitespace adjacent to placeholder delimiters.
///
/// `{{ name }}` becomes `{{name}}`; whitespace inside the name that does not
/// touch a delimiter is kept, so `{{ first name }}` becomes `{{first name}}`.
///
/// After normalization no whitespace follows any `{{` and none precedes any
/// `}}`, including delimiters formed by removing whitespace (`a } }}` becomes
/// `a}}}`). Each side is a single linear scan.
pub fn normalize(text: &str) -> String {
    strip_after_open(&strip_before_close(text))
}

/// Walk backwards, dropping whitespace whenever the kept suffix starts with `}}`
fn strip_before_close(text: &str) -> String {
    let mut kept: Vec<char> = Vec::with_capacity(text.len());
    for c in text.chars().rev() {
        if c.is_whitespace() && kept.ends_with(&['}', '}']) {
            continue;
        }
        kept.push(c);
    }
    kept.into_iter().rev().collect()
}

/// Walk forwards, dropping whitespace whenever the kept prefix ends with `{{`
fn strip_after_open(text: &str) -> String {
    let mut kept = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_whitespace() && kept.ends_with("{{") {
            continue;
        }
        kept.push(c);
    }
    kept
}
