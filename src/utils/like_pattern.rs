//! Helpers for SQL `LIKE`/`ILIKE` substring patterns.

/// Builds a `%...%` pattern that matches `needle` literally.
///
/// `%`, `_` and the escape character `\` are escaped so user input cannot
/// act as a wildcard.
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
