//! SQL utility functions

/// Escape SQL LIKE metacharacters (%, _, \) in user input.
///
/// Patterns built from the result must be matched with `ESCAPE '\'`.
pub fn escape_like_pattern(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `%value%` pattern matching the literal value anywhere in a column
pub fn contains_pattern(value: &str) -> String {
    format!("%{}%", escape_like_pattern(value))
}
