//! SQL dialect trait for the transactional backends

/// Database-specific SQL syntax
pub trait SqlDialect: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Generate a parameter placeholder for the given index (1-based)
    ///
    /// - SQLite: Always returns "?"
    /// - PostgreSQL: Returns "$1", "$2", etc.
    fn placeholder(&self, index: usize) -> String;

    /// ASCII case-insensitive `LIKE` against an escaped ASCII pattern
    /// (backslash escape).
    ///
    /// Database case folding of non-ASCII text differs from Rust's, so rows
    /// whose column holds any character outside printable ASCII always pass.
    ///
    /// - SQLite: `(col LIKE ? ESCAPE '\' OR col GLOB '*[^ -~]*')`
    /// - PostgreSQL: `(col COLLATE "C" ILIKE $n ESCAPE '\' OR col COLLATE "C" ~ '[^ -~]')`
    fn ascii_ilike(&self, col: &str, index: usize) -> String;
}
