//! SQLite SQL dialect implementation

use super::SqlDialect;

/// SQLite SQL dialect
pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    // LIKE folds ASCII case only
    fn ascii_ilike(&self, col: &str, index: usize) -> String {
        format!(
            "({col} LIKE {} ESCAPE '\\' OR {col} GLOB '*[^ -~]*')",
            self.placeholder(index)
        )
    }
}
