//! PostgreSQL SQL dialect implementation

use super::SqlDialect;

/// PostgreSQL SQL dialect
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    // The "C" collation keeps ILIKE from folding by the database locale
    fn ascii_ilike(&self, col: &str, index: usize) -> String {
        format!(
            "({col} COLLATE \"C\" ILIKE {} ESCAPE '\\' OR {col} COLLATE \"C\" ~ '[^ -~]')",
            self.placeholder(index)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        let dialect = PostgresDialect;
        assert_eq!(dialect.placeholder(1), "$1");
        assert_eq!(dialect.placeholder(12), "$12");
    }

    #[test]
    fn test_ascii_ilike() {
        assert_eq!(
            PostgresDialect.ascii_ilike("difficulty", 2),
            "(difficulty COLLATE \"C\" ILIKE $2 ESCAPE '\\' \
             OR difficulty COLLATE \"C\" ~ '[^ -~]')"
        );
    }
}
