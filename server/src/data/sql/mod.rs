//! SQL abstraction layer for the transactional backends
//!
//! Dynamic queries are assembled once with a [`SqlDialect`] and bound in order
//! from [`SqlParams`].

mod dialect;
mod postgres_dialect;
mod recipe_query;
mod sqlite_dialect;

pub use dialect::SqlDialect;
pub use postgres_dialect::PostgresDialect;
pub use recipe_query::{RECIPE_COLUMNS, build_prefilter_query};
pub use sqlite_dialect::SqliteDialect;

/// Database backend identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    Postgres,
}

impl Backend {
    /// Get the SQL dialect for this backend
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Backend::Sqlite => &SqliteDialect,
            Backend::Postgres => &PostgresDialect,
        }
    }

    pub fn name(&self) -> &'static str {
        self.dialect().name()
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A value bound to a dynamic query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Int(i64),
    Text(String),
}

/// Positional parameters collected while building a query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlParams {
    pub values: Vec<SqlValue>,
}

impl SqlParams {
    /// Append a value and return its 1-based position
    pub fn push(&mut self, value: SqlValue) -> usize {
        self.values.push(value);
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_positions_are_one_based() {
        let mut params = SqlParams::default();
        assert!(params.is_empty());
        assert_eq!(params.push(SqlValue::Int(5)), 1);
        assert_eq!(params.push(SqlValue::Text("x".into())), 2);
        assert_eq!(params.values.len(), 2);
    }

    #[test]
    fn test_backend_dialects() {
        assert_eq!(Backend::Sqlite.name(), "sqlite");
        assert_eq!(Backend::Postgres.to_string(), "postgres");
        assert_eq!(Backend::Postgres.dialect().placeholder(3), "$3");
    }
}
