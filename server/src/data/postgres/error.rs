//! PostgreSQL error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostgresError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration {version} ({name}) failed: {error}")]
    MigrationFailed {
        version: i32,
        name: String,
        error: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Map a unique_violation (23505) to [`PostgresError::Conflict`]
pub(crate) fn conflict_on_unique(e: sqlx::Error, what: &str) -> PostgresError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            PostgresError::Conflict(format!("{} already exists", what))
        }
        _ => PostgresError::Database(e),
    }
}
