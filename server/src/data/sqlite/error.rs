//! SQLite error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SqliteError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration {version} ({name}) failed: {error}")]
    MigrationFailed {
        version: i32,
        name: String,
        error: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Map a UNIQUE violation to [`SqliteError::Conflict`]
pub(crate) fn conflict_on_unique(e: sqlx::Error, what: &str) -> SqliteError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            SqliteError::Conflict(format!("{} already exists", what))
        }
        _ => SqliteError::Database(e),
    }
}
