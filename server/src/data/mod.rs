//! Data storage layer
//!
//! - `sqlite` - Embedded transactional database (default)
//! - `postgres` - Networked transactional database
//! - `sql` - Dialect-aware SQL builders shared by both backends
//! - `seed` - Sample recipe loading
//! - `traits` - Repository trait implemented by each backend
//! - `types` - Row types shared by the backends
//! - `error` - Unified error type for all backends

pub mod error;
pub mod postgres;
pub mod seed;
pub mod sql;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use error::DataError;
pub use postgres::PostgresService;
pub use seed::{SeedError, SeedOutcome, seed_if_empty};
pub use sqlite::SqliteService;
pub use traits::TransactionalRepository;

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::core::config::{PostgresConfig, TransactionalBackend};
use crate::core::storage::AppStorage;

/// Transactional database service
///
/// Wraps the backend-specific service. Services are held in `Arc` so the
/// repository handed to request handlers is a cheap clone.
pub enum TransactionalService {
    /// SQLite backend (default, embedded)
    Sqlite(Arc<SqliteService>),
    /// PostgreSQL backend
    Postgres(Arc<PostgresService>),
}

impl TransactionalService {
    /// Initialize the configured backend.
    ///
    /// SQLite stores its file under the data directory; PostgreSQL requires a
    /// [`PostgresConfig`].
    pub async fn init(
        backend: TransactionalBackend,
        storage: &AppStorage,
        postgres_config: Option<&PostgresConfig>,
    ) -> Result<Self, DataError> {
        match backend {
            TransactionalBackend::Sqlite => {
                let service = SqliteService::init(&storage.sqlite_path()).await?;
                Ok(Self::Sqlite(Arc::new(service)))
            }
            TransactionalBackend::Postgres => {
                let config = postgres_config.ok_or_else(|| {
                    DataError::Config("PostgreSQL configuration required".to_string())
                })?;
                let service = PostgresService::init(config).await?;
                Ok(Self::Postgres(Arc::new(service)))
            }
        }
    }

    /// Migrated in-memory SQLite service
    #[cfg(test)]
    pub async fn sqlite_in_memory() -> Self {
        Self::Sqlite(Arc::new(SqliteService::in_memory().await))
    }

    pub async fn close(&self) {
        match self {
            Self::Sqlite(s) => s.close().await,
            Self::Postgres(p) => p.close().await,
        }
    }

    /// WAL checkpoints for SQLite, a connection health check for PostgreSQL
    pub fn start_maintenance_task(&self, shutdown_rx: watch::Receiver<bool>) -> JoinHandle<()> {
        match self {
            Self::Sqlite(s) => s.start_checkpoint_task(shutdown_rx),
            Self::Postgres(p) => p.start_health_check_task(shutdown_rx),
        }
    }

    pub fn backend(&self) -> TransactionalBackend {
        match self {
            Self::Sqlite(_) => TransactionalBackend::Sqlite,
            Self::Postgres(_) => TransactionalBackend::Postgres,
        }
    }

    /// Backend-agnostic repository handle
    pub fn repository(&self) -> Box<dyn TransactionalRepository> {
        match self {
            Self::Sqlite(s) => Box::new(Arc::clone(s)),
            Self::Postgres(p) => Box::new(Arc::clone(p)),
        }
    }
}
