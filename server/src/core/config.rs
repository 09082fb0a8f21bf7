use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_HOST, DEFAULT_JWT_SECRET, DEFAULT_PORT,
    DEFAULT_TOKEN_TTL_HOURS, POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS,
    POSTGRES_DEFAULT_MAX_CONNECTIONS, POSTGRES_DEFAULT_MIN_CONNECTIONS,
    POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS,
};

// =============================================================================
// Transactional Backend Enum (SQLite or PostgreSQL)
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionalBackend {
    #[default]
    Sqlite,
    Postgres,
}

impl fmt::Display for TransactionalBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionalBackend::Sqlite => write!(f, "sqlite"),
            TransactionalBackend::Postgres => write!(f, "postgres"),
        }
    }
}

// =============================================================================
// File Config Structs (JSON deserialization)
// =============================================================================

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct AuthFileConfig {
    pub jwt_secret: Option<String>,
    pub token_ttl_hours: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct PostgresFileConfig {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub statement_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct DatabaseFileConfig {
    /// sqlite (default) or postgres
    pub transactional: Option<TransactionalBackend>,
    pub postgres: Option<PostgresFileConfig>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct SeedFileConfig {
    pub file: Option<PathBuf>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub auth: Option<AuthFileConfig>,
    pub database: Option<DatabaseFileConfig>,
    pub seed: Option<SeedFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

/// Overwrite `target` when `value` is set
fn take<T: fmt::Debug>(target: &mut Option<T>, value: Option<T>, key: &str) {
    if value.is_some() {
        tracing::trace!(key, value = ?value, "Merging config value");
        *target = value;
    }
}

impl FileConfig {
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.warn_unknown_fields();
        Ok(config)
    }

    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys: Vec<&str> = map.keys().map(|k| k.as_str()).collect();
            tracing::warn!(
                fields = %keys.join(", "),
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(server) = other.server {
            let current = self.server.get_or_insert_with(Default::default);
            take(&mut current.host, server.host, "server.host");
            take(&mut current.port, server.port, "server.port");
        }

        if let Some(auth) = other.auth {
            let current = self.auth.get_or_insert_with(Default::default);
            // Value deliberately not logged
            if auth.jwt_secret.is_some() {
                current.jwt_secret = auth.jwt_secret;
            }
            take(
                &mut current.token_ttl_hours,
                auth.token_ttl_hours,
                "auth.token_ttl_hours",
            );
        }

        if let Some(database) = other.database {
            let current = self.database.get_or_insert_with(Default::default);
            take(
                &mut current.transactional,
                database.transactional,
                "database.transactional",
            );
            if let Some(pg) = database.postgres {
                let current_pg = current.postgres.get_or_insert_with(Default::default);
                if pg.url.is_some() {
                    current_pg.url = pg.url;
                }
                take(
                    &mut current_pg.max_connections,
                    pg.max_connections,
                    "database.postgres.max_connections",
                );
                take(
                    &mut current_pg.min_connections,
                    pg.min_connections,
                    "database.postgres.min_connections",
                );
                take(
                    &mut current_pg.acquire_timeout_secs,
                    pg.acquire_timeout_secs,
                    "database.postgres.acquire_timeout_secs",
                );
                take(
                    &mut current_pg.statement_timeout_secs,
                    pg.statement_timeout_secs,
                    "database.postgres.statement_timeout_secs",
                );
            }
        }

        if let Some(seed) = other.seed {
            let current = self.seed.get_or_insert_with(Default::default);
            take(&mut current.file, seed.file, "seed.file");
        }
    }
}

// =============================================================================
// Runtime Config Structs (final merged configuration)
// =============================================================================

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: u64,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .finish()
    }
}

impl AuthConfig {
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

/// PostgreSQL pool settings; zero values fall back to built-in defaults
#[derive(Debug, Clone, Default)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub statement_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub transactional: TransactionalBackend,
    /// Only set when `transactional` is postgres
    pub postgres: Option<PostgresConfig>,
}

/// Final merged application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub database: DatabaseConfig,
    /// Seed recipe file; `None` uses the bundled sample set
    pub seed_file: Option<PathBuf>,
}

fn is_postgres_url(url: &str) -> bool {
    url.starts_with("postgres")
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.recipebox/recipebox.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            file_config.merge(FileConfig::load_from_file(&profile_path)?);
            found_configs.push(profile_path.display().to_string());
        }

        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            local.exists().then_some(local)
        };

        if let Some(path) = overlay_path {
            file_config.merge(FileConfig::load_from_file(&path)?);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");
        Self::from_sources(file_config, cli)
    }

    /// Layer CLI/env values over file values over defaults, then validate
    pub fn from_sources(file_config: FileConfig, cli: &CliConfig) -> Result<Self> {
        let file_server = file_config.server.unwrap_or_default();
        let file_auth = file_config.auth.unwrap_or_default();
        let file_database = file_config.database.unwrap_or_default();
        let file_postgres = file_database.postgres.unwrap_or_default();
        let file_seed = file_config.seed.unwrap_or_default();

        let host = cli
            .host
            .clone()
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT);

        let jwt_secret = cli
            .jwt_secret
            .clone()
            .or(file_auth.jwt_secret)
            .unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string());
        let token_ttl_hours = cli
            .token_ttl_hours
            .or(file_auth.token_ttl_hours)
            .unwrap_or(DEFAULT_TOKEN_TTL_HOURS);

        // A postgres DATABASE_URL both selects the backend and supplies the URL
        let env_postgres_url = cli
            .database_url
            .clone()
            .filter(|url| is_postgres_url(url));
        let transactional = cli
            .database
            .or(env_postgres_url.as_ref().map(|_| TransactionalBackend::Postgres))
            .or(file_database.transactional)
            .unwrap_or_default();

        let postgres = (transactional == TransactionalBackend::Postgres).then(|| PostgresConfig {
            url: env_postgres_url.or(file_postgres.url).unwrap_or_default(),
            max_connections: file_postgres
                .max_connections
                .unwrap_or(POSTGRES_DEFAULT_MAX_CONNECTIONS),
            min_connections: file_postgres
                .min_connections
                .unwrap_or(POSTGRES_DEFAULT_MIN_CONNECTIONS),
            acquire_timeout_secs: file_postgres
                .acquire_timeout_secs
                .unwrap_or(POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS),
            statement_timeout_secs: file_postgres
                .statement_timeout_secs
                .unwrap_or(POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS),
        });

        let seed_file = cli
            .seed_file
            .clone()
            .or(file_seed.file)
            .map(|p| expand_path(&p.to_string_lossy()));

        let config = Self {
            server: ServerConfig { host, port },
            auth: AuthConfig {
                jwt_secret,
                token_ttl_hours,
            },
            database: DatabaseConfig {
                transactional,
                postgres,
            },
            seed_file,
        };

        config.validate()?;

        tracing::debug!(
            host = %config.server.host,
            port = config.server.port,
            transactional_backend = %config.database.transactional,
            token_ttl_hours = config.auth.token_ttl_hours,
            seed_file = ?config.seed_file,
            "Configuration loaded"
        );

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            anyhow::bail!("Configuration error: server.host must not be empty");
        }
        if self.server.port == 0 {
            anyhow::bail!("Configuration error: server.port must be greater than 0");
        }
        if self.auth.jwt_secret.trim().is_empty() {
            anyhow::bail!("Configuration error: auth.jwt_secret must not be empty");
        }
        if self.auth.token_ttl_hours == 0 {
            anyhow::bail!("Configuration error: auth.token_ttl_hours must be greater than 0");
        }
        if self.database.transactional == TransactionalBackend::Postgres
            && self
                .database
                .postgres
                .as_ref()
                .is_none_or(|pg| pg.url.is_empty())
        {
            anyhow::bail!(
                "Configuration error: PostgreSQL backend requires database.postgres.url or DATABASE_URL"
            );
        }
        Ok(())
    }
}

/// Get the profile config path (~/.recipebox/recipebox.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}
