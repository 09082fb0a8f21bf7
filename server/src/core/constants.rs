// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display and platform directories)
pub const APP_NAME: &str = "RecipeBox";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "recipebox";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".recipebox";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "recipebox.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "RECIPEBOX_CONFIG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

pub const ENV_HOST: &str = "RECIPEBOX_HOST";
pub const ENV_PORT: &str = "RECIPEBOX_PORT";

/// Environment variable for log level/filter (falls back to RUST_LOG)
pub const ENV_LOG: &str = "RECIPEBOX_LOG";

/// Default tracing filter when neither log variable is set
pub const DEFAULT_LOG_FILTER: &str = "info,recipebox_server=info";

// =============================================================================
// Server Defaults
// =============================================================================

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

// =============================================================================
// Storage
// =============================================================================

/// Environment variable to override data directory
pub const ENV_DATA_DIR: &str = "RECIPEBOX_DATA_DIR";

/// Environment variable for the seed recipe file
pub const ENV_SEED_FILE: &str = "RECIPEBOX_SEED_FILE";

// =============================================================================
// Authentication
// =============================================================================

pub const ENV_JWT_SECRET: &str = "RECIPEBOX_JWT_SECRET";
pub const ENV_TOKEN_TTL_HOURS: &str = "RECIPEBOX_TOKEN_TTL_HOURS";

/// Signing secret used when none is configured. Never use in production.
pub const DEFAULT_JWT_SECRET: &str = "recipebox-dev-secret-change-me";

/// Access token lifetime
pub const DEFAULT_TOKEN_TTL_HOURS: u64 = 6;

/// PBKDF2 iteration count for new password hashes
#[cfg(not(test))]
pub const PASSWORD_HASH_ITERATIONS: u32 = 100_000;
#[cfg(test)]
pub const PASSWORD_HASH_ITERATIONS: u32 = 1_000;

/// Password salt length in bytes
pub const PASSWORD_SALT_LEN: usize = 16;

// =============================================================================
// SQLite Database
// =============================================================================

pub const SQLITE_DB_FILENAME: &str = "recipebox.db";
pub const SQLITE_MAX_CONNECTIONS: u32 = 5;
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;

/// Interval between WAL checkpoints
pub const SQLITE_CHECKPOINT_INTERVAL_SECS: u64 = 300;

// =============================================================================
// PostgreSQL Database
// =============================================================================

/// Standard connection URL variable; a `postgres` scheme selects PostgreSQL
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";

/// Environment variable to force the transactional backend
pub const ENV_TRANSACTIONAL_BACKEND: &str = "RECIPEBOX_DATABASE";

pub const POSTGRES_DEFAULT_MAX_CONNECTIONS: u32 = 20;
pub const POSTGRES_DEFAULT_MIN_CONNECTIONS: u32 = 2;
pub const POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;
pub const POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS: u64 = 60;
pub const POSTGRES_HEALTH_CHECK_INTERVAL_SECS: u64 = 60;

// =============================================================================
// API
// =============================================================================

pub const API_PREFIX: &str = "/api/v1";

/// Number of recipes returned by the recipe listing
pub const RECIPE_LIST_LIMIT: u32 = 20;

/// Request body limit for JSON endpoints
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Maximum wait for background tasks during shutdown
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;
