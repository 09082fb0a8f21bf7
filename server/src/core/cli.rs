use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::config::TransactionalBackend;
use super::constants::{
    ENV_CONFIG, ENV_DATABASE_URL, ENV_HOST, ENV_JWT_SECRET, ENV_PORT, ENV_SEED_FILE,
    ENV_TOKEN_TTL_HOURS, ENV_TRANSACTIONAL_BACKEND,
};

#[derive(Parser)]
#[command(name = "recipebox")]
#[command(version, about = "Recipe catalog API server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server host address
    #[arg(long, short = 'H', global = true, env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', global = true, env = ENV_PORT)]
    pub port: Option<u16>,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Transactional database backend (sqlite or postgres)
    #[arg(long, global = true, env = ENV_TRANSACTIONAL_BACKEND, value_parser = parse_transactional_backend)]
    pub database: Option<TransactionalBackend>,

    /// Database connection URL; a postgres:// URL selects PostgreSQL
    #[arg(long, global = true, env = ENV_DATABASE_URL)]
    pub database_url: Option<String>,

    /// Secret used to sign access tokens
    #[arg(long, global = true, env = ENV_JWT_SECRET, hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Access token lifetime in hours
    #[arg(long, global = true, env = ENV_TOKEN_TTL_HOURS)]
    pub token_ttl_hours: Option<u64>,

    /// JSON file of sample recipes used by init-db (defaults to the bundled set)
    #[arg(long, global = true, env = ENV_SEED_FILE)]
    pub seed_file: Option<PathBuf>,
}

fn parse_transactional_backend(s: &str) -> Result<TransactionalBackend, String> {
    match s.to_lowercase().as_str() {
        "sqlite" => Ok(TransactionalBackend::Sqlite),
        "postgres" | "postgresql" => Ok(TransactionalBackend::Postgres),
        _ => Err(format!(
            "Invalid database backend '{}'. Valid options: sqlite, postgres",
            s
        )),
    }
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the server (default command)
    Start,
    /// Create the schema and load sample recipes if the catalog is empty
    InitDb,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub config: Option<PathBuf>,
    pub database: Option<TransactionalBackend>,
    pub database_url: Option<String>,
    pub jwt_secret: Option<String>,
    pub token_ttl_hours: Option<u64>,
    pub seed_file: Option<PathBuf>,
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            config: cli.config,
            database: cli.database,
            database_url: cli.database_url,
            jwt_secret: cli.jwt_secret,
            token_ttl_hours: cli.token_ttl_hours,
            seed_file: cli.seed_file,
        }
    }
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let mut cli = Cli::parse();
    let command = cli.command.take();
    (cli.into(), command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend() {
        assert_eq!(
            parse_transactional_backend("SQLite"),
            Ok(TransactionalBackend::Sqlite)
        );
        assert_eq!(
            parse_transactional_backend("postgresql"),
            Ok(TransactionalBackend::Postgres)
        );
        assert!(parse_transactional_backend("mysql").is_err());
    }

    #[test]
    fn test_init_db_subcommand() {
        let cli = Cli::try_parse_from(["recipebox", "init-db", "--port", "8080"]).unwrap();
        assert_eq!(cli.command, Some(Commands::InitDb));
        assert_eq!(cli.port, Some(8080));
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["recipebox", "--database", "postgres"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.database, Some(TransactionalBackend::Postgres));
    }
}
