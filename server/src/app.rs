//! Core application

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::{ApiServer, AuthManager};
use crate::core::cli::{self, CliConfig, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME, DEFAULT_LOG_FILTER, ENV_LOG};
use crate::core::shutdown::ShutdownService;
use crate::core::storage::AppStorage;
use crate::data::{SeedOutcome, TransactionalService, seed_if_empty};

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub storage: AppStorage,
    pub database: Arc<TransactionalService>,
    pub auth: Arc<AuthManager>,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        let app = Self::init(&cli_config).await?;
        match command {
            Some(Commands::InitDb) => Self::init_db(app).await,
            Some(Commands::Start) | None => Self::start_server(app).await,
        }
    }

    async fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;
        let storage = AppStorage::init().await?;

        let database = TransactionalService::init(
            config.database.transactional,
            &storage,
            config.database.postgres.as_ref(),
        )
        .await
        .context("Failed to initialize database")?;
        let database = Arc::new(database);

        let auth = Arc::new(AuthManager::new(&config.auth));
        let shutdown = ShutdownService::new(database.clone());

        tracing::debug!(
            backend = %database.backend(),
            data_dir = %storage.data_dir().display(),
            "Core services initialized"
        );

        Ok(Self {
            shutdown,
            config,
            storage,
            database,
            auth,
        })
    }

    fn init_logging() {
        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    /// Seed the catalog and exit
    async fn init_db(app: Self) -> Result<()> {
        let repo = app.database.repository();
        let outcome = seed_if_empty(repo.as_ref(), app.config.seed_file.as_deref()).await;
        app.database.close().await;

        match outcome.context("Database initialization failed")? {
            SeedOutcome::Seeded(n) => {
                println!("Database initialized successfully with {} sample recipes", n)
            }
            SeedOutcome::AlreadyPopulated(n) => {
                println!("Database already contains {} recipes", n)
            }
        }
        Ok(())
    }

    async fn start_server(app: Self) -> Result<()> {
        // Install signal handlers FIRST (before any blocking calls)
        app.shutdown.install_signal_handlers();
        app.start_background_tasks().await;

        tracing::info!(
            "{} v{} starting on http://{}:{}",
            APP_NAME,
            env!("CARGO_PKG_VERSION"),
            app.config.server.host,
            app.config.server.port
        );

        let server = ApiServer::new(app);
        let app = server.start().await?;
        app.shutdown.shutdown().await;

        Ok(())
    }

    pub async fn start_background_tasks(&self) {
        self.shutdown
            .register(
                self.database
                    .start_maintenance_task(self.shutdown.subscribe()),
            )
            .await;

        tracing::debug!("Background tasks started");
    }
}
