#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

pub mod adapters;
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod telemetry;

use crate::adapters::database::DbPool;
use crate::adapters::database::message_repo::MessageRepository;
use crate::config::Config;
use crate::services::health_service::HealthService;
use crate::services::message_service::{MessageService, WELCOME_MESSAGES};
use tokio::sync::watch;

/// Services wired against one database pool.
#[derive(Debug)]
pub struct App {
    pub message_service: MessageService,
    pub health_service: HealthService,
}

#[derive(Debug)]
pub struct AppBuilder {
    config: Config,
    pool: Option<DbPool>,
}

impl AppBuilder {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config, pool: None }
    }

    #[must_use]
    pub fn with_database(mut self, pool: DbPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Wires the services and, when enabled, seeds an empty board.
    ///
    /// # Errors
    /// Returns an error if no database was supplied or seeding fails.
    pub async fn build(self) -> anyhow::Result<App> {
        let pool = self.pool.ok_or_else(|| anyhow::anyhow!("Database pool is required"))?;

        let message_service = MessageService::new(pool.clone(), MessageRepository::new());
        let health_service = HealthService::new(pool, self.config.health.clone());

        if self.config.store.seed_on_empty {
            message_service.seed_if_empty(&WELCOME_MESSAGES).await?;
        }

        Ok(App { message_service, health_service })
    }
}

/// Opens the database file and brings its schema up to date.
///
/// # Errors
/// Returns an error if the file cannot be opened or a migration fails.
pub async fn init_database(config: &Config) -> anyhow::Result<DbPool> {
    let pool = adapters::database::init_pool(&config.db_path, &config.database).await?;
    adapters::database::run_migrations(&pool).await?;
    tracing::info!(path = %config.db_path.display(), "Database ready");
    Ok(pool)
}

/// Routes panics through tracing so they reach the configured log sink.
pub fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info.location().map(ToString::to_string).unwrap_or_default();
        tracing::error!(panic = %info, %location, "Process panicked");
    }));
}

/// Flips `shutdown_tx` to `true` on Ctrl+C or SIGTERM.
pub fn spawn_signal_handler(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to listen for SIGTERM");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
            () = terminate => tracing::info!("Received SIGTERM, shutting down"),
        }

        let _ = shutdown_tx.send(true);
    });
}
