pub mod message_repo;
pub mod records;

use crate::config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::time::Duration;

pub type DbPool = Pool<Sqlite>;

/// Opens (creating if missing) the SQLite file at `path` behind a connection pool.
///
/// Writers are serialized by SQLite itself: WAL journaling lets readers proceed
/// alongside a writer, and the busy timeout makes concurrent writers wait for
/// the lock instead of failing immediately.
///
/// # Errors
/// Returns `sqlx::Error` if the file cannot be opened.
pub async fn init_pool(path: &Path, config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms));

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await
}

/// Creates the `messages` table if it does not exist yet.
///
/// # Errors
/// Returns `MigrateError` if a migration fails to apply.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}
