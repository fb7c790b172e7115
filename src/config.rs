use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Path to the SQLite database file (created if missing)
    #[arg(long, env = "DB_PATH", default_value = "chat.db")]
    pub db_path: PathBuf,

    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub store: StoreConfig,

    #[command(flatten)]
    pub health: HealthConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("chat.db"),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            store: StoreConfig::default(),
            health: HealthConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "CHATBOARD_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Port for the management server (health probes)
    #[arg(long, env = "CHATBOARD_MGMT_PORT", default_value_t = 9090)]
    pub mgmt_port: u16,

    /// Directory of static client files served at the root path
    #[arg(long, env = "CHATBOARD_PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,

    /// How long to wait for in-flight work after a shutdown signal
    #[arg(long, env = "CHATBOARD_SHUTDOWN_TIMEOUT_SECS", default_value_t = 5)]
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            mgmt_port: 9090,
            public_dir: PathBuf::from("public"),
            shutdown_timeout_secs: 5,
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct DatabaseConfig {
    /// Maximum number of pooled connections
    #[arg(long = "db-max-connections", env = "CHATBOARD_DB_MAX_CONNECTIONS", default_value_t = 8)]
    pub max_connections: u32,

    /// Minimum number of idle connections kept open
    #[arg(long = "db-min-connections", env = "CHATBOARD_DB_MIN_CONNECTIONS", default_value_t = 1)]
    pub min_connections: u32,

    /// How long to wait for a pooled connection before failing
    #[arg(long = "db-acquire-timeout-secs", env = "CHATBOARD_DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 5)]
    pub acquire_timeout_secs: u64,

    /// How long a writer waits on SQLite's lock before giving up
    #[arg(long = "db-busy-timeout-ms", env = "CHATBOARD_DB_BUSY_TIMEOUT_MS", default_value_t = 5000)]
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { max_connections: 8, min_connections: 1, acquire_timeout_secs: 5, busy_timeout_ms: 5000 }
    }
}

#[derive(Clone, Debug, Default, Args)]
pub struct StoreConfig {
    /// Insert the welcome messages when the board is empty at startup
    #[arg(long = "seed", env = "CHATBOARD_SEED", default_value_t = false)]
    pub seed_on_empty: bool,
}

#[derive(Clone, Debug, Args)]
pub struct HealthConfig {
    /// Timeout for the database readiness probe
    #[arg(long = "health-db-timeout-ms", env = "CHATBOARD_HEALTH_DB_TIMEOUT_MS", default_value_t = 2000)]
    pub db_timeout_ms: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self { db_timeout_ms: 2000 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Default, Args)]
pub struct TelemetryConfig {
    /// OTLP/HTTP collector endpoint; traces and metrics are exported when set
    #[arg(long, env = "CHATBOARD_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Log output format
    #[arg(long, env = "CHATBOARD_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}
