#![allow(dead_code, clippy::unwrap_used, clippy::missing_panics_doc, unreachable_pub, missing_debug_implementations)]

use chatboard_server::adapters::database::{self, DbPool};
use chatboard_server::adapters::database::message_repo::MessageRepository;
use chatboard_server::api::{self, MgmtState};
use chatboard_server::config::Config;
use chatboard_server::services::message_service::MessageService;
use chatboard_server::{AppBuilder, init_database};
use std::path::Path;
use std::sync::Once;
use tempfile::TempDir;
use tokio::net::TcpListener;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("chatboard_server=debug".parse().unwrap())
            .add_directive("sqlx=warn".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().init();
    });
}

pub fn get_test_config(dir: &Path) -> Config {
    let mut config = Config::default();
    config.db_path = dir.join("chat.db");
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.server.mgmt_port = 0;
    config.server.public_dir = dir.join("public");
    config
}

/// A migrated database in a private temp directory.
pub struct TestStore {
    pub dir: TempDir,
    pub pool: DbPool,
    pub service: MessageService,
}

impl TestStore {
    pub async fn new() -> Self {
        setup_tracing();
        let dir = tempfile::tempdir().unwrap();
        let config = get_test_config(dir.path());
        let pool = init_database(&config).await.expect("Failed to open test database");
        let service = MessageService::new(pool.clone(), MessageRepository::new());
        Self { dir, pool, service }
    }

    /// Opens a second, independent pool on the same file.
    pub async fn reopen(&self) -> MessageService {
        let config = get_test_config(self.dir.path());
        let pool = database::init_pool(&config.db_path, &config.database).await.unwrap();
        MessageService::new(pool, MessageRepository::new())
    }
}

pub struct TestApp {
    pub server_url: String,
    pub mgmt_url: String,
    pub client: reqwest::Client,
    pub pool: DbPool,
    pub config: Config,
    pub dir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = get_test_config(dir.path());
        Self::spawn_in(dir, config).await
    }

    pub async fn spawn_with_config(mutate: impl FnOnce(&mut Config)) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = get_test_config(dir.path());
        mutate(&mut config);
        Self::spawn_in(dir, config).await
    }

    async fn spawn_in(dir: TempDir, config: Config) -> Self {
        setup_tracing();

        let pool = init_database(&config).await.expect("Failed to open test database");
        let app = AppBuilder::new(config.clone()).with_database(pool.clone()).build().await.unwrap();

        let app_router = api::app_router(&config, app.message_service);
        let mgmt_router = api::mgmt_router(MgmtState { health_service: app.health_service });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server_url = format!("http://{}", listener.local_addr().unwrap());
        let mgmt_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mgmt_url = format!("http://{}", mgmt_listener.local_addr().unwrap());

        tokio::spawn(async move { axum::serve(listener, app_router).await });
        tokio::spawn(async move { axum::serve(mgmt_listener, mgmt_router).await });

        Self { server_url, mgmt_url, client: reqwest::Client::new(), pool, config, dir }
    }

    pub fn messages_url(&self) -> String {
        format!("{}/api/messages", self.server_url)
    }

    pub async fn post_text(&self, text: &str) -> reqwest::Response {
        self.client.post(self.messages_url()).json(&serde_json::json!({ "text": text })).send().await.unwrap()
    }

    pub async fn post_text_owned(&self, text: String) -> reqwest::StatusCode {
        self.post_text(&text).await.status()
    }

    pub async fn list(&self) -> Vec<serde_json::Value> {
        let resp = self.client.get(self.messages_url()).send().await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        resp.json().await.unwrap()
    }
}
