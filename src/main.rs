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

use chatboard_server::api::MgmtState;
use chatboard_server::config::Config;
use chatboard_server::{AppBuilder, telemetry};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::sync::watch;
use tracing::Instrument;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();
    let telemetry_guard = telemetry::init_telemetry(&config.telemetry)?;

    chatboard_server::setup_panic_hook();

    let boot_span = tracing::info_span!("boot_server");
    let (api_listener, mgmt_listener, app_router, mgmt_app, pool, shutdown_rx) = async {
        // Phase 1: Infrastructure Setup (Resources)
        let pool = chatboard_server::init_database(&config).await?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        chatboard_server::spawn_signal_handler(shutdown_tx);

        // Phase 2: Component Wiring
        let app = AppBuilder::new(config.clone()).with_database(pool.clone()).build().await?;

        // Phase 3: Runtime Setup (Listeners and Routers)
        let app_router = chatboard_server::api::app_router(&config, app.message_service);
        let mgmt_app = chatboard_server::api::mgmt_router(MgmtState { health_service: app.health_service });

        let api_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
        let mgmt_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.mgmt_port).parse()?;

        let api_listener = tokio::net::TcpListener::bind(api_addr).await?;
        let mgmt_listener = tokio::net::TcpListener::bind(mgmt_addr).await?;

        tracing::info!(address = %api_addr, public_dir = %config.server.public_dir.display(), "listening");
        tracing::info!(address = %mgmt_addr, "management server listening");

        Ok::<_, anyhow::Error>((api_listener, mgmt_listener, app_router, mgmt_app, pool, shutdown_rx))
    }
    .instrument(boot_span)
    .await?;

    // Phase 4: Start Runtime
    let mut api_rx = shutdown_rx.clone();
    let api_server = axum::serve(api_listener, app_router.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(async move {
            let _ = api_rx.wait_for(|&s| s).await;
        });

    let mut mgmt_rx = shutdown_rx.clone();
    let mgmt_server = axum::serve(mgmt_listener, mgmt_app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(async move {
            let _ = mgmt_rx.wait_for(|&s| s).await;
        });

    if let Err(e) = tokio::try_join!(api_server, mgmt_server) {
        tracing::error!(error = %e, "Server error");
    }

    // Phase 5: Graceful Shutdown
    tokio::select! {
        () = pool.close() => {
            tracing::info!("Database connections closed.");
        }
        () = tokio::time::sleep(Duration::from_secs(config.server.shutdown_timeout_secs)) => {
            tracing::warn!("Timeout waiting for database connections to close.");
        }
    }

    telemetry_guard.shutdown();
    Ok(())
}
