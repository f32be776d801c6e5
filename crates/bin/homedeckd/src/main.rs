//! # homedeckd: homedeck API server
//!
//! Composition root that wires the storage and HTTP adapters together and
//! serves the REST API the dashboards synchronize against.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the tracing subscriber
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repositories and application services
//! - Seed the demo devices into an empty store when enabled
//! - Bind to a TCP port and serve until Ctrl-C
//!
//! ## Dependency rule
//! This is the **only** server-side crate that depends on every adapter.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::sync::Arc;

use homedeck_adapter_http_axum::state::AppState;
use homedeck_adapter_storage_sqlite_sqlx::{
    Config as DatabaseConfig, SqliteActivityLogRepository, SqliteDeviceRepository,
};
use homedeck_app::services::activity_service::ActivityService;
use homedeck_app::services::device_service::DeviceService;
use homedeck_domain::demo::demo_devices;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("received shutdown signal");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Database
    let db = DatabaseConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Services
    let device_service = Arc::new(DeviceService::new(SqliteDeviceRepository::new(
        pool.clone(),
    )));
    let activity_service = Arc::new(ActivityService::new(SqliteActivityLogRepository::new(
        pool,
    )));

    if config.demo.seed {
        let seeded = device_service.seed_if_empty(demo_devices()).await?;
        if seeded > 0 {
            tracing::info!(count = seeded, "seeded demo devices");
        }
    }

    // HTTP
    let state = AppState::from_arcs(device_service, activity_service);
    let app = homedeck_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "homedeckd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("homedeckd stopped");
    Ok(())
}
