use axum_helpers::http::cors_layer;
use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::InMemoryUserRepository;
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::{AppState, Store};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);
    info!(store = %config.store, environment = ?config.environment, "Starting {}", config.app.name);

    let store = match config.database.clone() {
        Some(database) => {
            let db = database::postgres::connect_from_config_with_retry(database, None)
                .await
                .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;
            domain_users::ensure_schema(&db)
                .await
                .map_err(|e| eyre::eyre!("Failed to create users table: {}", e))?;
            info!("Connected to PostgreSQL, users table ready");
            Store::Postgres(db)
        }
        None => {
            warn!("Using the in-memory user store; records are lost on exit");
            Store::Memory(InMemoryUserRepository::new())
        }
    };

    let cors = cors_layer(config.cors_origins.as_deref(), &config.environment)?;
    let server = config.server.clone();
    let state = AppState { config, store };
    let cleanup_store = state.store.clone();

    let app = api::app(state, cors);

    create_production_app(app, &server, Duration::from_secs(30), async move {
        info!("Shutting down: closing store connections");
        cleanup_store.close().await;
    })
    .await?;

    info!("Shutdown complete");
    Ok(())
}
