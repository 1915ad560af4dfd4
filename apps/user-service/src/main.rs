use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use migration::Migrator;
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    let db = match config.database.clone() {
        Some(pg_config) => {
            let db = connect_from_config_with_retry(pg_config, None)
                .await
                .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;
            run_migrations::<Migrator>(&db, config.app.name).await?;
            Some(db)
        }
        None => {
            warn!(store = ?config.store, "Users are kept in memory and lost on restart");
            None
        }
    };

    let state = AppState { config, db };

    let api_routes = api::routes(&state)?;

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes)?;

    // - /health: liveness with app name/version
    // - /ready: readiness with a database ping
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    info!(
        order_service = %state.config.order_service.base_url,
        "Starting user service with graceful shutdown (30s timeout)"
    );

    let server_config = state.config.server.clone();
    create_production_app(
        app,
        &server_config,
        Duration::from_secs(30),
        async move {
            if let Some(db) = state.db {
                info!("Shutting down: closing database connections");
                match db.close().await {
                    Ok(()) => info!("PostgreSQL connection closed successfully"),
                    Err(e) => tracing::error!(error = %e, "Error closing PostgreSQL"),
                }
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("User service shutdown complete");
    Ok(())
}
