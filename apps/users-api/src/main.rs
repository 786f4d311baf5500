//! Users API - REST server for the User resource

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        environment = ?config.environment,
        "Starting {} v{}",
        config.app.name,
        config.app.version
    );

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await?;

    database::postgres::run_migrations::<migration::Migrator>(&db, config.app.name).await?;

    let state = AppState {
        config: config.clone(),
        db,
    };

    let api_routes = api::routes(&state);
    let probes = health_router(state.config.app.clone()).merge(api::health::router(state.db.clone()));
    let app =
        axum_helpers::create_router::<openapi::ApiDoc>(api_routes, probes, &state.config.server)?;

    info!("Starting Users API on port {}", state.config.server.port);

    let db = state.db;
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing PostgreSQL pool");
            if let Err(e) = db.close().await {
                tracing::error!(error = %e, "Failed to close PostgreSQL pool");
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
