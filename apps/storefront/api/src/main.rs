use core_config::tracing::{init_tracing, install_color_eyre};
use domain_products::build_repository;
use tracing::info;

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

    init_tracing(&config.environment);

    let store = build_repository(&config.store);
    let state = AppState { config, store };

    let app = api::app(&state).map_err(|e| eyre::eyre!("Invalid server configuration: {}", e))?;

    info!(
        backend = %state.config.store.backend,
        "Starting storefront API"
    );

    let server = state.config.server.clone();
    axum_helpers::create_production_app(app, &server, async move {
        info!("Shutting down: releasing product store");
        drop(state);
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Storefront API shutdown complete");
    Ok(())
}
