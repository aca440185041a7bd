use std::sync::Arc;

use dotenvy::dotenv;
use invoice_core::observability::logging::init_tracing;
use invoice_manager::AppState;
use invoice_manager::config::get_configuration;
use invoice_manager::services::StoreClient;
use invoice_manager::startup::build_router;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing("invoice-manager", "info");

    let store = Arc::new(StoreClient::new(configuration.store.clone()));
    info!(store_url = %store.base_url(), "Using invoice store");

    let state = AppState::new(store, configuration.invoice.discount());
    let app = build_router(state);

    let address = format!(
        "{}:{}",
        configuration.server.host, configuration.server.port
    );
    let listener = tokio::net::TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
        anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
    })?;

    info!("Starting invoice-manager on {}", address);
    axum::serve(listener, app).await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
