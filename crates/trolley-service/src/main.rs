//! Trolley Service - HTTP API for the in-memory shopping-cart engine.
//!
//! This is the main entry point for the trolley service.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trolley_service::{create_router, AppState, ServiceConfig};
use trolley_store::MemoryStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,trolley=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Trolley Service");

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        "Service configuration loaded"
    );

    // Initialize the in-memory store with the seed catalog.
    // Everything resets on restart; there is no persistence layer.
    let store = Arc::new(MemoryStore::new());
    tracing::info!(
        products = store.list_products().len(),
        "Catalog seeded"
    );

    // Build app state
    let state = AppState::new(store, config.clone());

    // Create the router
    let app = create_router(state);

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
