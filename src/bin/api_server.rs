// API Server Binary Entry Point
//
// Purpose: Start the Axum server over the bundled plant catalog
// Usage: cargo run --features api --bin api_server

use plant_catalog::{create_router, AppState, ServerConfig};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "plant_catalog=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting plant catalog server...");

    let config = ServerConfig::from_env();

    tracing::info!("Configuration:");
    tracing::info!("  DATA_DIR: {}", config.data_dir.display());
    tracing::info!("  PORT: {}", config.port);
    tracing::info!("  TRANSLATE_URL: {}", config.translate_url);
    tracing::info!("  TRANSLATE_TIMEOUT: {:?}", config.translate_timeout);

    // Loads plants.json + images.json, builds the translator and cache
    tracing::info!("Initializing application state...");
    let state = AppState::new(&config)?;
    tracing::info!("Application state initialized ({} plants)", state.catalog.len());

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
