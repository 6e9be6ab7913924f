//! Hookline Server - Main Entry Point
//!
//! GitHub webhook to Discord relay.

use anyhow::Result;
use tracing::info;

use hookline_server::{api, config};

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up .env before anything reads the environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hookline_server=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Hookline Server"
    );

    let bind_address = config.bind_address.clone();
    info!(
        timeout_secs = config.delivery_timeout.as_secs(),
        "Discord delivery configured"
    );

    // Build application state
    let state = api::AppState::from_config(config)?;

    // Build router
    let app = api::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(address = %bind_address, "Server listening");

    // Graceful shutdown handler
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal, cleaning up...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");

    Ok(())
}
