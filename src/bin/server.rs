//! WPA HTTP Server Binary
//!
//! This is the main entry point for the WPA REST API server.
//! It loads the configuration, sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin wpa-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `WPA_CONFIG`: Path to a TOML config file (optional)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use wpa_rust::config::AppConfig;
use wpa_rust::http::{create_router, AppState};
use wpa_rust::sources::SyntheticSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting WPA HTTP Server");

    // Load configuration (file + environment overrides)
    let config = AppConfig::load().map_err(|e| anyhow::anyhow!(e))?;
    info!(
        years = config.analysis.default_years,
        cache_enabled = config.cache.enabled,
        "Configuration loaded"
    );

    // The demo deployment serves synthetic data; a real NASA client would
    // plug in here behind the same trait.
    let source = Arc::new(SyntheticSource::new());

    // Create application state
    let state = AppState::new(config, source);

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("API documentation: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
