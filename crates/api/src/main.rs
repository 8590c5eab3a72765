use std::sync::Arc;

use anyhow::Result;
use tracing::info;

mod app;
mod config;
mod error;
mod middleware;
mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::load()?;

    // Initialize logging and metrics
    middleware::logging::init_logging(&config.logging);
    middleware::init_metrics();

    info!("Starting Role Console API v{}", env!("CARGO_PKG_VERSION"));

    // Create the upstream client
    let backend = gateway::HttpWorkforceBackend::new(config.upstream.clone())?;
    info!("Upstream workforce backend: {}", config.upstream.base_url);

    // Build application
    let app = app::create_app(config.clone(), Arc::new(backend));

    // Start server
    let addr = config.socket_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
