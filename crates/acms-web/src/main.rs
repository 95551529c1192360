//! ACMS Web Server
//!
//! Run with: cargo run -p acms-web

use std::net::SocketAddr;
use std::sync::Arc;

use acms_agent::Config;
use acms_web::{router::build_router, state::AppState};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting ACMS Web Server...");

    let config = Config::load()?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let state = Arc::new(AppState::new(config));
    state.open_view();

    let app = build_router(state.clone());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state.clone()))
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C. The demo view is torn down first so no redraw or
/// pending prediction outlives the server.
async fn shutdown_signal(state: Arc<AppState>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown requested");
    state.close_view();
}
