use anyhow::Context;
use morocco_weather_mcp::config::{init_tracing, ServerConfig};
use morocco_weather_mcp::mcp::registry::registry;
use morocco_weather_mcp::router::create_app_router;
use morocco_weather_mcp::weather::AppState;
use std::sync::Arc;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing("morocco_weather_mcp=info,warn");

    // Resolve configuration; a missing API key only warns
    let config = ServerConfig::from_env();

    // Initialize application state
    let state = Arc::new(AppState::new(config.api_key));

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    let tools: Vec<_> = registry().names().collect();
    info!(addr = %config.addr, tools = ?tools, "weather MCP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
