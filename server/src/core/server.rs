//! HTTP server loop

use shared::{AppError, AppResult};

use crate::core::{AppState, Config};
use crate::routes;

/// Build the state, bind the listener and serve until shutdown
pub async fn run(config: Config) -> AppResult<()> {
    let addr = format!("{}:{}", config.host, config.http_port);
    let state = AppState::new(config).await?;
    let app = routes::build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
