//! HTTP surface: a landing page and the scrape endpoint.

pub mod config;
pub mod handlers;
pub mod router;

pub use config::WebConfig;
pub use router::{create_app, AppState};

use crate::error::{ExporterError, Result};
use crate::metrics::Registry;
use std::sync::Arc;
use tracing::info;

/// Bind the listener and serve until Ctrl-C or SIGTERM.
pub async fn start_web_server(config: WebConfig, registry: Arc<Registry>) -> Result<()> {
    let app = create_app(&config, registry);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .map_err(|e| {
            ExporterError::web_server_error(format!(
                "Failed to bind to {}: {}",
                config.listen_addr, e
            ))
        })?;

    info!(
        addr = %config.listen_addr,
        path = %config.metrics_path,
        "listening for scrapes"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ExporterError::web_server_error(format!("Server error: {}", e)))?;

    info!("web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
