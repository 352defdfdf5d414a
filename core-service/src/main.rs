//! Server startup and graceful shutdown

use anyhow::{Context, Result};
use core_runtime::config::CompanionConfig;
use core_runtime::logging::init_logging;
use core_service::CoreService;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = CompanionConfig::from_env().context("Failed to load configuration")?;
    init_logging(config.logging.clone()).context("Failed to initialize logging")?;

    info!(
        listen_addr = %config.listen_addr,
        drive_api_base = %config.drive_api_base,
        onedrive_api_base = %config.onedrive_api_base,
        request_timeout_secs = config.request_timeout.as_secs(),
        "Starting companion"
    );

    let app = CoreService::from_config(&config).router();
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;

    info!("Server ready and accepting connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
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
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }

    info!("Shutting down gracefully...");
}
