use tokio::signal;
use tracing::warn;

/// Resolves on Ctrl+C
pub async fn listen_for_shutdown() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    warn!("Shutdown signal received, stopping the dashboard server...");
}
