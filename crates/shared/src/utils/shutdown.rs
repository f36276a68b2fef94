use std::{fmt::Display, future::Future};
use tokio::signal;
use tracing::info;

/// Waits for a signal listener. A listener that fails to install never resolves.
async fn listen_or_park<E: Display>(listener: impl Future<Output = Result<(), E>>, name: &str) {
    if let Err(e) = listener.await {
        tracing::error!("Failed to install {name} handler: {e}");
        std::future::pending::<()>().await;
    }
}

pub async fn shutdown_signal() {
    let ctrl_c = listen_or_park(signal::ctrl_c(), "Ctrl+C");

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("🛑 Ctrl+C received, shutting down"),
        _ = terminate => info!("🛑 SIGTERM received, shutting down"),
    }
}
