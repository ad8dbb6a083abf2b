//! Signal handling and graceful shutdown.

use std::time::Duration;

use price_proxy_core::ShutdownToken;
use tracing::{error, info};

/// Grace period for draining connections before the process is killed.
pub const FORCED_EXIT_AFTER: Duration = Duration::from_secs(10);

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for SIGINT: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            error!("Failed to listen for SIGTERM: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}

/// Resolves on SIGINT, SIGTERM, or once any component flips the token.
///
/// The token is always set on return, so health reports
/// `shutdownInProgress` and the refresh loop stops.
pub async fn wait_for_shutdown(token: &ShutdownToken) {
    tokio::select! {
        _ = ctrl_c() => info!("Received SIGINT"),
        _ = terminate() => info!("Received SIGTERM"),
        _ = token.cancelled() => info!("Shutdown requested internally"),
    }

    token.trigger();
}

/// Graceful-shutdown future for the HTTP server.
///
/// After [`wait_for_shutdown`] resolves, a watchdog exits the process with
/// status 1 if draining takes longer than [`FORCED_EXIT_AFTER`].
pub async fn shutdown_signal(token: ShutdownToken) {
    wait_for_shutdown(&token).await;
    info!("Shutting down gracefully...");

    tokio::spawn(async {
        tokio::time::sleep(FORCED_EXIT_AFTER).await;
        error!("Could not close connections in time, forcefully shutting down");
        std::process::exit(1);
    });
}
