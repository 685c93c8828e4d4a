//! Shutdown signal handling.

use std::future::{Future, pending};
use std::io;

use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

use crate::TRACING_TARGET_SERVER_SHUTDOWN;

/// Resolves once the process receives Ctrl+C (SIGINT) or, on Unix, SIGTERM.
///
/// A signal whose handler cannot be installed is never reported as received.
pub async fn shutdown_signal() {
    let received = tokio::select! {
        name = listen(ctrl_c(), "SIGINT") => name,
        name = terminate() => name,
    };

    tracing::info!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        signal = received,
        "Shutdown signal received"
    );
}

#[cfg(unix)]
async fn terminate() -> &'static str {
    let sigterm = async {
        signal(SignalKind::terminate())?.recv().await;
        Ok::<(), io::Error>(())
    };
    listen(sigterm, "SIGTERM").await
}

#[cfg(not(unix))]
async fn terminate() -> &'static str {
    pending().await
}

async fn listen(signal: impl Future<Output = io::Result<()>>, name: &'static str) -> &'static str {
    if let Err(error) = signal.await {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            signal = name,
            error = %error,
            "Cannot listen for signal"
        );
        pending::<()>().await;
    }
    name
}
