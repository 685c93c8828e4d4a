//! HTTP serving with a bounded graceful shutdown.

use std::future::{IntoFuture, pending};
use std::io;
use std::time::{Duration, Instant};

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::config::ServerConfig;
use crate::server::shutdown::shutdown_signal;
use crate::server::{ServerError, ServerResult};
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Binds the configured address and serves `app` until a shutdown signal.
///
/// After the signal the server stops accepting connections and waits up to
/// the configured shutdown timeout for in-flight requests.
///
/// # Errors
///
/// Fails if the configuration is invalid, the address cannot be bound, or
/// accepting connections fails.
pub async fn serve_http(app: Router, config: ServerConfig) -> ServerResult<()> {
    config
        .validate()
        .map_err(|err| ServerError::InvalidConfig(format!("{err:#}")))?;

    let address = config.server_addr();
    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| ServerError::Bind { address, source })?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        %address,
        all_interfaces = config.binds_to_all_interfaces(),
        "Listening for connections"
    );

    let started = Instant::now();
    let result = serve_until_shutdown(listener, app, config.shutdown_timeout()).await;
    let uptime_secs = started.elapsed().as_secs();

    match &result {
        Ok(()) => tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            uptime_secs,
            "Server stopped"
        ),
        Err(error) => tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            uptime_secs,
            error = %error,
            kind = ?error.kind(),
            "Server failed"
        ),
    }

    result.map_err(ServerError::Serve)
}

/// Runs the server until a shutdown signal, then for at most `grace` longer.
async fn serve_until_shutdown(
    listener: TcpListener,
    app: Router,
    grace: Duration,
) -> io::Result<()> {
    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();

    let graceful = async move {
        shutdown_signal().await;
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            grace_secs = grace.as_secs(),
            "Draining in-flight requests"
        );
        // The receiver is gone only if the server already stopped.
        let _ = signalled_tx.send(());
    };

    let grace_expired = async move {
        match signalled_rx.await {
            Ok(()) => tokio::time::sleep(grace).await,
            Err(_) => pending::<()>().await,
        }
    };

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(graceful)
        .into_future();

    tokio::select! {
        result = server => result,
        () = grace_expired => {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                grace_secs = grace.as_secs(),
                "Shutdown timeout elapsed, dropping open connections"
            );
            Ok(())
        }
    }
}
