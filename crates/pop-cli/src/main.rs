#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use axum::Router;
use pop_server::handler::{CustomRoutes, chat_routes, status_routes};
use pop_server::middleware::{
    RouterObservabilityExt, RouterOpenApiExt, RouterRecoveryExt, RouterSecurityExt,
    SecurityHeadersConfig,
};
use pop_server::service::ServiceState;

use crate::config::{Cli, MiddlewareConfig, Surface};
use crate::server::ServerError;

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "pop_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "pop_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "pop_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    let suggestion = error
        .downcast_ref::<ServerError>()
        .and_then(ServerError::suggestion);

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            suggestion,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
        if let Some(suggestion) = suggestion {
            eprintln!("Hint: {suggestion}");
        }
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();
    cli.validate()?;

    let surface = cli.command.surface();
    let router = create_router(surface, ServiceState::new(), cli.command.middleware());

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        surface = %surface,
        "starting pop server"
    );

    server::serve(router, cli.command.server_config()).await?;

    Ok(())
}

/// Creates the router for a surface with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost) - catches panics and enforces timeouts
/// 2. Metrics and observability - request IDs, tracing spans, timings
/// 3. Security - CORS, security headers, compression, body limit
/// 4. Routes (innermost) - surface handlers and OpenAPI docs
fn create_router(surface: Surface, state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    let api_routes = match surface {
        Surface::Status => status_routes(CustomRoutes::new()),
        Surface::Chat => chat_routes(CustomRoutes::new()),
    };

    api_routes
        .with_open_api(middleware.openapi.clone())
        .with_state(state)
        .with_security(&middleware.cors, &SecurityHeadersConfig::default())
        .with_observability()
        .with_metrics()
        .with_recovery(&middleware.recovery)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN};
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use super::*;

    fn test_server(surface: Surface) -> anyhow::Result<TestServer> {
        let router = create_router(surface, ServiceState::new(), &MiddlewareConfig::default());
        Ok(TestServer::new(router)?)
    }

    #[tokio::test]
    async fn status_surface_end_to_end() -> anyhow::Result<()> {
        let server = test_server(Surface::Status)?;

        let root = server.get("/").await;
        root.assert_status_ok();
        root.assert_text("Pop! API is running");

        let status = server.get("/status").await;
        status.assert_status_ok();
        status.assert_json(&json!({
            "status": "online",
            "message": "Pop! server is working",
        }));

        Ok(())
    }

    #[tokio::test]
    async fn chat_surface_end_to_end() -> anyhow::Result<()> {
        let server = test_server(Surface::Chat)?;

        let created = server
            .post("/chat")
            .json(&json!({ "username": "alice", "content": "hi" }))
            .await;
        created.assert_status(StatusCode::CREATED);

        let messages = server.get("/chat").await.json::<Vec<Value>>();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["username"], "alice");
        assert_eq!(messages[0]["content"], "hi");
        assert_eq!(messages[0], created.json::<Value>());

        Ok(())
    }

    #[tokio::test]
    async fn any_origin_is_allowed() -> anyhow::Result<()> {
        for surface in [Surface::Status, Surface::Chat] {
            let server = test_server(surface)?;
            let path = match surface {
                Surface::Status => "/status",
                Surface::Chat => "/chat",
            };

            let response = server
                .get(path)
                .add_header(ORIGIN, "https://anywhere.example")
                .await;
            response.assert_status_ok();
            response.assert_header(ACCESS_CONTROL_ALLOW_ORIGIN, "*");
        }

        Ok(())
    }

    #[tokio::test]
    async fn surfaces_do_not_share_routes() -> anyhow::Result<()> {
        let status = test_server(Surface::Status)?;
        status
            .get("/chat")
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let chat = test_server(Surface::Chat)?;
        chat.get("/status").await.assert_status(StatusCode::NOT_FOUND);
        chat.get("/").await.assert_status(StatusCode::NOT_FOUND);

        Ok(())
    }
}
