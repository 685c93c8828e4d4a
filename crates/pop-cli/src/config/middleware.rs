//! Middleware configuration for the HTTP server.
//!
//! All middleware configs are re-exported from `pop-server` and support
//! both CLI arguments and environment variables.
//!
//! # Example
//!
//! ```bash
//! # Restrict CORS origins and shorten the request timeout
//! pop chat --allowed-origins "https://pop.example" --request-timeout 10
//! ```

use anyhow::Context;
use clap::Args;
use pop_server::middleware::{CorsConfig, OpenApiConfig, RecoveryConfig};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Middleware configuration combining CORS, OpenAPI, and recovery settings.
#[derive(Debug, Clone, Default, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// CORS (Cross-Origin Resource Sharing) configuration.
    #[clap(flatten)]
    pub cors: CorsConfig,

    /// OpenAPI documentation configuration.
    #[clap(flatten)]
    pub openapi: OpenApiConfig,

    /// Recovery middleware configuration.
    #[clap(flatten)]
    pub recovery: RecoveryConfig,
}

impl MiddlewareConfig {
    /// Validates every middleware section.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.cors.validate().context("invalid CORS configuration")?;
        self.openapi
            .validate()
            .context("invalid OpenAPI configuration")?;
        self.recovery
            .validate()
            .context("invalid recovery configuration")?;
        Ok(())
    }

    /// Logs middleware configuration at info level.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            origins = ?self.cors.allowed_origins,
            any_origin = self.cors.allows_any_origin(),
            credentials = self.cors.allow_credentials,
            "CORS configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            openapi_path = %self.openapi.open_api_json,
            scalar_path = %self.openapi.scalar_ui,
            "OpenAPI configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            request_timeout_secs = self.recovery.request_timeout,
            "Recovery configuration"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(MiddlewareConfig::default().validate().is_ok());
    }

    #[test]
    fn invalid_request_timeout_is_rejected() {
        let config = MiddlewareConfig {
            recovery: RecoveryConfig::with_timeout_secs(0),
            ..MiddlewareConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
