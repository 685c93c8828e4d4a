//! OpenAPI specification middleware with Scalar UI integration.
//!
//! Generates the OpenAPI document from an aide [`ApiRouter`] and serves it
//! together with a Scalar API reference UI.
//!
//! # Usage
//!
//! ```rust
//! use aide::axum::ApiRouter;
//! use axum::Router;
//! use pop_server::middleware::{OpenApiConfig, RouterOpenApiExt};
//!
//! let app: Router<()> = ApiRouter::new()
//!     .with_open_api(OpenApiConfig::default());
//! ```
//!
//! [`ApiRouter`]: aide::axum::ApiRouter

use aide::axum::ApiRouter;
use aide::openapi::{Info, License, OpenApi};
use aide::scalar::Scalar;
use axum::routing::{Router, get};
use axum::{Extension, Json};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::handler::SURFACE_PATHS;
use crate::{Error, Result};

/// OpenAPI configuration for aide integration.
///
/// Configures the paths where the OpenAPI JSON document and Scalar UI are
/// served.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct OpenApiConfig {
    /// Path which exposes the OpenAPI JSON specification.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "OPENAPI_JSON_PATH", default_value = "/api/openapi.json")
    )]
    pub open_api_json: String,

    /// Path which exposes the Scalar API reference UI.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "OPENAPI_SCALAR_PATH", default_value = "/api/scalar")
    )]
    pub scalar_ui: String,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            open_api_json: "/api/openapi.json".to_owned(),
            scalar_ui: "/api/scalar".to_owned(),
        }
    }
}

impl OpenApiConfig {
    /// Validates that both paths are absolute, distinct, and do not shadow a
    /// surface route.
    pub fn validate(&self) -> Result<()> {
        let paths = [
            ("open-api-json", &self.open_api_json),
            ("scalar-ui", &self.scalar_ui),
        ];

        for (option, path) in paths {
            if !path.starts_with('/') {
                return Err(Error::config(
                    option,
                    format!("path must start with '/', got {path:?}"),
                ));
            }

            if SURFACE_PATHS.contains(&path.as_str()) {
                return Err(Error::config(
                    option,
                    format!("path {path:?} is already served by a surface"),
                ));
            }
        }

        if self.open_api_json == self.scalar_ui {
            return Err(Error::config(
                "scalar-ui",
                "must differ from the OpenAPI JSON path",
            ));
        }

        Ok(())
    }
}

/// Extension trait for [`ApiRouter`] to add OpenAPI documentation with Scalar UI.
///
/// [`ApiRouter`]: aide::axum::ApiRouter
pub trait RouterOpenApiExt<S> {
    /// Adds OpenAPI documentation routes with default API info.
    fn with_open_api(self, config: OpenApiConfig) -> Router<S>;

    /// Adds OpenAPI documentation routes with custom OpenAPI info.
    ///
    /// [`Info`]: aide::openapi::Info
    fn with_open_api_info(self, config: OpenApiConfig, info: Info) -> Router<S>;
}

impl<S> RouterOpenApiExt<S> for ApiRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_open_api(self, config: OpenApiConfig) -> Router<S> {
        let info = Info {
            title: "Pop! API".to_owned(),
            summary: Some("Status and chat servers".to_owned()),
            description: Some(
                "Pop! exposes a liveness surface and an in-memory chat log. Messages \
                are kept in insertion order for the lifetime of the process."
                    .to_owned(),
            ),
            license: Some(License {
                name: env!("CARGO_PKG_LICENSE").to_owned(),
                ..License::default()
            }),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            ..Info::default()
        };

        self.with_open_api_info(config, info)
    }

    fn with_open_api_info(self, config: OpenApiConfig, info: Info) -> Router<S> {
        async fn serve_openapi(Extension(api): Extension<OpenApi>) -> Json<OpenApi> {
            Json(api)
        }

        let mut api = OpenApi {
            info,
            ..OpenApi::default()
        };

        let scalar = Scalar::new(config.open_api_json.clone());
        let router = self
            .route(&config.scalar_ui, scalar.axum_route())
            .route(&config.open_api_json, get(serve_openapi));

        router.finish_api(&mut api).layer(Extension(api))
    }
}
