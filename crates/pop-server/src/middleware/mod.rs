//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - Security (CORS, headers, body limits)
//! - Observability (request IDs, tracing, metrics)
//! - Recovery (panics, timeouts, service errors)
//! - OpenAPI documentation
//!
//! # Quick Start
//!
//! ```rust
//! use axum::Router;
//! use pop_server::middleware::*;
//!
//! let app: Router = Router::new()
//!     .with_default_security()
//!     .with_observability()
//!     .with_metrics()
//!     .with_default_recovery();
//! ```

mod observability;
mod recovery;
mod security;
mod specification;

pub use observability::{RouterObservabilityExt, track_request_metrics};
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{CorsConfig, RouterSecurityExt, SecurityHeadersConfig};
pub use specification::{OpenApiConfig, RouterOpenApiExt};
