//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! The status and chat surfaces are built independently; neither router
//! contains the other's routes.
//!
//! # Usage Example
//!
//! ```rust
//! use aide::axum::ApiRouter;
//! use aide::axum::routing::get;
//! use pop_server::handler::{CustomRoutes, status_routes};
//!
//! async fn version() -> &'static str {
//!     env!("CARGO_PKG_VERSION")
//! }
//!
//! let custom = CustomRoutes::new().with_routes(ApiRouter::new().api_route("/version", get(version)));
//! let router = status_routes(custom);
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod chat;
mod custom_routes;
mod error;
mod status;

pub mod request;
pub mod response;

use aide::axum::ApiRouter;
use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Response};

pub use crate::handler::custom_routes::CustomRoutes;
pub use crate::handler::error::{Error, ErrorKind};
pub use crate::handler::status::ROOT_BANNER;
use crate::service::ServiceState;

/// Paths served by the built-in handlers of either surface.
pub const SURFACE_PATHS: &[&str] = &["/", "/status", "/chat"];

/// Renders unknown routes as a JSON `404 Not Found`.
#[inline]
async fn not_found(method: Method, uri: Uri) -> Response {
    ErrorKind::NotFound
        .with_message("Route not found")
        .with_resource(uri.path().to_owned())
        .with_context(format!("{} {}", method, uri))
        .into_response()
}

/// Returns an [`ApiRouter`] for the status surface (`GET /`, `GET /status`).
pub fn status_routes(routes: CustomRoutes) -> ApiRouter<ServiceState> {
    routes.merge_into(status::routes()).fallback(not_found)
}

/// Returns an [`ApiRouter`] for the chat surface (`GET /chat`, `POST /chat`).
pub fn chat_routes(routes: CustomRoutes) -> ApiRouter<ServiceState> {
    routes.merge_into(chat::routes()).fallback(not_found)
}
