//! Liveness handlers for the status surface.
//!
//! Both endpoints are stateless and always succeed while the process is
//! serving requests.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::http::StatusCode;

use crate::TRACING_TARGET_STATUS;
use crate::extract::Json;
use crate::handler::response::ServerStatus;
use crate::service::ServiceState;

/// Plain-text banner served at the root path.
pub const ROOT_BANNER: &str = "Pop! API is running";

/// Returns the plain-text banner.
async fn root() -> &'static str {
    tracing::trace!(target: TRACING_TARGET_STATUS, "root banner requested");
    ROOT_BANNER
}

fn root_docs(op: TransformOperation) -> TransformOperation {
    op.summary("API banner")
        .description("Returns a plain-text confirmation that the API is running.")
        .response::<200, String>()
}

/// Returns the fixed online status.
#[tracing::instrument(skip_all)]
async fn server_status() -> (StatusCode, Json<ServerStatus>) {
    tracing::debug!(target: TRACING_TARGET_STATUS, "status check requested");
    (StatusCode::OK, Json(ServerStatus::online()))
}

fn server_status_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Server status")
        .description("Reports that the server is online.")
        .response::<200, Json<ServerStatus>>()
}

/// Returns an [`ApiRouter`] with all status routes.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/", get_with(root, root_docs))
        .api_route("/status", get_with(server_status, server_status_docs))
        .with_path_items(|item| item.tag("Status"))
}
