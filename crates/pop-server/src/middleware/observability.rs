//! Observability middleware for tracing and request metrics.
//!
//! Every request gets a unique `x-request-id` that is echoed on the response,
//! a `tower-http` trace span, and a timing record under the metrics target.

use std::time::Instant;

use axum::Router;
use axum::extract::Request;
use axum::http::header::{self, HeaderName};
use axum::middleware::{Next, from_fn};
use axum::response::Response;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

use crate::TRACING_TARGET_METRICS;
use crate::utility::constants::REQUEST_ID_HEADER;

/// Extension trait for `axum::`[`Router`] to apply observability middleware.
pub trait RouterObservabilityExt<S> {
    /// Layers observability middleware for request tracing and logging.
    ///
    /// Generates unique request IDs, adds structured logging spans for each
    /// request, propagates request IDs to responses, and marks sensitive
    /// headers for redaction in logs.
    fn with_observability(self) -> Self;

    /// Layers metrics middleware recording method, path, status and latency.
    fn with_metrics(self) -> Self;
}

impl<S> RouterObservabilityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_observability(self) -> Self {
        let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

        self.layer(PropagateRequestIdLayer::new(request_id.clone()))
            .layer(SetSensitiveRequestHeadersLayer::new([
                header::AUTHORIZATION,
                header::COOKIE,
            ]))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
    }

    fn with_metrics(self) -> Self {
        self.layer(ServiceBuilder::new().layer(from_fn(track_request_metrics)))
    }
}

/// Request metrics middleware with timing.
pub async fn track_request_metrics(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let request_size = content_length(request.headers());

    tracing::trace!(
        target: TRACING_TARGET_METRICS,
        method = %method,
        uri = %uri,
        request_size = request_size,
        "request started"
    );

    let response = next.run(request).await;
    let duration = start_time.elapsed();

    tracing::debug!(
        target: TRACING_TARGET_METRICS,
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = duration.as_millis() as u64,
        request_size = request_size,
        response_size = content_length(response.headers()),
        "request completed"
    );

    response
}

fn content_length(headers: &axum::http::HeaderMap) -> u64 {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0)
}
