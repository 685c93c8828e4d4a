//! Centralized tracing target constants for structured logging.
//!
//! Using consistent targets enables fine-grained control over log output
//! via tracing subscriber filters, e.g. `RUST_LOG=pop_server::handler=debug`.

/// Status surface handlers.
pub const TRACING_TARGET_STATUS: &str = "pop_server::handler::status";

/// Chat surface handlers.
pub const TRACING_TARGET_CHAT: &str = "pop_server::handler::chat";

/// Request extraction and rejection.
pub const TRACING_TARGET_EXTRACT: &str = "pop_server::extract";

/// Request metrics and performance monitoring.
pub const TRACING_TARGET_METRICS: &str = "pop_server::metrics";

/// Error recovery including middleware errors and request failures.
pub const TRACING_TARGET_RECOVERY_ERROR: &str = "pop_server::recovery::error";

/// Panic recovery including handler panics.
pub const TRACING_TARGET_RECOVERY_PANIC: &str = "pop_server::recovery::panic";

/// Error responses sent to clients.
pub const TRACING_TARGET_RESPONSE: &str = "pop_server::handler::response";
