//! Shared constants used across the server crate.

/// Default maximum request body size: 100KB.
///
/// Chat messages are short free text; larger bodies are rejected before
/// they reach a handler.
pub const DEFAULT_MAX_BODY_SIZE: usize = 100 * 1024;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";
