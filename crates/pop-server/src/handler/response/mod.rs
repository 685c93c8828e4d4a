//! Response types for HTTP handlers.

mod errors;
mod status;

pub use errors::ErrorResponse;
pub use status::ServerStatus;
