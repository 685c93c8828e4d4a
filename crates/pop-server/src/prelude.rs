//! Prelude module for pop-server.
//!
//! Re-exports the types needed to assemble and serve either surface with a
//! single `use` statement.
//!
//! # Example
//!
//! ```rust
//! use pop_server::prelude::*;
//! ```

pub use crate::extract::*;
pub use crate::handler::{CustomRoutes, chat_routes, status_routes};
pub use crate::middleware::*;
pub use crate::service::*;
