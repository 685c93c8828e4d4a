#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for message store operations.
pub const TRACING_TARGET_STORE: &str = "pop_core::store";

mod message;
mod store;

pub use message::Message;
pub use store::MessageStore;
