//! Enhanced HTTP request extractors with improved error handling.
//!
//! - [`Json`] - JSON deserialization whose rejections render as JSON errors
//!
//! Application state is extracted with plain [`axum::extract::State`].

mod json;

pub use crate::extract::json::Json;
