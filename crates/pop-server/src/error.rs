//! Library error types.
//!
//! These errors are raised while assembling a server from configuration.
//! Failures that happen while serving a request are rendered by
//! [`handler::Error`] instead.
//!
//! [`handler::Error`]: crate::handler::Error

use std::borrow::Cow;

/// Result type alias for library operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error raised when middleware configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A configuration option holds an unusable value.
    #[error("invalid {option}: {reason}")]
    InvalidConfig {
        /// Name of the offending option, as spelled on the command line.
        option: &'static str,
        /// Why the value was rejected.
        reason: Cow<'static, str>,
    },
}

impl Error {
    /// Creates a configuration error for the given option.
    #[inline]
    pub fn config(option: &'static str, reason: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidConfig {
            option,
            reason: reason.into(),
        }
    }

    /// Returns the name of the rejected option.
    #[must_use]
    pub fn option(&self) -> &'static str {
        match self {
            Self::InvalidConfig { option, .. } => option,
        }
    }
}
