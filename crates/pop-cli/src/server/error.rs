//! Server start-up and runtime errors.

use std::io;
use std::net::SocketAddr;

/// Result type for server operations.
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Reasons the server can fail to start or stop serving.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The server configuration was rejected before binding.
    #[error("invalid server configuration: {0}")]
    InvalidConfig(String),

    /// The listening socket could not be opened.
    #[error("cannot listen on {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// Accepting connections failed after start-up.
    #[error("server stopped unexpectedly: {0}")]
    Serve(#[source] io::Error),
}

impl ServerError {
    /// Returns a hint for the operator, when one applies.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidConfig(_) => Some("run with --help to see accepted values"),
            Self::Bind { source, .. } => match source.kind() {
                io::ErrorKind::AddrInUse => {
                    Some("another process holds this port; pass a different --port")
                }
                io::ErrorKind::PermissionDenied => {
                    Some("ports below 1024 need elevated privileges or CAP_NET_BIND_SERVICE")
                }
                io::ErrorKind::AddrNotAvailable => Some("HOST is not an address of this machine"),
                _ => None,
            },
            Self::Serve(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use super::*;

    fn bind_error(kind: io::ErrorKind) -> ServerError {
        ServerError::Bind {
            address: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 3000),
            source: io::Error::new(kind, "bind failed"),
        }
    }

    #[test]
    fn bind_error_names_address() {
        let error = bind_error(io::ErrorKind::AddrInUse);
        assert_eq!(error.to_string(), "cannot listen on 0.0.0.0:3000: bind failed");
    }

    #[test]
    fn bind_failures_carry_suggestions() {
        assert!(bind_error(io::ErrorKind::AddrInUse).suggestion().is_some());
        assert!(bind_error(io::ErrorKind::PermissionDenied).suggestion().is_some());
        assert!(bind_error(io::ErrorKind::Other).suggestion().is_none());
    }

    #[test]
    fn serve_errors_have_no_suggestion() {
        let error = ServerError::Serve(io::Error::other("accept failed"));
        assert!(error.suggestion().is_none());
        assert!(std::error::Error::source(&error).is_some());
    }
}
