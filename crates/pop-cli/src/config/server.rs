//! HTTP server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use anyhow::ensure;
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Port both surfaces listen on unless told otherwise.
pub const DEFAULT_PORT: u16 = 3000;

/// HTTP server configuration shared by both surfaces.
///
/// The listening port is not a flag here: each surface resolves it in its own
/// way and sets it with [`ServerConfig::with_port`].
///
/// # Environment Variables
///
/// - `HOST` - Server host address (default: 0.0.0.0)
/// - `SHUTDOWN_TIMEOUT` - Graceful shutdown timeout in seconds (default: 30, max: 300)
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct ServerConfig {
    /// Host address to bind the server to.
    ///
    /// Use "127.0.0.1" for localhost only, "0.0.0.0" for all interfaces.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// TCP port number for the server to listen on.
    #[arg(skip = DEFAULT_PORT)]
    pub port: u16,

    /// Maximum time in seconds to wait for graceful shutdown.
    ///
    /// After a shutdown signal the server stops accepting connections and
    /// waits up to this duration for in-flight requests. Valid range: 1-300 seconds.
    #[arg(long, env = "SHUTDOWN_TIMEOUT", default_value_t = 30)]
    pub shutdown_timeout: u64,
}

/// Default host address, all interfaces.
fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

impl ServerConfig {
    /// Sets the listening port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Validates the port and shutdown timeout.
    ///
    /// Any non-zero port is accepted, privileged ones included; the shutdown
    /// timeout must be 1-300 seconds.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.port != 0, "port must be non-zero");
        ensure!(
            (1..=300).contains(&self.shutdown_timeout),
            "shutdown timeout must be between 1 and 300 seconds, got {}",
            self.shutdown_timeout
        );
        Ok(())
    }

    /// Returns the complete socket address for server binding.
    #[must_use]
    pub const fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns the graceful shutdown timeout as a `Duration`.
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }

    /// Returns whether the server is configured to bind to all interfaces.
    #[must_use]
    pub const fn binds_to_all_interfaces(&self) -> bool {
        match self.host {
            IpAddr::V4(addr) => addr.is_unspecified(),
            IpAddr::V6(addr) => addr.is_unspecified(),
        }
    }

    /// Logs server configuration at info level.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            host = %self.host,
            port = self.port,
            shutdown_timeout_secs = self.shutdown_timeout,
            "Server configuration"
        );
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: DEFAULT_PORT,
            shutdown_timeout: 30,
        }
    }
}
