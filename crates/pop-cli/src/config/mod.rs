//! CLI configuration management.
//!
//! ```text
//! Cli
//! └── command: Command
//!     ├── status: StatusArgs   # --port / PORT
//!     └── chat: ChatArgs       # --port only
//!         ├── server: ServerConfig         # Host, shutdown
//!         └── middleware: MiddlewareConfig # CORS, OpenAPI, recovery/timeouts
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! # Status surface on port 8080
//! PORT=8080 pop status
//!
//! # Chat surface; PORT is ignored
//! pop chat --port 4000
//! ```

mod middleware;
mod server;

use std::fmt;
use std::process;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
pub use middleware::MiddlewareConfig;
use serde::{Deserialize, Serialize};
pub use server::{DEFAULT_PORT, ServerConfig};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::TRACING_TARGET_SERVER_STARTUP;

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "pop")]
#[command(about = "Pop! status and chat servers")]
#[command(version)]
pub struct Cli {
    /// The surface to run.
    #[command(subcommand)]
    pub command: Command,
}

/// One of the two independent HTTP surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Surface {
    /// `GET /` and `GET /status`.
    Status,
    /// `GET /chat` and `POST /chat`.
    Chat,
}

impl Surface {
    /// Returns the surface name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Chat => "chat",
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Available subcommands.
#[derive(Debug, Clone, Subcommand, Serialize, Deserialize)]
pub enum Command {
    /// Runs the status server (`GET /`, `GET /status`).
    Status(StatusArgs),
    /// Runs the chat server (`GET /chat`, `POST /chat`).
    Chat(ChatArgs),
}

/// Arguments for the status server.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct StatusArgs {
    /// TCP port to listen on.
    #[arg(short = 'p', long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration (CORS, OpenAPI, timeouts).
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,
}

/// Arguments for the chat server.
///
/// The chat server does not read `PORT` from the environment.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct ChatArgs {
    /// TCP port to listen on.
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration (CORS, OpenAPI, timeouts).
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,
}

impl Command {
    /// Returns the selected surface.
    pub const fn surface(&self) -> Surface {
        match self {
            Self::Status(_) => Surface::Status,
            Self::Chat(_) => Surface::Chat,
        }
    }

    /// Returns the server configuration with the surface's port applied.
    pub fn server_config(&self) -> ServerConfig {
        match self {
            Self::Status(args) => args.server.clone().with_port(args.port),
            Self::Chat(args) => args.server.clone().with_port(args.port),
        }
    }

    /// Returns the middleware configuration.
    pub fn middleware(&self) -> &MiddlewareConfig {
        match self {
            Self::Status(args) => &args.middleware,
            Self::Chat(args) => &args.middleware,
        }
    }
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded first so clap's `env` lookups can see its values.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.command
            .server_config()
            .validate()
            .context("invalid server configuration")?;
        self.command
            .middleware()
            .validate()
            .context("invalid middleware configuration")?;
        Ok(())
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::info!(
            target: TRACING_TARGET_SERVER_STARTUP,
            surface = %self.command.surface(),
            "Selected surface"
        );

        self.command.server_config().log();
        self.command.middleware().log();
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn chat_defaults_to_port_3000() {
        let cli = Cli::try_parse_from(["pop", "chat"]).unwrap();
        assert_eq!(cli.command.surface(), Surface::Chat);
        assert_eq!(cli.command.server_config().port, 3000);
    }

    #[test]
    fn chat_port_flag_is_honoured() {
        let cli = Cli::try_parse_from(["pop", "chat", "--port", "4000"]).unwrap();
        assert_eq!(cli.command.server_config().port, 4000);
    }

    #[test]
    fn status_port_flag_is_honoured() {
        let cli = Cli::try_parse_from(["pop", "status", "-p", "8080"]).unwrap();
        assert_eq!(cli.command.surface(), Surface::Status);
        assert_eq!(cli.command.server_config().port, 8080);
    }

    #[test]
    fn cors_origins_are_comma_separated() {
        let cli = Cli::try_parse_from([
            "pop",
            "chat",
            "--allowed-origins",
            "https://a.example,https://b.example",
        ])
        .unwrap();
        assert_eq!(cli.command.middleware().cors.allowed_origins.len(), 2);
    }

    #[test]
    fn privileged_port_passes_validation() {
        let cli = Cli::try_parse_from(["pop", "status", "--port", "80"]).unwrap();
        assert!(cli.validate().is_ok());
        assert_eq!(cli.command.server_config().port, 80);
    }

    #[test]
    fn only_status_reads_port_from_environment() {
        let cli = Cli::command();
        let port_env = |surface: &str| {
            cli.find_subcommand(surface)
                .and_then(|command| command.get_arguments().find(|arg| arg.get_id() == "port"))
                .map(|arg| arg.get_env().map(|env| env.to_os_string()))
        };

        assert_eq!(port_env("status"), Some(Some("PORT".into())));
        assert_eq!(port_env("chat"), Some(None));
    }

    #[test]
    fn surface_names() {
        assert_eq!(Surface::Status.to_string(), "status");
        assert_eq!(Surface::Chat.to_string(), "chat");
    }
}
