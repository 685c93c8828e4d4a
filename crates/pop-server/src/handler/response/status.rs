//! Status response types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Liveness payload returned by `GET /status`.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    /// Always `online` while the process is serving.
    pub status: String,
    /// Human-readable confirmation.
    pub message: String,
}

impl ServerStatus {
    /// Returns the fixed online status.
    pub fn online() -> Self {
        Self {
            status: "online".to_owned(),
            message: "Pop! server is working".to_owned(),
        }
    }
}

impl Default for ServerStatus {
    fn default() -> Self {
        Self::online()
    }
}
