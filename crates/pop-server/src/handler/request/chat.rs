//! Chat request types.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Request payload for posting a chat message.
///
/// Any JSON body is accepted. `username` and `content` are picked out of a
/// top-level object and kept exactly as sent, whatever their type; any other
/// body (array, string, number) yields a message with both fields absent.
#[must_use]
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostMessage {
    /// Display name of the author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<Value>,
    /// Message body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

impl PostMessage {
    /// Creates a request with both fields present.
    pub fn new(username: impl Into<Value>, content: impl Into<Value>) -> Self {
        Self {
            username: Some(username.into()),
            content: Some(content.into()),
        }
    }
}

impl From<Value> for PostMessage {
    fn from(body: Value) -> Self {
        Self {
            username: body.get("username").cloned(),
            content: body.get("content").cloned(),
        }
    }
}

impl<'de> Deserialize<'de> for PostMessage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from)
    }
}
