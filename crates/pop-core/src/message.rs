//! Chat message type.

use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A single chat entry.
///
/// Username and content are stored exactly as the client sent them, whatever
/// their JSON type. A field that was absent on creation stays absent and is
/// omitted from the serialized form; an explicit `null` is kept as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique identifier generated on creation.
    pub id: Uuid,
    /// Name of the sender, if one was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<Value>,
    /// Message text, if any was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    /// Creation time, as Unix epoch milliseconds on the wire.
    #[serde(with = "jiff::fmt::serde::timestamp::millisecond::required")]
    #[cfg_attr(feature = "schema", schemars(with = "i64"))]
    pub time: Timestamp,
}

impl Message {
    /// Creates a message with a fresh id, stamped with the current time.
    pub fn new(username: Option<Value>, content: Option<Value>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            content,
            time: Timestamp::now(),
        }
    }

    /// Returns the creation time in Unix epoch milliseconds.
    #[inline]
    pub fn time_millis(&self) -> i64 {
        self.time.as_millisecond()
    }
}
