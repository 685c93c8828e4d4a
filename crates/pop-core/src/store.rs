//! In-memory, append-only message log.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::{Message, TRACING_TARGET_STORE};

/// Ordered, in-memory collection of chat messages.
///
/// Insertion order is display order. Messages are never updated or removed and
/// live only as long as the process. Clones share the same underlying log, so a
/// store can be handed to request handlers as injected state while tests build
/// a fresh, empty one per case.
#[must_use = "store does nothing unless you use it"]
#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl MessageStore {
    /// Creates a new empty store.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a message from the given fields and appends it to the log.
    ///
    /// No constraints are enforced: either field may hold any JSON value or be
    /// absent. The id and time are assigned while the log is locked, so times
    /// never decrease along the log. Returns the message exactly as stored.
    pub async fn append(&self, username: Option<Value>, content: Option<Value>) -> Message {
        let mut messages = self.messages.write().await;

        let message = Message::new(username, content);
        messages.push(message.clone());

        tracing::debug!(
            target: TRACING_TARGET_STORE,
            message_id = %message.id,
            stored = messages.len(),
            "message appended"
        );

        message
    }

    /// Returns every stored message in insertion order.
    pub async fn list(&self) -> Vec<Message> {
        self.messages.read().await.clone()
    }

    /// Returns the number of stored messages.
    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    /// Returns whether the store holds no messages.
    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }
}
