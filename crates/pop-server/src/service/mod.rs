//! Application state and dependency injection.

use pop_core::MessageStore;

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection). Each running
/// surface owns one state; tests build a fresh one per case.
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone, Default)]
pub struct ServiceState {
    // Internal services:
    pub message_store: MessageStore,
}

impl ServiceState {
    /// Initializes application state with an empty message store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the message store, sharing the given one with handlers.
    pub fn with_message_store(mut self, message_store: MessageStore) -> Self {
        self.message_store = message_store;
        self
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// Internal services:
impl_di!(message_store: MessageStore);
