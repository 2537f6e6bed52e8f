use std::sync::{Arc, Mutex, MutexGuard};

use crate::token::{non_blank, TokenStore};

/// In-memory TokenStore for testing and as a fallback when no storage exists.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    token: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `token`.
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.save(token);
        store
    }

    fn slot(&self) -> MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Token store poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

impl TokenStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.slot().clone().and_then(non_blank)
    }

    fn save(&self, token: &str) {
        *self.slot() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.slot() = None;
    }
}
