//! # `localStorage` token store: browser-side persistence
//!
//! [`LocalStorageStore`] is the [`TokenStore`] used on the **web platform**. The
//! token lives under a single key (default `"token"`, see
//! [`crate::config::SessionConfig`]) in `window.localStorage`.
//!
//! ## Error handling
//!
//! `localStorage` can be missing (sandboxed iframes) or throw (quota, privacy
//! mode). Every failure is logged and swallowed: reads return `None`, writes do
//! nothing. The session then degrades to anonymous instead of breaking the UI.

use crate::token::{non_blank, TokenStore};

/// `window.localStorage`-backed TokenStore.
#[derive(Clone, Debug)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }

    fn storage(&self) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        match window.local_storage() {
            Ok(storage) => storage,
            Err(_) => {
                tracing::warn!("localStorage is not accessible");
                None
            }
        }
    }
}

impl TokenStore for LocalStorageStore {
    fn load(&self) -> Option<String> {
        let storage = self.storage()?;
        storage.get_item(&self.key).ok().flatten().and_then(non_blank)
    }

    fn save(&self, token: &str) {
        let Some(storage) = self.storage() else {
            return;
        };
        if storage.set_item(&self.key, token).is_err() {
            tracing::warn!("Failed to write token to localStorage");
        }
    }

    fn clear(&self) {
        let Some(storage) = self.storage() else {
            return;
        };
        if storage.remove_item(&self.key).is_err() {
            tracing::warn!("Failed to remove token from localStorage");
        }
    }
}
