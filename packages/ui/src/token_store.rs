//! Shared token store constructor for all platforms.
//!
//! Returns the [`store::TokenStore`] appropriate for the build:
//! - **Web** (WASM + `web` feature): `window.localStorage` via [`store::LocalStorageStore`]
//! - **Native**: a file under the platform data directory via [`store::FileStore`]
//! - **WASM without `web`**: memory only via [`store::MemoryStore`]

use store::ClientConfig;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformTokenStore = store::LocalStorageStore;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformTokenStore = store::MemoryStore;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformTokenStore = store::FileStore;

/// Create the platform token store, keyed by `session.token_key`.
pub fn make_token_store(config: &ClientConfig) -> PlatformTokenStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorageStore::new(&config.session.token_key)
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        let _ = config;
        store::MemoryStore::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        store::FileStore::in_data_dir(&config.session.token_key)
    }
}
