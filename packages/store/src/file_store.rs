//! # Filesystem-backed token store
//!
//! [`FileStore`] keeps the bearer token in a single file so native builds retain
//! the session across restarts, the way the browser keeps it in `localStorage`.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── <key>          # the token, as UTF-8 text
//! ```
//!
//! ## Platform data directories
//!
//! [`FileStore::in_data_dir`] resolves the base through [`dirs::data_dir()`]:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/newsfeed/` |
//! | Linux | `~/.local/share/newsfeed/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\newsfeed\` |

use std::path::PathBuf;

use crate::token::{non_blank, TokenStore};

/// Filesystem-backed TokenStore for desktop targets.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
    key: String,
}

impl FileStore {
    pub fn new(base: PathBuf, key: &str) -> Self {
        Self {
            base,
            key: key.to_string(),
        }
    }

    /// Store under `<data_dir>/newsfeed/`, or the working directory when the
    /// platform has no data directory.
    pub fn in_data_dir(key: &str) -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("newsfeed");
        Self::new(base, key)
    }

    fn token_path(&self) -> PathBuf {
        self.base.join(&self.key)
    }
}

impl TokenStore for FileStore {
    fn load(&self) -> Option<String> {
        let content = std::fs::read_to_string(self.token_path()).ok()?;
        non_blank(content)
    }

    fn save(&self, token: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.base) {
            tracing::warn!("Failed to create token directory {}: {}", self.base.display(), e);
            return;
        }
        if let Err(e) = std::fs::write(self.token_path(), token) {
            tracing::warn!("Failed to persist token: {}", e);
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(self.token_path()) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove token file: {}", e),
        }
    }
}
