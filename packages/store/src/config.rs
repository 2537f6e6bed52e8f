//! # Client configuration (`newsfeed.toml`)
//!
//! Defines the TOML file that the web launcher embeds at compile time
//! (filename: [`ClientConfig::filename`] = `"newsfeed.toml"`). It tells the
//! client where the backend lives, how the feed pages, and where the token is
//! persisted.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "https://news-feed-system-backend-production.up.railway.app"
//!
//! [feed]
//! page_size = 10            # posts per page
//! directory_ttl_secs = 0    # 0 refetches the user directory on every page
//!
//! [session]
//! token_key = "token"       # localStorage key
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ClientConfig`] | Top-level config. Builder helpers, TOML (de)serialisation, canonical filename. |
//! | [`ApiConfig`] | Backend base URL. |
//! | [`FeedConfig`] | Page size and user-directory cache lifetime. |
//! | [`SessionConfig`] | Storage key of the bearer token. |
//!
//! Every section has serde defaults, so a missing or empty file is equivalent to
//! [`ClientConfig::default`].

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `newsfeed.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Backend location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every `/api/...` path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "https://news-feed-system-backend-production.up.railway.app".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Feed paging configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Posts requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// How long a fetched user directory stays fresh. 0 disables caching.
    #[serde(default)]
    pub directory_ttl_secs: u32,
}

fn default_page_size() -> u32 {
    10
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            directory_ttl_secs: 0,
        }
    }
}

/// Session persistence configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_token_key")]
    pub token_key: String,
}

fn default_token_key() -> String {
    "token".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_key: default_token_key(),
        }
    }
}

impl ClientConfig {
    /// Builder method to point the client at another backend.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.api.base_url = base_url.to_string();
        self
    }

    /// Builder method to set the user-directory cache lifetime.
    pub fn with_directory_ttl(mut self, secs: u32) -> Self {
        self.feed.directory_ttl_secs = secs;
        self
    }

    /// Base URL without trailing slashes.
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "newsfeed.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Parse from TOML, falling back to defaults (with a warning) on error.
    pub fn from_toml_or_default(s: &str) -> Self {
        match Self::from_toml(s) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Invalid {}: {}; using defaults", Self::filename(), e);
                Self::default()
            }
        }
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
