//! # User directory entries
//!
//! [`User`] is the client's whole view of an account: an id and a display name,
//! sourced wholesale from `GET /api/users`. The client never edits users.
//!
//! Posts whose author is missing from the directory are attributed to
//! [`User::placeholder`], which keeps the id (so follow toggles still target
//! the right account) but has an empty username.

use serde::{Deserialize, Serialize};

/// A user as listed by the directory endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: String,
}

impl User {
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }

    /// Stand-in for an author id the directory does not know.
    pub fn placeholder(id: i64) -> Self {
        Self {
            id,
            username: String::new(),
        }
    }

    /// Name to render, falling back to `User <id>` when the directory had none.
    pub fn display_name(&self) -> String {
        if self.username.is_empty() {
            format!("User {}", self.id)
        } else {
            self.username.clone()
        }
    }
}
