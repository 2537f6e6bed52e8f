//! # Posts: raw records and feed view models
//!
//! The feed endpoint returns [`RawPost`] records that only carry the author's id.
//! The client joins them with the user directory and the follow set to build
//! [`Post`] view models (see [`crate::feed::FeedState::apply_page`]).
//!
//! `created_at` stays the server's string so an unparseable value never drops a
//! post; [`Post::timestamp`] parses it on demand for sorting and display.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CreatedPost, User};

/// Post record as returned by `GET /api/feed`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawPost {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "CreatedAt", default)]
    pub created_at: String,
}

/// A post joined with its author and the viewer's follow state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: i64,
    pub content: String,
    pub created_at: String,
    pub author_user_id: i64,
    pub author: User,
    /// Local projection of the follow graph, flipped optimistically on toggle.
    pub is_following_author: bool,
}

impl Post {
    /// Join a raw record with the directory and follow set.
    pub fn from_raw(raw: RawPost, directory: &HashMap<i64, User>, following: &HashSet<i64>) -> Self {
        let author = directory
            .get(&raw.user_id)
            .cloned()
            .unwrap_or_else(|| User::placeholder(raw.user_id));
        Self {
            id: raw.id,
            content: raw.content,
            created_at: raw.created_at,
            author_user_id: raw.user_id,
            is_following_author: following.contains(&author.id),
            author,
        }
    }

    /// Wrap a freshly created post with the local author and a client timestamp.
    ///
    /// The server's `CreatedAt` is discarded, so the displayed time can differ
    /// from what the backend recorded.
    pub fn from_created(created: CreatedPost, author: User, now: DateTime<Utc>) -> Self {
        Self {
            id: created.id,
            content: created.content,
            created_at: now.to_rfc3339(),
            author_user_id: author.id,
            author,
            is_following_author: false,
        }
    }

    /// Parsed creation time, `None` when the server string is not RFC 3339.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }
}

pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn raw_post_uses_backend_field_names() {
        let raw: RawPost = serde_json::from_str(
            r#"{"id": 3, "user_id": 9, "content": "hi", "CreatedAt": "2025-01-02T03:04:05Z"}"#,
        )
        .unwrap();
        assert_eq!(raw.user_id, 9);
        assert_eq!(raw.created_at, "2025-01-02T03:04:05Z");
    }

    #[test]
    fn join_falls_back_to_placeholder_author() {
        let mut directory = HashMap::new();
        directory.insert(1, User::new(1, "ada"));
        let following: HashSet<i64> = [1].into_iter().collect();

        let known = Post::from_raw(
            RawPost { id: 1, user_id: 1, content: "a".into(), created_at: String::new() },
            &directory,
            &following,
        );
        assert_eq!(known.author.username, "ada");
        assert!(known.is_following_author);

        let unknown = Post::from_raw(
            RawPost { id: 2, user_id: 5, content: "b".into(), created_at: String::new() },
            &directory,
            &following,
        );
        assert_eq!(unknown.author, User::placeholder(5));
        assert_eq!(unknown.author_user_id, 5);
        assert!(!unknown.is_following_author);
    }

    #[test]
    fn created_post_gets_client_timestamp() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let created = CreatedPost {
            id: 44,
            content: "fresh".into(),
            created_at: "1999-01-01T00:00:00Z".into(),
            user_id: None,
        };
        let post = Post::from_created(created, User::new(8, "me"), now);
        assert_eq!(post.timestamp(), Some(now));
        assert_eq!(post.author_user_id, 8);
        assert!(!post.is_following_author);
    }

    #[test]
    fn timestamp_accepts_offsets() {
        let post_time = parse_timestamp("2025-01-01T10:00:00+02:00").unwrap();
        assert_eq!(post_time, Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
