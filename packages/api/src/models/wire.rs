//! Request and response envelopes of the backend REST API.

use serde::{Deserialize, Serialize};

use super::{RawPost, User};

/// `POST /api/login` reply.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    pub token: Option<String>,
    pub error: Option<String>,
}

/// Error body any endpoint may return with a non-2xx status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
}

/// `GET /api/following` reply.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FollowingResponse {
    #[serde(default)]
    pub following: Vec<i64>,
}

/// `GET /api/users` reply.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub users: Vec<User>,
}

/// `GET /api/feed` reply.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub posts: Vec<RawPost>,
}

/// `POST /api/posts` body.
#[derive(Debug, Clone, Serialize)]
pub struct PostRequest<'a> {
    pub content: &'a str,
}

/// `POST /api/posts` reply.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CreatedPost {
    pub id: i64,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "CreatedAt", default)]
    pub created_at: String,
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// `POST`/`DELETE /api/follow/{id}` reply.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FollowResponse {
    pub message: Option<String>,
}
