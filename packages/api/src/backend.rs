//! # Backend seam
//!
//! [`NewsFeedBackend`] lists the REST operations the client consumes, one method
//! per endpoint. [`crate::ApiClient`] implements it over HTTP; the in-memory
//! [`crate::MemoryBackend`] implements it for tests. Everything above this trait
//! (the feed loader, the UI) is generic over it.
//!
//! | Method | Endpoint |
//! |--------|----------|
//! | [`login`](NewsFeedBackend::login) | `POST /api/login` |
//! | [`register`](NewsFeedBackend::register) | `POST /api/register` |
//! | [`following`](NewsFeedBackend::following) | `GET /api/following` |
//! | [`users`](NewsFeedBackend::users) | `GET /api/users` |
//! | [`feed`](NewsFeedBackend::feed) | `GET /api/feed?page&limit` |
//! | [`create_post`](NewsFeedBackend::create_post) | `POST /api/posts` |
//! | [`follow`](NewsFeedBackend::follow) / [`unfollow`](NewsFeedBackend::unfollow) | `POST`/`DELETE /api/follow/{id}` |
//!
//! The futures are not `Send`: in the browser everything runs on the single UI
//! thread.

use std::future::Future;

use crate::auth::Credentials;
use crate::error::ApiError;
use crate::models::{CreatedPost, FollowResponse, RawPost, User};

/// Async interface to the news feed backend.
pub trait NewsFeedBackend {
    /// Exchange credentials for a bearer token.
    fn login(&self, credentials: &Credentials) -> impl Future<Output = Result<String, ApiError>>;

    fn register(&self, credentials: &Credentials) -> impl Future<Output = Result<(), ApiError>>;

    /// Ids the token's owner follows.
    fn following(&self, token: &str) -> impl Future<Output = Result<Vec<i64>, ApiError>>;

    /// The full user directory.
    fn users(&self, token: &str) -> impl Future<Output = Result<Vec<User>, ApiError>>;

    /// One page of posts; an empty vector means there are no more pages.
    fn feed(
        &self,
        token: &str,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<RawPost>, ApiError>>;

    fn create_post(
        &self,
        token: &str,
        content: &str,
    ) -> impl Future<Output = Result<CreatedPost, ApiError>>;

    fn follow(&self, token: &str, user_id: i64) -> impl Future<Output = Result<FollowResponse, ApiError>>;

    fn unfollow(
        &self,
        token: &str,
        user_id: i64,
    ) -> impl Future<Output = Result<FollowResponse, ApiError>>;
}
