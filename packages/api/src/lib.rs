//! # API crate: everything between the widgets and the backend
//!
//! This crate holds the news feed client's behaviour with no rendering in it, so
//! it can be tested natively and shared by any frontend package.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Credential validation for the login/register forms, and [`Session`] bootstrap from the stored token |
//! | [`backend`] | The [`NewsFeedBackend`] trait, one async method per REST endpoint |
//! | [`client`] | [`ApiClient`], the `reqwest` implementation of the backend |
//! | [`compose`] | [`Composer`], the 200-character create-post draft |
//! | [`directory`] | [`DirectoryCache`], an optional time-bounded cache of the user directory |
//! | [`error`] | [`ApiError`] and [`ValidationError`] |
//! | [`feed`] | [`FeedState`], the paged, de-duplicated, follow-annotated post list |
//! | [`loader`] | [`FeedLoader`], the request sequence behind each page and the optimistic write paths |
//! | [`memory`] | [`MemoryBackend`], an in-memory backend for tests |
//! | [`models`] | Wire records and view models |
//! | [`time`] | [`format_relative_time`] |
//!
//! ## Trust boundary
//!
//! The client decodes the user id from the token without verifying it. That id
//! only decides what the UI shows (own posts, author of new posts); the backend
//! authorises every request from the bearer token itself.

pub mod auth;
pub mod backend;
pub mod client;
pub mod compose;
pub mod directory;
pub mod error;
pub mod feed;
pub mod loader;
pub mod memory;
pub mod models;
pub mod time;

pub use auth::{AuthMode, Credentials, Session};
pub use backend::NewsFeedBackend;
pub use client::ApiClient;
pub use compose::{Composer, MAX_POST_CHARS};
pub use directory::DirectoryCache;
pub use error::{ApiError, ValidationError};
pub use feed::{FeedFilter, FeedPage, FeedState};
pub use loader::{finish_load, start_load, FeedLoader, FollowNotice};
pub use memory::MemoryBackend;
pub use models::{Post, RawPost, User};
pub use time::format_relative_time;
