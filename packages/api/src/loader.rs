//! # Feed loader: the three requests behind every page
//!
//! [`FeedLoader::fetch_page`] performs, strictly in order:
//!
//! 1. `GET /api/following`: the viewer's follow set (refreshed wholesale),
//! 2. `GET /api/users`: the author directory, unless [`DirectoryCache`] still
//!    holds a fresh copy,
//! 3. `GET /api/feed?page&limit`: one page of raw posts.
//!
//! A load is [`start_load`] (guard), `fetch_page`, then [`finish_load`], which
//! merges the [`FeedPage`] or releases the guard on error. Nothing is retried
//! here; the previous state stays as it was until the next trigger. The UI
//! runs the same three steps around its signals.
//!
//! The loader also wraps the two write paths that patch the feed optimistically:
//! [`toggle_follow`](FeedLoader::toggle_follow) and
//! [`create_post`](FeedLoader::create_post).

use chrono::{DateTime, Utc};

use crate::auth::Session;
use crate::backend::NewsFeedBackend;
use crate::compose::validate_content;
use crate::directory::DirectoryCache;
use crate::error::ApiError;
use crate::feed::{FeedPage, FeedState};
use crate::models::{FollowResponse, Post};

pub struct FeedLoader<B> {
    backend: B,
    page_size: u32,
    directory: DirectoryCache,
}

impl<B: NewsFeedBackend> FeedLoader<B> {
    pub fn new(backend: B, page_size: u32, directory_ttl_secs: u32) -> Self {
        Self {
            backend,
            page_size: page_size.max(1),
            directory: DirectoryCache::new(directory_ttl_secs),
        }
    }

    pub fn from_config(backend: B, config: &store::ClientConfig) -> Self {
        Self::new(backend, config.feed.page_size, config.feed.directory_ttl_secs)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn directory(&self) -> &DirectoryCache {
        &self.directory
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetch the follow set, the directory and one page of posts.
    pub async fn fetch_page(&self, session: &Session, page: u32) -> Result<FeedPage, ApiError> {
        let token = authenticated(session)?;

        let following = self.backend.following(token).await?;

        let directory = match self.directory.get(Utc::now()) {
            Some(directory) => directory,
            None => {
                let users = self.backend.users(token).await?;
                self.directory.store(users, Utc::now())
            }
        };

        let posts = self.backend.feed(token, page, self.page_size).await?;
        tracing::debug!("Fetched page {} ({} posts)", page, posts.len());

        Ok(FeedPage {
            page,
            following: following.into_iter().collect(),
            directory,
            posts,
        })
    }

    /// Run one guarded load against `state`: [`start_load`], [`Self::fetch_page`],
    /// then [`finish_load`].
    ///
    /// Returns `Ok(false)` when the guard refused to start a load.
    pub async fn load_into(&self, state: &mut FeedState, session: &mut Session) -> Result<bool, ApiError> {
        let Some(page) = start_load(state, session) else {
            return Ok(false);
        };
        let fetched = self.fetch_page(session, page).await;
        finish_load(state, session, fetched).map(|()| true)
    }

    /// Follow or unfollow `user_id`, depending on the current local state.
    ///
    /// The caller flips its state only after this succeeds.
    pub async fn toggle_follow(
        &self,
        session: &Session,
        user_id: i64,
        currently_following: bool,
    ) -> Result<FollowResponse, ApiError> {
        let token = authenticated(session)?;
        if currently_following {
            self.backend.unfollow(token, user_id).await
        } else {
            self.backend.follow(token, user_id).await
        }
    }

    /// Create a post and wrap it for the feed with the local author and `now`.
    pub async fn create_post(
        &self,
        session: &Session,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Post, ApiError> {
        let content = validate_content(content)?;
        let token = authenticated(session)?;
        let author = session.author().ok_or(ApiError::Unauthenticated)?;
        let created = self.backend.create_post(token, content).await?;
        Ok(Post::from_created(created, author, now))
    }
}

/// What to tell the viewer after a follow toggle succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowNotice {
    /// Server confirmation of a new follow.
    Followed(String),
    Unfollowed,
}

impl FollowNotice {
    /// The notice for a reply, or `None` for a follow the server sent no message for.
    pub fn for_reply(was_following: bool, reply: FollowResponse) -> Option<Self> {
        if was_following {
            return Some(FollowNotice::Unfollowed);
        }
        reply
            .message
            .filter(|m| !m.trim().is_empty())
            .map(FollowNotice::Followed)
    }

    pub fn message(&self) -> &str {
        match self {
            FollowNotice::Followed(message) => message,
            FollowNotice::Unfollowed => "You unfollowed this user.",
        }
    }
}

/// Claim the feed's in-flight guard for a signed-in session.
///
/// Returns the page to fetch, or `None` when there is no session or
/// [`FeedState::begin_load`] refuses.
pub fn start_load(state: &mut FeedState, session: &Session) -> Option<u32> {
    if !session.is_authenticated() {
        return None;
    }
    state.begin_load()
}

/// Apply the outcome of a fetch started by [`start_load`].
///
/// On success the page is merged and `session` learns its username from the
/// directory. On failure the guard is released so the page can be retried.
pub fn finish_load(
    state: &mut FeedState,
    session: &mut Session,
    fetched: Result<FeedPage, ApiError>,
) -> Result<(), ApiError> {
    match fetched {
        Ok(fetched) => {
            if session.learn_username(fetched.directory.values()) {
                tracing::debug!("Username resolved from directory");
            }
            state.apply_page(fetched);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Error fetching feed: {}", e);
            state.fail_load();
            Err(e)
        }
    }
}

fn authenticated(session: &Session) -> Result<&str, ApiError> {
    match (session.token(), session.user_id) {
        (Some(token), Some(_)) => Ok(token),
        _ => Err(ApiError::Unauthenticated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::memory::{Endpoint, MemoryBackend};

    struct Fixture {
        backend: MemoryBackend,
        me: i64,
        ada: i64,
        bob: i64,
    }

    /// Me plus two authors with 25 posts spread over distinct minutes.
    fn fixture() -> Fixture {
        let backend = MemoryBackend::new();
        let me = backend.add_user("me");
        let ada = backend.add_user("ada");
        let bob = backend.add_user("bob");
        for i in 0..25 {
            let author = if i % 2 == 0 { ada } else { bob };
            backend.add_post(author, &format!("post {i}"), &format!("2025-01-01T10:{i:02}:00Z"));
        }
        Fixture { backend, me, ada, bob }
    }

    fn session_for(id: i64) -> Session {
        Session::from_token(Some(MemoryBackend::token_for(id)))
    }

    #[tokio::test]
    async fn pages_until_exhausted() {
        let f = fixture();
        let loader = FeedLoader::new(f.backend.clone(), 10, 0);
        let mut state = FeedState::new();
        let mut session = session_for(f.me);

        assert!(loader.load_into(&mut state, &mut session).await.unwrap());
        assert_eq!(state.posts.len(), 10);
        assert_eq!(session.display_name(), "me");

        while state.advance() {
            loader.load_into(&mut state, &mut session).await.unwrap();
            let unique: std::collections::HashSet<i64> = state.posts.iter().map(|p| p.id).collect();
            assert_eq!(unique.len(), state.posts.len());
            for pair in state.posts.windows(2) {
                assert!(pair[0].timestamp() > pair[1].timestamp());
            }
        }

        assert_eq!(state.posts.len(), 25);
        assert!(!state.has_more);
        // Pages 1-3 have posts, page 4 is empty
        assert_eq!(f.backend.requests(Endpoint::Feed), 4);

        // Further scroll triggers issue nothing
        assert!(!state.advance());
        assert!(!loader.load_into(&mut state, &mut session).await.unwrap());
        assert_eq!(f.backend.requests(Endpoint::Feed), 4);
    }

    #[tokio::test]
    async fn directory_and_follow_set_refetched_per_page() {
        let f = fixture();
        let loader = FeedLoader::new(f.backend.clone(), 10, 0);
        let mut state = FeedState::new();
        let mut session = session_for(f.me);

        loader.load_into(&mut state, &mut session).await.unwrap();
        state.advance();
        loader.load_into(&mut state, &mut session).await.unwrap();

        assert_eq!(f.backend.requests(Endpoint::Following), 2);
        assert_eq!(f.backend.requests(Endpoint::Users), 2);
    }

    #[tokio::test]
    async fn cached_directory_skips_users_request() {
        let f = fixture();
        let loader = FeedLoader::new(f.backend.clone(), 10, 300);
        let mut state = FeedState::new();
        let mut session = session_for(f.me);

        loader.load_into(&mut state, &mut session).await.unwrap();
        state.advance();
        loader.load_into(&mut state, &mut session).await.unwrap();
        assert_eq!(f.backend.requests(Endpoint::Users), 1);

        loader.directory().invalidate();
        state.advance();
        loader.load_into(&mut state, &mut session).await.unwrap();
        assert_eq!(f.backend.requests(Endpoint::Users), 2);
    }

    #[tokio::test]
    async fn failed_request_leaves_state_untouched() {
        let f = fixture();
        let loader = FeedLoader::new(f.backend.clone(), 10, 0);
        let mut state = FeedState::new();
        let mut session = session_for(f.me);

        loader.load_into(&mut state, &mut session).await.unwrap();
        let before = state.posts.clone();

        f.backend.set_failing(Endpoint::Feed, true);
        state.advance();
        assert!(loader.load_into(&mut state, &mut session).await.is_err());
        assert_eq!(state.posts, before);
        assert!(!state.loading);

        // Scrolling again retries the same page
        f.backend.set_failing(Endpoint::Feed, false);
        assert!(state.advance());
        assert!(loader.load_into(&mut state, &mut session).await.unwrap());
        assert_eq!(state.posts.len(), 20);
    }

    #[tokio::test]
    async fn split_load_matches_the_ui_sequence() {
        let f = fixture();
        let loader = FeedLoader::new(f.backend.clone(), 10, 0);
        let mut state = FeedState::new();
        let mut session = session_for(f.me);

        let page = start_load(&mut state, &session).unwrap();
        assert_eq!(page, 1);
        // A second trigger while the first fetch is pending is refused
        assert_eq!(start_load(&mut state, &session), None);

        let snapshot = session.clone();
        let fetched = loader.fetch_page(&snapshot, page).await;
        finish_load(&mut state, &mut session, fetched).unwrap();
        assert_eq!(state.posts.len(), 10);
        assert_eq!(session.display_name(), "me");
        assert!(!state.loading);

        f.backend.set_failing(Endpoint::Following, true);
        assert!(state.advance());
        let page = start_load(&mut state, &session).unwrap();
        let fetched = loader.fetch_page(&session, page).await;
        assert!(finish_load(&mut state, &mut session, fetched).is_err());
        assert_eq!(state.posts.len(), 10);
        assert!(!state.loading);
        assert_eq!(state.loaded_page(), 1);

        f.backend.set_failing(Endpoint::Following, false);
        assert!(state.advance());
        assert_eq!(start_load(&mut state, &session), Some(2));
    }

    #[tokio::test]
    async fn anonymous_session_never_loads() {
        let f = fixture();
        let loader = FeedLoader::new(f.backend.clone(), 10, 0);
        let mut state = FeedState::new();
        let mut session = Session::from_token(Some("garbage".to_string()));

        assert!(!loader.load_into(&mut state, &mut session).await.unwrap());
        assert_eq!(start_load(&mut state, &session), None);
        assert!(!state.loading);
        assert_eq!(f.backend.requests(Endpoint::Feed), 0);
        assert!(matches!(
            loader.fetch_page(&session, 1).await,
            Err(ApiError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn toggle_follow_updates_all_posts_by_author() {
        let f = fixture();
        let loader = FeedLoader::new(f.backend.clone(), 10, 0);
        let mut state = FeedState::new();
        let mut session = session_for(f.me);
        loader.load_into(&mut state, &mut session).await.unwrap();

        let post = state.posts.iter().find(|p| p.author.id == f.ada).unwrap().clone();
        loader
            .toggle_follow(&session, f.ada, post.is_following_author)
            .await
            .unwrap();
        state.set_following(f.ada, !post.is_following_author);

        assert!(f.backend.follows(f.me, f.ada));
        for p in &state.posts {
            assert_eq!(p.is_following_author, p.author.id == f.ada, "post {}", p.id);
        }

        // Next page load sees the server-side follow set
        state.advance();
        loader.load_into(&mut state, &mut session).await.unwrap();
        assert!(state.following.contains(&f.ada));
        assert!(!state.following.contains(&f.bob));
    }

    #[tokio::test]
    async fn failed_toggle_changes_nothing() {
        let f = fixture();
        let loader = FeedLoader::new(f.backend.clone(), 10, 0);
        let session = session_for(f.me);

        f.backend.set_failing(Endpoint::Follow, true);
        assert!(loader.toggle_follow(&session, f.bob, false).await.is_err());
        assert!(!f.backend.follows(f.me, f.bob));

        f.backend.set_follow(f.me, f.bob);
        loader.toggle_follow(&session, f.bob, true).await.unwrap();
        assert!(!f.backend.follows(f.me, f.bob));
        assert_eq!(f.backend.requests(Endpoint::Unfollow), 1);
    }

    #[tokio::test]
    async fn follow_notice_per_direction() {
        let f = fixture();
        let loader = FeedLoader::new(f.backend.clone(), 10, 0);
        let session = session_for(f.me);

        let reply = loader.toggle_follow(&session, f.ada, false).await.unwrap();
        let notice = FollowNotice::for_reply(false, reply).unwrap();
        assert_eq!(notice.message(), "Followed successfully");

        let reply = loader.toggle_follow(&session, f.ada, true).await.unwrap();
        assert_eq!(FollowNotice::for_reply(true, reply), Some(FollowNotice::Unfollowed));
        assert_eq!(FollowNotice::Unfollowed.message(), "You unfollowed this user.");

        let silent = FollowResponse { message: Some("  ".to_string()) };
        assert_eq!(FollowNotice::for_reply(false, silent), None);
        assert_eq!(FollowNotice::for_reply(false, FollowResponse::default()), None);
    }

    #[tokio::test]
    async fn create_post_uses_local_author_and_clock() {
        let f = fixture();
        let loader = FeedLoader::new(f.backend.clone(), 10, 0);
        let mut session = session_for(f.me);
        session.username = Some("me".to_string());
        let now = Utc::now();

        let post = loader.create_post(&session, "hello world", now).await.unwrap();
        assert_eq!(post.author.username, "me");
        assert_eq!(post.author_user_id, f.me);
        assert_eq!(post.timestamp().map(|t| t.timestamp()), Some(now.timestamp()));

        let mut state = FeedState::new();
        state.prepend(post.clone());
        assert_eq!(state.posts[0].id, post.id);
    }

    #[tokio::test]
    async fn blank_or_anonymous_posts_send_nothing() {
        let f = fixture();
        let loader = FeedLoader::new(f.backend.clone(), 10, 0);

        let err = loader
            .create_post(&session_for(f.me), "   ", Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(ValidationError::EmptyPost)));

        let err = loader
            .create_post(&Session::anonymous(), "hi", Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));

        assert_eq!(f.backend.requests(Endpoint::CreatePost), 0);
    }
}
