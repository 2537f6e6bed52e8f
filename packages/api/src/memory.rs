use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::auth::{decode_user_id, Credentials};
use crate::backend::NewsFeedBackend;
use crate::error::ApiError;
use crate::models::{CreatedPost, FollowResponse, RawPost, User};

/// Endpoints of [`MemoryBackend`], used for request counting and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    Register,
    Following,
    Users,
    Feed,
    CreatePost,
    Follow,
    Unfollow,
}

#[derive(Debug, Default)]
struct MemoryState {
    accounts: HashMap<String, (String, i64)>,
    users: Vec<User>,
    posts: Vec<RawPost>,
    follows: HashMap<i64, HashSet<i64>>,
    requests: HashMap<Endpoint, usize>,
    failing: HashSet<Endpoint>,
    clock: i64,
}

/// In-memory NewsFeedBackend for testing.
///
/// Tokens it issues are real three-part tokens whose payload carries
/// `user_id`, so they go through the same session decoding as production ones.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        // Tests only; a poisoned lock means an earlier assertion already failed.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Unsigned token for `user_id`, shaped like the backend's.
    pub fn token_for(user_id: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"user_id":"{user_id}"}}"#));
        format!("{header}.{payload}.unsigned")
    }

    /// Add a user to the directory and return its id.
    pub fn add_user(&self, username: &str) -> i64 {
        let mut state = self.state();
        let id = state.users.len() as i64 + 1;
        state.users.push(User::new(id, username));
        id
    }

    /// Add a post with an explicit creation time.
    pub fn add_post(&self, user_id: i64, content: &str, created_at: &str) -> i64 {
        let mut state = self.state();
        let id = state.posts.len() as i64 + 1;
        state.posts.push(RawPost {
            id,
            user_id,
            content: content.to_string(),
            created_at: created_at.to_string(),
        });
        id
    }

    pub fn set_follow(&self, follower: i64, followee: i64) {
        self.state().follows.entry(follower).or_default().insert(followee);
    }

    pub fn follows(&self, follower: i64, followee: i64) -> bool {
        self.state()
            .follows
            .get(&follower)
            .is_some_and(|set| set.contains(&followee))
    }

    /// Number of requests served (or refused) for an endpoint.
    pub fn requests(&self, endpoint: Endpoint) -> usize {
        self.state().requests.get(&endpoint).copied().unwrap_or(0)
    }

    /// Make every call to `endpoint` answer HTTP 500 until reset.
    pub fn set_failing(&self, endpoint: Endpoint, failing: bool) {
        let mut state = self.state();
        if failing {
            state.failing.insert(endpoint);
        } else {
            state.failing.remove(&endpoint);
        }
    }

    fn enter(&self, endpoint: Endpoint) -> Result<MutexGuard<'_, MemoryState>, ApiError> {
        let mut state = self.state();
        *state.requests.entry(endpoint).or_default() += 1;
        if state.failing.contains(&endpoint) {
            return Err(ApiError::Status {
                status: 500,
                message: "injected failure".to_string(),
            });
        }
        Ok(state)
    }

    fn caller(token: &str) -> Result<i64, ApiError> {
        decode_user_id(token).ok_or(ApiError::Status {
            status: 401,
            message: "invalid token".to_string(),
        })
    }
}

impl NewsFeedBackend for MemoryBackend {
    async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let state = self.enter(Endpoint::Login)?;
        match state.accounts.get(&credentials.username) {
            Some((password, id)) if *password == credentials.password => Ok(Self::token_for(*id)),
            _ => Err(ApiError::Status {
                status: 401,
                message: "invalid credentials".to_string(),
            }),
        }
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let mut state = self.enter(Endpoint::Register)?;
        if state.accounts.contains_key(&credentials.username) {
            return Err(ApiError::Status {
                status: 409,
                message: "username already taken".to_string(),
            });
        }
        let id = state.users.len() as i64 + 1;
        state.users.push(User::new(id, credentials.username.clone()));
        state
            .accounts
            .insert(credentials.username.clone(), (credentials.password.clone(), id));
        Ok(())
    }

    async fn following(&self, token: &str) -> Result<Vec<i64>, ApiError> {
        let state = self.enter(Endpoint::Following)?;
        let me = Self::caller(token)?;
        let mut ids: Vec<i64> = state.follows.get(&me).into_iter().flatten().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn users(&self, token: &str) -> Result<Vec<User>, ApiError> {
        let state = self.enter(Endpoint::Users)?;
        Self::caller(token)?;
        Ok(state.users.clone())
    }

    async fn feed(&self, token: &str, page: u32, limit: u32) -> Result<Vec<RawPost>, ApiError> {
        let state = self.enter(Endpoint::Feed)?;
        Self::caller(token)?;
        let mut posts = state.posts.clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let start = (page.saturating_sub(1) * limit) as usize;
        Ok(posts.into_iter().skip(start).take(limit as usize).collect())
    }

    async fn create_post(&self, token: &str, content: &str) -> Result<CreatedPost, ApiError> {
        let mut state = self.enter(Endpoint::CreatePost)?;
        let me = Self::caller(token)?;
        state.clock += 1;
        let id = state.posts.len() as i64 + 1;
        let created_at = format!("2000-01-01T00:00:{:02}Z", state.clock % 60);
        state.posts.push(RawPost {
            id,
            user_id: me,
            content: content.to_string(),
            created_at: created_at.clone(),
        });
        Ok(CreatedPost {
            id,
            content: content.to_string(),
            created_at,
            user_id: Some(me),
        })
    }

    async fn follow(&self, token: &str, user_id: i64) -> Result<FollowResponse, ApiError> {
        let mut state = self.enter(Endpoint::Follow)?;
        let me = Self::caller(token)?;
        state.follows.entry(me).or_default().insert(user_id);
        Ok(FollowResponse {
            message: Some("Followed successfully".to_string()),
        })
    }

    async fn unfollow(&self, token: &str, user_id: i64) -> Result<FollowResponse, ApiError> {
        let mut state = self.enter(Endpoint::Unfollow)?;
        let me = Self::caller(token)?;
        if let Some(set) = state.follows.get_mut(&me) {
            set.remove(&user_id);
        }
        Ok(FollowResponse { message: None })
    }
}
