//! HTTP client for the news feed backend.

use reqwest::{Method, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};

use crate::auth::Credentials;
use crate::backend::NewsFeedBackend;
use crate::error::ApiError;
use crate::models::{
    CreatedPost, ErrorResponse, FeedResponse, FollowResponse, FollowingResponse, LoginResponse,
    PostRequest, RawPost, User, UsersResponse,
};

const UNEXPECTED: &str = "Unexpected error occurred.";

/// `reqwest`-backed [`NewsFeedBackend`].
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &store::ClientConfig) -> Self {
        Self::new(config.base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an `/api/...` path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, self.endpoint(path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and decode its JSON body with [`decode_reply`].
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        decode_reply(status, &body, fallback)
    }
}

/// Turn a status code and body into a decoded reply.
///
/// Non-2xx replies become [`ApiError::Status`], using the body's `error` field
/// when present and `fallback` otherwise. An empty body decodes as `{}`.
pub(crate) fn decode_reply<T: DeserializeOwned>(
    status: u16,
    body: &str,
    fallback: &str,
) -> Result<T, ApiError> {
    let body = if body.trim().is_empty() { "{}" } else { body };

    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|e| e.error)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        return Err(ApiError::Status { status, message });
    }

    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// The follow set, with a refused `/api/following` read as "follows nobody".
pub(crate) fn following_or_empty(
    reply: Result<FollowingResponse, ApiError>,
) -> Result<Vec<i64>, ApiError> {
    match reply {
        Ok(reply) => Ok(reply.following),
        Err(e) if e.status().is_some() => {
            tracing::warn!("Following list unavailable: {}; assuming none", e);
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

impl NewsFeedBackend for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let request = self.request(Method::POST, "/api/login", None).json(credentials);
        let reply: LoginResponse = self.send(request, UNEXPECTED).await?;
        match reply.token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(ApiError::Decode(
                reply.error.unwrap_or_else(|| "login response has no token".to_string()),
            )),
        }
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let request = self.request(Method::POST, "/api/register", None).json(credentials);
        let _: IgnoredAny = self.send(request, UNEXPECTED).await?;
        Ok(())
    }

    async fn following(&self, token: &str) -> Result<Vec<i64>, ApiError> {
        let request = self.request(Method::GET, "/api/following", Some(token));
        following_or_empty(self.send(request, "Failed to fetch following").await)
    }

    async fn users(&self, token: &str) -> Result<Vec<User>, ApiError> {
        let request = self.request(Method::GET, "/api/users", Some(token));
        let reply: UsersResponse = self.send(request, "Failed to fetch users").await?;
        Ok(reply.users)
    }

    async fn feed(&self, token: &str, page: u32, limit: u32) -> Result<Vec<RawPost>, ApiError> {
        let request = self
            .request(Method::GET, "/api/feed", Some(token))
            .query(&[("page", page), ("limit", limit)]);
        let reply: FeedResponse = self.send(request, "Failed to fetch feed").await?;
        Ok(reply.posts)
    }

    async fn create_post(&self, token: &str, content: &str) -> Result<CreatedPost, ApiError> {
        let request = self
            .request(Method::POST, "/api/posts", Some(token))
            .json(&PostRequest { content });
        self.send(request, "Failed to create post").await
    }

    async fn follow(&self, token: &str, user_id: i64) -> Result<FollowResponse, ApiError> {
        let request = self.request(Method::POST, &format!("/api/follow/{user_id}"), Some(token));
        self.send(request, "Failed to update follow state").await
    }

    async fn unfollow(&self, token: &str, user_id: i64) -> Result<FollowResponse, ApiError> {
        let request = self.request(Method::DELETE, &format!("/api/follow/{user_id}"), Some(token));
        self.send(request, "Failed to update follow state").await
    }
}
