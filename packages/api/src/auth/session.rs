//! # Session bootstrap from a persisted bearer token
//!
//! The backend issues a three-part, dot-delimited token (`header.payload.sig`).
//! The client base64-decodes the middle segment and reads `user_id` from its JSON
//! to know which posts are "mine" and who to attribute new posts to.
//!
//! The signature is **never verified here**. The decoded id is only a UI hint;
//! the backend re-checks the bearer token on every request and remains the sole
//! authority. Any decoding failure leaves the session anonymous and logs a
//! warning; it never surfaces as an error.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde_json::Value;

use crate::models::User;

/// Display name used until the real username is known.
pub const DEFAULT_DISPLAY_NAME: &str = "You";

/// In-memory session derived from the stored token.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub token: Option<String>,
    pub user_id: Option<i64>,
    pub username: Option<String>,
}

impl Session {
    /// An anonymous session with no token.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Build a session from whatever the token store returned.
    pub fn from_token(token: Option<String>) -> Self {
        let Some(token) = token else {
            return Self::anonymous();
        };

        let claims = match decode_payload(&token) {
            Ok(claims) => Some(claims),
            Err(reason) => {
                tracing::warn!("Invalid token: {}", reason);
                None
            }
        };

        let user_id = claims.as_ref().and_then(|c| match claim_user_id(c) {
            Some(id) => Some(id),
            None => {
                tracing::warn!("Invalid token: user_id missing or not numeric");
                None
            }
        });
        let username = claims
            .as_ref()
            .and_then(|c| c.get("username"))
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        Self {
            token: Some(token),
            user_id,
            username,
        }
    }

    /// Token present and user id resolved: the feed may load.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user_id.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Name shown on optimistic posts.
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(DEFAULT_DISPLAY_NAME)
    }

    /// The local author identity, if the user id is known.
    pub fn author(&self) -> Option<User> {
        self.user_id.map(|id| User::new(id, self.display_name()))
    }

    /// Pick up the username from the directory once it is fetched.
    pub fn learn_username<'a>(&mut self, users: impl IntoIterator<Item = &'a User>) -> bool {
        let Some(id) = self.user_id else {
            return false;
        };
        let Some(user) = users.into_iter().find(|u| u.id == id) else {
            return false;
        };
        if user.username.is_empty() || self.username.as_deref() == Some(user.username.as_str()) {
            return false;
        }
        self.username = Some(user.username.clone());
        true
    }

    pub fn is_own(&self, user_id: i64) -> bool {
        self.user_id == Some(user_id)
    }
}

/// Decode the user id carried by a token, without verifying it.
pub fn decode_user_id(token: &str) -> Option<i64> {
    decode_payload(token).ok().as_ref().and_then(claim_user_id)
}

fn decode_payload(token: &str) -> Result<Value, String> {
    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next()) {
        (Some(_), Some(payload)) if !payload.is_empty() => payload,
        _ => return Err("missing payload segment".to_string()),
    };

    let trimmed = payload.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .map_err(|e| format!("payload is not base64: {e}"))?;

    serde_json::from_slice(&bytes).map_err(|e| format!("payload is not JSON: {e}"))
}

fn claim_user_id(claims: &Value) -> Option<i64> {
    match claims.get("user_id")? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
