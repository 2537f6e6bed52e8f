//! # Token persistence seam
//!
//! The only durable client state is the bearer token issued by `/api/login`.
//! [`TokenStore`] abstracts where it lives so the same session code runs against
//! browser `localStorage` ([`crate::LocalStorageStore`]), a file on native
//! targets ([`crate::FileStore`]) or memory ([`crate::MemoryStore`]).
//!
//! Implementations never fail loudly: a read error is reported as "no token" and
//! a write error is dropped after a warning. Losing the token only means the user
//! has to sign in again.

/// Synchronous storage for a single opaque token string.
pub trait TokenStore {
    /// Return the stored token, or `None` when absent, blank or unreadable.
    fn load(&self) -> Option<String>;
    /// Persist `token`, replacing any previous value.
    fn save(&self, token: &str);
    /// Remove the stored token.
    fn clear(&self);
}

/// Treat blank values as absent.
pub(crate) fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_tokens_are_absent() {
        assert_eq!(non_blank(String::new()), None);
        assert_eq!(non_blank("  \n".to_string()), None);
        assert_eq!(non_blank(" abc.def ".to_string()), Some("abc.def".to_string()));
    }
}
