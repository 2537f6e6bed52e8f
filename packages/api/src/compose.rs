//! Draft state of the create-post form.

use crate::error::ValidationError;

/// Maximum post length, in characters.
pub const MAX_POST_CHARS: usize = 200;

/// The composer's draft, truncated as it is typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composer {
    text: String,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the draft, keeping only the first [`MAX_POST_CHARS`] characters.
    pub fn set_text(&mut self, input: &str) {
        self.text = input.chars().take(MAX_POST_CHARS).collect();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Counter label, e.g. `"42/200"`.
    pub fn counter(&self) -> String {
        format!("{}/{}", self.char_count(), MAX_POST_CHARS)
    }

    pub fn at_limit(&self) -> bool {
        self.char_count() >= MAX_POST_CHARS
    }

    /// Content to send, or `None` for a blank draft.
    pub fn submission(&self) -> Option<&str> {
        if self.text.trim().is_empty() {
            None
        } else {
            Some(&self.text)
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

/// Reject blank content before it reaches the backend.
pub fn validate_content(content: &str) -> Result<&str, ValidationError> {
    if content.trim().is_empty() {
        Err(ValidationError::EmptyPost)
    } else {
        Ok(content)
    }
}
