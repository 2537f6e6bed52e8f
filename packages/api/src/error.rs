//! Error types for backend calls and client-side validation.

use thiserror::Error;

/// Input rejected before any request is sent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Username and password are required.")]
    MissingCredentials,
    #[error("Password confirmation does not match.")]
    PasswordMismatch,
    #[error("Post content cannot be empty.")]
    EmptyPost,
}

/// Failure of a backend operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    /// The response body was not the expected JSON.
    #[error("invalid response: {0}")]
    Decode(String),

    /// A token or resolved user id is required but missing.
    #[error("not signed in")]
    Unauthenticated,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    /// Text for the auth screen's inline message.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(e) => e.to_string(),
            ApiError::Status { message, .. } if !message.is_empty() => format!("Error: {message}"),
            ApiError::Status { .. } => "Error: Unexpected error occurred.".to_string(),
            ApiError::Network(e) => format!("Error: {e}"),
            ApiError::Decode(_) => "Error: Unexpected error occurred.".to_string(),
            ApiError::Unauthenticated => "Error: Please sign in again.".to_string(),
        }
    }

    /// HTTP status for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_messages_for_auth_screen() {
        let err = ApiError::Status {
            status: 401,
            message: "invalid credentials".to_string(),
        };
        assert_eq!(err.user_message(), "Error: invalid credentials");
        assert_eq!(err.status(), Some(401));

        let err = ApiError::Status {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.user_message(), "Error: Unexpected error occurred.");
    }

    #[test]
    fn validation_messages_are_shown_verbatim() {
        let err: ApiError = ValidationError::PasswordMismatch.into();
        assert_eq!(err.user_message(), "Password confirmation does not match.");
        assert_eq!(err.status(), None);
    }
}
