//! Credential collection for the login and registration forms.

use serde::Serialize;

use crate::error::ValidationError;

/// Which form the auth screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn toggle(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AuthMode::Login => "Sign In",
            AuthMode::Register => "Create Account",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            AuthMode::Login => "Enter your credentials to continue",
            AuthMode::Register => "Fill in the details to create your account",
        }
    }

    /// Submit button label, with the in-flight variant.
    pub fn submit_label(self, loading: bool) -> &'static str {
        match (self, loading) {
            (AuthMode::Login, false) => "Login",
            (AuthMode::Login, true) => "Logging in...",
            (AuthMode::Register, false) => "Register",
            (AuthMode::Register, true) => "Registering...",
        }
    }

    /// Footer prompt and the label of the link that switches modes.
    pub fn switch_prompt(self) -> (&'static str, &'static str) {
        match self {
            AuthMode::Login => ("Don't have an account?", "Register"),
            AuthMode::Register => ("Already have an account?", "Login"),
        }
    }

    /// Message shown after a successful submission.
    pub fn success_message(self) -> &'static str {
        match self {
            AuthMode::Login => "Login successful. Redirecting...",
            AuthMode::Register => "Registration successful. Please log in.",
        }
    }
}

/// Body of `POST /api/login` and `POST /api/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Trim and check form input. The confirmation only matters when registering.
    pub fn validate(
        mode: AuthMode,
        username: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<Self, ValidationError> {
        let username = username.trim();
        let password = password.trim();

        if username.is_empty() || password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        if mode == AuthMode::Register && password != confirmation.trim() {
            return Err(ValidationError::PasswordMismatch);
        }

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_ignores_confirmation() {
        let creds = Credentials::validate(AuthMode::Login, " ada ", " secret ", "").unwrap();
        assert_eq!(creds.username, "ada");
        assert_eq!(creds.password, "secret");
    }

    #[test]
    fn missing_fields_are_rejected() {
        assert_eq!(
            Credentials::validate(AuthMode::Login, "   ", "pw", ""),
            Err(ValidationError::MissingCredentials)
        );
        assert_eq!(
            Credentials::validate(AuthMode::Register, "ada", "", ""),
            Err(ValidationError::MissingCredentials)
        );
    }

    #[test]
    fn register_requires_matching_confirmation() {
        assert_eq!(
            Credentials::validate(AuthMode::Register, "ada", "one", "two"),
            Err(ValidationError::PasswordMismatch)
        );
        assert!(Credentials::validate(AuthMode::Register, "ada", "one", " one").is_ok());
    }

    #[test]
    fn mode_toggles_and_labels() {
        assert_eq!(AuthMode::Login.toggle(), AuthMode::Register);
        assert_eq!(AuthMode::Register.toggle(), AuthMode::Login);
        assert_eq!(AuthMode::Register.submit_label(true), "Registering...");
        assert_eq!(AuthMode::Login.switch_prompt().1, "Register");
    }
}
