//! Form bodies posted by the auth and password reset pages.
//!
//! Field names match the HTML forms in [`crate::views`]. The email address is
//! posted as `username`.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequestForm {
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct NewPasswordForm {
    #[serde(default)]
    pub new_password: String,
}

/// Query string of the reset link sent by the provider
#[derive(Debug, Default, Deserialize)]
pub struct ResetTokenQuery {
    pub token: Option<String>,
}

impl ResetTokenQuery {
    /// The token, unless absent or empty
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}
