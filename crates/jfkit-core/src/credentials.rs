//! Credential bundle resolved from the external credential store.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Authentication mode selected from a [`Credentials`] bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Bearer token, username/password are inert.
    AccessToken,
    /// Basic authentication.
    UsernamePassword,
    /// Nothing to send.
    Anonymous,
}

/// Username, password and access token. Each part is either empty or populated.
///
/// When an access token is present the username and password are inert,
/// regardless of whether they were also populated. Secrets are held in
/// [`SecretString`] and never appear in `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
    access_token: SecretString,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
            access_token: SecretString::from(access_token.into()),
        }
    }

    /// Empty bundle used for anonymous access.
    pub fn empty() -> Self {
        Self::new("", "", "")
    }

    pub fn from_username_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(username, password, "")
    }

    pub fn from_access_token(token: impl Into<String>) -> Self {
        Self::new("", "", token)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub const fn password(&self) -> &SecretString {
        &self.password
    }

    pub const fn access_token(&self) -> &SecretString {
        &self.access_token
    }

    pub fn has_access_token(&self) -> bool {
        !self.access_token.expose_secret().trim().is_empty()
    }

    /// Select the active authentication mode.
    ///
    /// A non-blank token wins. Basic auth is used when either the username or
    /// the password is non-blank.
    pub fn auth_mode(&self) -> AuthMode {
        if self.has_access_token() {
            AuthMode::AccessToken
        } else if self.username.trim().is_empty() && self.password.expose_secret().trim().is_empty()
        {
            AuthMode::Anonymous
        } else {
            AuthMode::UsernamePassword
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("access_token", &"[REDACTED]")
            .field("mode", &self.auth_mode())
            .finish()
    }
}
