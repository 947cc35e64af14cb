//! Preemptive authentication.
//!
//! The scheme is chosen once from the configured credentials and applied to
//! every request the [`RedirectContext`](crate::RedirectContext) allows,
//! without waiting for a 401 challenge.

use jfkit_core::{AuthMode, Credentials};
use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};

#[derive(Clone)]
pub enum PreemptiveAuth {
    /// `Authorization: Bearer <token>`
    Bearer(SecretString),
    /// `Authorization: Basic <base64(user:pass)>`
    Basic {
        username: String,
        password: SecretString,
    },
    /// No credentials configured.
    None,
}

impl PreemptiveAuth {
    /// A non-blank access token selects bearer auth exclusively.
    pub fn from_credentials(credentials: &Credentials) -> Self {
        match credentials.auth_mode() {
            AuthMode::AccessToken => Self::Bearer(credentials.access_token().clone()),
            AuthMode::UsernamePassword => Self::Basic {
                username: credentials.username().to_string(),
                password: credentials.password().clone(),
            },
            AuthMode::Anonymous => Self::None,
        }
    }

    pub const fn scheme(&self) -> &'static str {
        match self {
            Self::Bearer(_) => "bearer",
            Self::Basic { .. } => "basic",
            Self::None => "none",
        }
    }

    pub(crate) fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Bearer(token) => request.bearer_auth(token.expose_secret()),
            Self::Basic { username, password } => {
                request.basic_auth(username, Some(password.expose_secret()))
            }
            Self::None => request,
        }
    }
}

impl std::fmt::Debug for PreemptiveAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
            other => write!(f, "{}", other.scheme()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authorization(auth: &PreemptiveAuth) -> Option<String> {
        let request = auth
            .apply(reqwest::Client::new().get("http://localhost/"))
            .build()
            .unwrap();
        request
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[test]
    fn test_token_selects_bearer() {
        let auth = PreemptiveAuth::from_credentials(&Credentials::new("admin", "pw", "tok"));
        assert_eq!(auth.scheme(), "bearer");
        assert_eq!(authorization(&auth).as_deref(), Some("Bearer tok"));
    }

    #[test]
    fn test_username_password_selects_basic() {
        let auth = PreemptiveAuth::from_credentials(&Credentials::from_username_password(
            "admin", "password",
        ));
        assert_eq!(auth.scheme(), "basic");
        // base64("admin:password")
        assert_eq!(
            authorization(&auth).as_deref(),
            Some("Basic YWRtaW46cGFzc3dvcmQ=")
        );
    }

    #[test]
    fn test_empty_credentials_send_nothing() {
        let auth = PreemptiveAuth::from_credentials(&Credentials::empty());
        assert_eq!(auth.scheme(), "none");
        assert!(authorization(&auth).is_none());
    }

    #[test]
    fn test_debug_redacts() {
        let auth = PreemptiveAuth::from_credentials(&Credentials::from_username_password(
            "admin", "hunter2",
        ));
        assert!(!format!("{auth:?}").contains("hunter2"));
    }
}
