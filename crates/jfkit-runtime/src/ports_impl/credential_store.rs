//! JSON file credential store.
//!
//! ```json
//! {
//!   "prod-token": { "accessToken": "..." },
//!   "legacy": { "username": "ci", "password": "..." }
//! }
//! ```

use jfkit_core::{CredentialError, CredentialLookupPort, Credentials};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoredEntry {
    username: String,
    password: String,
    access_token: String,
}

struct Entry {
    username: String,
    password: SecretString,
    access_token: SecretString,
}

impl From<StoredEntry> for Entry {
    fn from(stored: StoredEntry) -> Self {
        Self {
            username: stored.username,
            password: SecretString::from(stored.password),
            access_token: SecretString::from(stored.access_token),
        }
    }
}

/// Credentials keyed by credentials id, loaded once.
#[derive(Default)]
pub struct JsonCredentialStore {
    entries: HashMap<String, Entry>,
}

impl JsonCredentialStore {
    /// A store without entries: every lookup resolves to anonymous.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, CredentialError> {
        let location = path.display().to_string();
        let contents =
            std::fs::read_to_string(path).map_err(|e| CredentialError::StoreUnavailable {
                location: location.clone(),
                reason: e.to_string(),
            })?;
        Self::from_json(&contents, &location)
    }

    pub fn from_json(contents: &str, location: &str) -> Result<Self, CredentialError> {
        let stored: HashMap<String, StoredEntry> =
            serde_json::from_str(contents).map_err(|e| CredentialError::StoreUnavailable {
                location: location.to_string(),
                reason: e.to_string(),
            })?;
        debug!(location, entries = stored.len(), "Loaded credential store");
        Ok(Self {
            entries: stored.into_iter().map(|(id, e)| (id, e.into())).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CredentialLookupPort for JsonCredentialStore {
    fn access_token(&self, credentials_id: &str) -> Result<Option<SecretString>, CredentialError> {
        Ok(self
            .entries
            .get(credentials_id)
            .filter(|entry| !entry.access_token.expose_secret().trim().is_empty())
            .map(|entry| entry.access_token.clone()))
    }

    fn username_password(&self, credentials_id: &str) -> Result<Credentials, CredentialError> {
        Ok(self
            .entries
            .get(credentials_id)
            .map_or_else(Credentials::empty, |entry| {
                Credentials::from_username_password(
                    entry.username.as_str(),
                    entry.password.expose_secret(),
                )
            }))
    }
}

impl std::fmt::Debug for JsonCredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonCredentialStore")
            .field("ids", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jfkit_core::AuthMode;
    use tempfile::tempdir;

    const STORE: &str = r#"{
        "token": {"accessToken": "tok"},
        "basic": {"username": "admin", "password": "password"},
        "blank-token": {"accessToken": "  ", "username": "ci", "password": "pw"}
    }"#;

    #[test]
    fn test_token_lookup() {
        let store = JsonCredentialStore::from_json(STORE, "memory").unwrap();
        assert_eq!(
            store.access_token("token").unwrap().unwrap().expose_secret(),
            "tok"
        );
        assert!(store.access_token("basic").unwrap().is_none());
        assert!(store.access_token("blank-token").unwrap().is_none());
        assert!(store.access_token("missing").unwrap().is_none());
    }

    #[test]
    fn test_username_password_lookup() {
        let store = JsonCredentialStore::from_json(STORE, "memory").unwrap();
        let basic = store.username_password("basic").unwrap();
        assert_eq!(basic.username(), "admin");
        assert_eq!(basic.password().expose_secret(), "password");
        assert_eq!(
            store.username_password("missing").unwrap().auth_mode(),
            AuthMode::Anonymous
        );
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            JsonCredentialStore::load(&dir.path().join("missing.json")),
            Err(CredentialError::StoreUnavailable { .. })
        ));

        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(JsonCredentialStore::load(&path).is_err());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let store = JsonCredentialStore::from_json(STORE, "memory").unwrap();
        let debug = format!("{store:?}");
        assert!(!debug.contains("tok\""));
        assert!(!debug.contains("password\""));
    }
}
