//! Credential lookup port.

use crate::credentials::Credentials;
use secrecy::SecretString;
use thiserror::Error;

/// Errors returned by a credential store.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The store could not be read or parsed.
    #[error("Failed to read credential store {location}: {reason}")]
    StoreUnavailable { location: String, reason: String },

    /// The store failed while resolving a specific reference.
    #[error("Failed to resolve credentials '{credentials_id}': {reason}")]
    Lookup {
        credentials_id: String,
        reason: String,
    },
}

/// Resolves credential references to secrets.
///
/// Lookups are synchronous; stores are expected to be local (files,
/// environment, host-provided maps).
#[cfg_attr(test, mockall::automock)]
pub trait CredentialLookupPort: Send + Sync {
    /// Access token stored under `credentials_id`, if the reference is a token.
    fn access_token(&self, credentials_id: &str) -> Result<Option<SecretString>, CredentialError>;

    /// Username/password stored under `credentials_id`.
    ///
    /// Returns empty credentials when nothing matches, never an error for a
    /// missing entry.
    fn username_password(&self, credentials_id: &str) -> Result<Credentials, CredentialError>;
}
