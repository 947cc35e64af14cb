//! Configured platform server instances.

use crate::credentials::Credentials;
use crate::ports::{CredentialError, CredentialLookupPort};
use secrecy::ExposeSecret;
use std::sync::OnceLock;
use tracing::debug;

const ARTIFACTORY_SUFFIX: &str = "/artifactory";
const DISTRIBUTION_SUFFIX: &str = "/distribution";
const XRAY_SUFFIX: &str = "/xray";

/// A named platform endpoint with its sub-service URLs and credential reference.
///
/// Sub-service URLs not given explicitly are derived from the platform URL at
/// construction, so they stay stable for the lifetime of the instance. Without
/// a platform URL nothing is derived and the sub-service URL stays empty.
/// Credentials are bound lazily on first lookup and never change afterwards.
#[derive(Debug, Clone)]
pub struct ServerInstance {
    id: String,
    url: String,
    artifactory_url: String,
    distribution_url: String,
    xray_url: String,
    credentials_id: String,
    credentials: OnceLock<Credentials>,
}

impl ServerInstance {
    /// Create an instance. Trailing slashes are stripped from every URL.
    pub fn new(
        id: impl Into<String>,
        url: &str,
        artifactory_url: Option<&str>,
        distribution_url: Option<&str>,
        xray_url: Option<&str>,
        credentials_id: impl Into<String>,
    ) -> Self {
        let url = strip_trailing_slash(url);
        let infer = |explicit: Option<&str>, suffix: &str| match explicit.map(strip_trailing_slash) {
            Some(value) if !value.trim().is_empty() => value,
            _ if url.trim().is_empty() => String::new(),
            _ => format!("{url}{suffix}"),
        };

        Self {
            id: id.into(),
            artifactory_url: infer(artifactory_url, ARTIFACTORY_SUFFIX),
            distribution_url: infer(distribution_url, DISTRIBUTION_SUFFIX),
            xray_url: infer(xray_url, XRAY_SUFFIX),
            url,
            credentials_id: credentials_id.into(),
            credentials: OnceLock::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Base platform URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn artifactory_url(&self) -> &str {
        &self.artifactory_url
    }

    pub fn distribution_url(&self) -> &str {
        &self.distribution_url
    }

    pub fn xray_url(&self) -> &str {
        &self.xray_url
    }

    pub fn credentials_id(&self) -> &str {
        &self.credentials_id
    }

    /// Pre-bind credentials, e.g. when they come from the host rather than a store.
    ///
    /// Has no effect if credentials were already bound.
    #[must_use]
    pub fn with_credentials(self, credentials: Credentials) -> Self {
        let _ = self.credentials.set(credentials);
        self
    }

    /// Credentials for this server, resolving them through `lookup` on first use.
    ///
    /// A token credential wins over username/password. A blank reference
    /// resolves to empty credentials without touching the store.
    pub fn credentials(
        &self,
        lookup: &dyn CredentialLookupPort,
    ) -> Result<&Credentials, CredentialError> {
        if let Some(bound) = self.credentials.get() {
            return Ok(bound);
        }

        let resolved = if self.credentials_id.trim().is_empty() {
            Credentials::empty()
        } else if let Some(token) = lookup.access_token(&self.credentials_id)? {
            debug!(server_id = %self.id, "Resolved access token credentials");
            Credentials::from_access_token(token.expose_secret())
        } else {
            debug!(server_id = %self.id, "Resolved username/password credentials");
            lookup.username_password(&self.credentials_id)?
        };

        Ok(self.credentials.get_or_init(|| resolved))
    }
}

fn strip_trailing_slash(url: &str) -> String {
    url.strip_suffix('/').unwrap_or(url).to_string()
}
