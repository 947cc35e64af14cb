//! Transport configuration.

use jfkit_core::{Credentials, ProxySettings};
use std::time::Duration;

/// Connect and request timeout applied uniformly to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Maximum redirect hops followed for one logical request.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Configuration for an [`ArtifactoryClient`](crate::ArtifactoryClient).
///
/// # Example
///
/// ```
/// use jfkit_http::TransportConfig;
/// use std::time::Duration;
///
/// let config = TransportConfig::new("https://releases.jfrog.io/artifactory/")
///     .with_timeout(Duration::from_secs(60));
/// assert_eq!(config.base_url(), "https://releases.jfrog.io/artifactory");
/// ```
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub(crate) base_url: String,
    pub(crate) credentials: Credentials,
    pub(crate) proxy: Option<ProxySettings>,
    pub(crate) timeout: Duration,
    pub(crate) max_redirects: usize,
    pub(crate) user_agent: String,
}

impl TransportConfig {
    /// Create a configuration for `base_url`. A trailing slash is stripped.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.strip_suffix('/').unwrap_or(&base_url).to_string(),
            credentials: Credentials::empty(),
            proxy: None,
            timeout: DEFAULT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: concat!("jfkit/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: &Credentials) -> Self {
        self.credentials = credentials.clone();
        self
    }

    /// Route requests through `proxy`.
    ///
    /// Ignored at client construction when the proxy is unconfigured or the
    /// base URL matches its no-proxy list.
    #[must_use]
    pub fn with_proxy(mut self, proxy: Option<ProxySettings>) -> Self {
        self.proxy = proxy;
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Proxy to actually use for this base URL.
    pub(crate) fn effective_proxy(&self) -> Option<&ProxySettings> {
        self.proxy
            .as_ref()
            .filter(|proxy| proxy.is_configured_for(&self.base_url))
    }
}
