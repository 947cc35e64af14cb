//! Where the binary is downloaded from.

use crate::error::{RuntimeError, RuntimeResult};
use jfkit_core::{CredentialLookupPort, JfkitConfig, ServerInstance, validate_cli_version};
use jfkit_http::TransportConfig;
use tracing::debug;

/// Public releases store.
pub const RELEASES_URL: &str = "https://releases.jfrog.io/artifactory";

/// Repository holding the CLI in the releases store.
pub const RELEASES_REPOSITORY: &str = "jfrog-cli";

/// Artifact store to install from.
#[derive(Debug, Clone)]
pub enum InstallSource {
    /// Anonymous download from the public releases store.
    Releases,
    /// A configured server and one of its repositories (typically a remote
    /// repository proxying the releases store).
    Server {
        server: ServerInstance,
        repository: String,
    },
}

impl InstallSource {
    /// Look up a configured server by id.
    pub fn from_config(
        config: &JfkitConfig,
        server_id: &str,
        repository: impl Into<String>,
    ) -> RuntimeResult<Self> {
        let server = config
            .find_server(server_id)
            .ok_or_else(|| RuntimeError::ServerNotFound(server_id.to_string()))?;
        Ok(Self::Server {
            server,
            repository: repository.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        match self {
            Self::Releases => RELEASES_URL,
            Self::Server { server, .. } => server.artifactory_url(),
        }
    }

    pub fn repository(&self) -> &str {
        match self {
            Self::Releases => RELEASES_REPOSITORY,
            Self::Server { repository, .. } => repository,
        }
    }

    /// Versions below the installer minimum lack the layout this installer
    /// downloads from. The releases store accepts anything.
    pub fn validate_version(&self, version: &str) -> RuntimeResult<()> {
        match self {
            Self::Releases => Ok(()),
            Self::Server { .. } => Ok(validate_cli_version(version)?),
        }
    }

    /// Transport settings, resolving server credentials at call time.
    pub(crate) fn transport_config(
        &self,
        lookup: &dyn CredentialLookupPort,
    ) -> RuntimeResult<TransportConfig> {
        let config = TransportConfig::new(self.base_url());
        match self {
            Self::Releases => Ok(config),
            Self::Server { server, .. } => {
                let credentials = server.credentials(lookup)?;
                debug!(
                    server_id = %server.id(),
                    auth = ?credentials.auth_mode(),
                    "Resolved download credentials"
                );
                Ok(config.with_credentials(credentials))
            }
        }
    }
}
