//! CLI binary provisioning.
//!
//! `resolve platform -> build path -> remote hash -> cache gate -> download`.
//! The provisioner does not lock the install directory. Two runs provisioning
//! the same target converge on the same binary.

mod cache;
mod source;

pub use cache::{should_download, write_marker};
pub use source::{InstallSource, RELEASES_REPOSITORY, RELEASES_URL};

use crate::error::{RuntimeError, RuntimeResult};
use jfkit_core::{
    CredentialLookupPort, ProxySettings, TaskLogPort, binary_name, current_platform,
    ensure_directory,
};
use jfkit_http::ArtifactoryClient;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Version token the repository resolves to the latest release.
pub const LATEST_VERSION: &str = "[RELEASE]";

/// Artifact name prefix of the CLI in the repository layout.
pub const TOOL_NAME: &str = "jfrog-cli";

/// `/{repository}/v2-jf/{version}/jfrog-cli-{platform}/{binary}`
///
/// A blank version selects the percent-encoded latest token.
pub fn download_suffix(repository: &str, version: &str, platform: &str, binary: &str) -> String {
    let version = match version.trim() {
        "" => urlencoding::encode(LATEST_VERSION).into_owned(),
        explicit => explicit.to_string(),
    };
    format!("/{repository}/v2-jf/{version}/{TOOL_NAME}-{platform}/{binary}")
}

// ============================================================================
// Request
// ============================================================================

/// One install target.
#[derive(Debug, Clone)]
pub struct InstallRequest {
    install_dir: PathBuf,
    version: String,
    binary_name: String,
    platform: Option<String>,
}

impl InstallRequest {
    /// Latest version of the host's binary into `install_dir`.
    pub fn new(install_dir: impl Into<PathBuf>) -> Self {
        Self {
            install_dir: install_dir.into(),
            version: String::new(),
            binary_name: binary_name(cfg!(windows)).to_string(),
            platform: None,
        }
    }

    /// Explicit `X.Y.Z` version. Blank means latest.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    #[must_use]
    pub fn with_binary_name(mut self, binary_name: impl Into<String>) -> Self {
        self.binary_name = binary_name.into();
        self
    }

    /// Override the platform token instead of detecting the host's.
    #[must_use]
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn binary_name(&self) -> &str {
        &self.binary_name
    }

    pub fn binary_path(&self) -> PathBuf {
        self.install_dir.join(&self.binary_name)
    }

    fn platform(&self) -> RuntimeResult<String> {
        match &self.platform {
            Some(platform) => Ok(platform.clone()),
            None => Ok(current_platform()?.to_string()),
        }
    }
}

// ============================================================================
// Provisioner
// ============================================================================

/// Materializes the binary from one repository of one artifact store.
pub struct BinaryProvisioner {
    client: ArtifactoryClient,
    repository: String,
    task_log: Arc<dyn TaskLogPort>,
}

impl BinaryProvisioner {
    pub fn new(
        client: ArtifactoryClient,
        repository: impl Into<String>,
        task_log: Arc<dyn TaskLogPort>,
    ) -> Self {
        Self {
            client,
            repository: repository.into(),
            task_log,
        }
    }

    /// Ensure the requested binary is present and current, returning its path.
    pub async fn provision(&self, request: &InstallRequest) -> RuntimeResult<PathBuf> {
        let platform = request.platform()?;
        let suffix = download_suffix(
            &self.repository,
            request.version(),
            &platform,
            request.binary_name(),
        );

        let remote_sha256 = self.client.remote_sha256(&suffix).await?;
        ensure_directory(request.install_dir())?;
        let binary_path = request.binary_path();

        if !should_download(request.install_dir(), &remote_sha256)? {
            debug!(path = %binary_path.display(), "JFrog CLI binary is up to date");
            return Ok(binary_path);
        }

        let url = format!("{}{suffix}", self.client.base_url());
        let message = if request.version().trim().is_empty() {
            format!("Download '{}' latest version from: {url}", request.binary_name())
        } else {
            format!(
                "Download '{}' version {} from: {url}",
                request.binary_name(),
                request.version().trim()
            )
        };
        self.task_log.info(&message);

        let bytes = self.client.download_to_file(&suffix, &binary_path).await?;
        set_executable(&binary_path)?;
        write_marker(request.install_dir(), &remote_sha256)?;
        info!(path = %binary_path.display(), bytes, "Installed JFrog CLI");
        Ok(binary_path)
    }
}

#[cfg(unix)]
fn set_executable(path: &Path) -> RuntimeResult<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = std::fs::metadata(path)
        .map_err(|source| RuntimeError::Permission {
            path: path.to_path_buf(),
            source,
        })?
        .permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(path, permissions).map_err(|source| RuntimeError::Permission {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(not(unix))]
fn set_executable(path: &Path) -> RuntimeResult<()> {
    // Executability follows the file extension
    std::fs::metadata(path)
        .map(|_| ())
        .map_err(|source| RuntimeError::Permission {
            path: path.to_path_buf(),
            source,
        })
}

// ============================================================================
// Installer
// ============================================================================

/// "Run installation" entry point: picks the store, resolves credentials,
/// builds the transport and provisions.
pub struct Installer {
    source: InstallSource,
    credentials: Arc<dyn CredentialLookupPort>,
    proxy: Option<ProxySettings>,
    task_log: Arc<dyn TaskLogPort>,
}

impl Installer {
    pub fn new(
        source: InstallSource,
        credentials: Arc<dyn CredentialLookupPort>,
        task_log: Arc<dyn TaskLogPort>,
    ) -> Self {
        Self {
            source,
            credentials,
            proxy: None,
            task_log,
        }
    }

    #[must_use]
    pub fn with_proxy(mut self, proxy: Option<ProxySettings>) -> Self {
        self.proxy = proxy;
        self
    }

    pub const fn source(&self) -> &InstallSource {
        &self.source
    }

    pub async fn install(&self, request: &InstallRequest) -> RuntimeResult<PathBuf> {
        self.source.validate_version(request.version())?;
        let config = self
            .source
            .transport_config(self.credentials.as_ref())?
            .with_proxy(self.proxy.clone());
        let client = ArtifactoryClient::new(config)?;
        BinaryProvisioner::new(client, self.source.repository(), Arc::clone(&self.task_log))
            .provision(request)
            .await
    }
}
