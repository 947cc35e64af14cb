//! A resolved `jf` binary plus the environment it runs in.

use crate::env::EnvMap;
use crate::error::{RuntimeError, RuntimeResult};
use jfkit_core::{ArgumentList, CliVersion, LaunchRequest, ProcessLauncherPort};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

/// Everything needed to launch `jf` for one execution.
///
/// The CLI version is detected on first use and cached for the session.
pub struct CliSession {
    binary: String,
    env: EnvMap,
    cwd: Option<PathBuf>,
    is_windows: bool,
    launcher: Arc<dyn ProcessLauncherPort>,
    version: OnceCell<CliVersion>,
}

impl CliSession {
    pub fn new(binary: impl Into<String>, launcher: Arc<dyn ProcessLauncherPort>) -> Self {
        Self {
            binary: binary.into(),
            env: EnvMap::new(),
            cwd: None,
            is_windows: cfg!(windows),
            launcher,
            version: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn with_env(mut self, env: EnvMap) -> Self {
        self.env = env;
        self
    }

    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Target OS of the launched processes, which decides argument quoting.
    #[must_use]
    pub const fn with_windows(mut self, is_windows: bool) -> Self {
        self.is_windows = is_windows;
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub const fn env(&self) -> &EnvMap {
        &self.env
    }

    /// `[binary, args...]`
    pub fn command<I, S>(&self, args: I) -> ArgumentList
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut command = ArgumentList::new();
        command.add(self.binary.as_str()).add_all(args);
        command
    }

    /// Wrap a command for the target OS and attach the session environment.
    pub fn request(&self, command: ArgumentList) -> LaunchRequest {
        let command = if self.is_windows {
            command.to_windows_command()
        } else {
            command
        };
        let mut request = LaunchRequest::new(command).with_env(self.env.clone());
        if let Some(cwd) = &self.cwd {
            request = request.with_cwd(cwd);
        }
        request
    }

    /// Run a request and return the exit code.
    pub async fn launch(
        &self,
        request: LaunchRequest,
        output: &mut (dyn Write + Send),
    ) -> RuntimeResult<i32> {
        debug!(command = %request.command, "Running jf");
        Ok(self.launcher.launch(request, output).await?)
    }

    /// Installed CLI version, from `jf -v`.
    pub async fn version(&self) -> RuntimeResult<&CliVersion> {
        self.version
            .get_or_try_init(|| async {
                let mut output = Vec::new();
                let request = self.request(self.command(["-v"]));
                let exit_code = self.launch(request, &mut output).await?;
                let output = String::from_utf8_lossy(&output).trim().to_string();
                if exit_code != 0 {
                    return Err(RuntimeError::VersionDetection(output));
                }
                let version = CliVersion::from_version_output(&output)
                    .map_err(|_| RuntimeError::VersionDetection(output.clone()))?;
                debug!(%version, "Detected JFrog CLI version");
                Ok(version)
            })
            .await
    }
}
