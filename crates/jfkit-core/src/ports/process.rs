//! Process launcher port.
//!
//! A launch takes a command line, environment, working directory and optional
//! secret stdin, streams the child's combined output into a writer, and yields
//! the exit code.

use crate::arguments::ArgumentList;
use async_trait::async_trait;
use secrecy::SecretString;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while launching a process.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The command line was empty.
    #[error("Cannot launch an empty command")]
    EmptyCommand,

    /// The program could not be started.
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O failed while feeding stdin or relaying output.
    #[error("I/O error while running '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Everything a launcher needs to start one process.
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    /// Program followed by its arguments. Masked entries stay masked in logs.
    pub command: ArgumentList,
    /// Full environment for the child.
    pub env: BTreeMap<String, String>,
    /// Working directory, inherited when `None`.
    pub cwd: Option<PathBuf>,
    /// Secret written to the child's stdin, after which stdin is closed.
    pub stdin: Option<SecretString>,
}

impl LaunchRequest {
    #[must_use]
    pub const fn new(command: ArgumentList) -> Self {
        Self {
            command,
            env: BTreeMap::new(),
            cwd: None,
            stdin: None,
        }
    }

    #[must_use]
    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }

    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    #[must_use]
    pub fn with_stdin(mut self, secret: SecretString) -> Self {
        self.stdin = Some(secret);
        self
    }
}

/// Launches external processes.
#[async_trait]
pub trait ProcessLauncherPort: Send + Sync {
    /// Run the request to completion and return its exit code.
    ///
    /// Stdout and stderr are both written to `output` in arrival order.
    /// A process terminated without an exit code reports `-1`.
    async fn launch(
        &self,
        request: LaunchRequest,
        output: &mut (dyn Write + Send),
    ) -> Result<i32, LaunchError>;
}
