//! Error types for provisioning, bootstrap and command execution.

use jfkit_core::{
    CredentialError, LaunchError, PathError, PlatformError, SettingsError, VersionError,
};
use jfkit_http::TransportError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors raised by the runtime. Every variant is fatal for the current
/// execution; output-extraction problems are never reported through here.
#[derive(Debug, Error)]
pub enum RuntimeError {
    // === Provisioning ===
    /// The host OS or architecture has no published binary.
    #[error(transparent)]
    UnsupportedPlatform(#[from] PlatformError),

    /// Network failure or non-2xx answer from the artifact store.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The downloaded binary could not be marked executable.
    #[error("No permission to add execution permission to binary {path}: {source}")]
    Permission {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The requested CLI version is not acceptable.
    #[error(transparent)]
    InvalidVersion(#[from] VersionError),

    /// The requested server id is not configured.
    #[error("Server id '{0}' doesn't exists.")]
    ServerNotFound(String),

    // === Bootstrap & commands ===
    /// Credentials could not be resolved.
    #[error(transparent)]
    Credentials(#[from] CredentialError),

    /// A process could not be launched.
    #[error(transparent)]
    Launch(#[from] LaunchError),

    /// `jf -v` failed or printed something unparseable.
    #[error("Failed to get JFrog CLI version: {0}")]
    VersionDetection(String),

    /// Registering a server profile exited non-zero.
    #[error("Running 'jf' command failed with exit code {exit_code} while configuring server '{server_id}'")]
    Registration { server_id: String, exit_code: i32 },

    /// A `jf` invocation exited non-zero.
    #[error("Running 'jf' command failed with exit code {exit_code}")]
    CommandFailed { exit_code: i32 },

    /// Wrapper for anything that went wrong while running a user command.
    #[error("Couldn't execute 'jf' command. {0}")]
    Execution(Box<RuntimeError>),

    // === Configuration & filesystem ===
    #[error(transparent)]
    Config(#[from] SettingsError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RuntimeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Exit code of the failed `jf` invocation, if that is what failed.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { exit_code } | Self::Registration { exit_code, .. } => {
                Some(*exit_code)
            }
            Self::Execution(inner) => inner.exit_code(),
            _ => None,
        }
    }
}
