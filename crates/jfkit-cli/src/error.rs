//! CLI error type and exit codes.

use jfkit_core::{CredentialError, SettingsError};
use jfkit_http::TransportError;
use jfkit_runtime::RuntimeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Provisioning or command failure.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// Direct transport failure (ping).
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Credential store error: {0}")]
    Credentials(#[from] CredentialError),
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// A failed `jf` invocation passes its own exit code through; everything
    /// else follows sysexits.h.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Runtime(err) => err.exit_code().unwrap_or(1),
            Self::Transport(_) => 69, // EX_UNAVAILABLE
            Self::Config(_) => 78,    // EX_CONFIG
            Self::Credentials(_) => 77, // EX_NOPERM
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_exit_code_passes_through() {
        let err = CliError::from(RuntimeError::Execution(Box::new(
            RuntimeError::CommandFailed { exit_code: 4 },
        )));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_other_runtime_errors_exit_with_one() {
        let err = CliError::from(RuntimeError::ServerNotFound("x".to_string()));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_config_exit_code() {
        let err = CliError::from(SettingsError::EmptyServerId);
        assert_eq!(err.exit_code(), 78);
        assert_eq!(err.to_string(), "Configuration error: Server id cannot be empty");
    }
}
