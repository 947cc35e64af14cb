//! Provisioning, bootstrap and command execution for the JFrog CLI.
//!
//! The two entry points are [`Installer::install`], which materializes the
//! `jf` binary in an install directory, and [`CommandRunner::run`], which
//! registers the configured servers once per execution and runs a command.
//! Provisioning must complete before a command runs against the binary.

#![deny(unsafe_code)]

pub mod bootstrap;
pub mod env;
pub mod error;
pub mod install;
pub mod launcher;
pub mod output;
pub mod ports_impl;
pub mod runner;
pub mod session;
pub mod workspace;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use bootstrap::{
    Bootstrapper, PasswordDelivery, Registration, is_bootstrapped, registration_command,
};
pub use env::{EncryptionKey, EnvMap, configure_cli_env, installation_env, needs_encryption_key};
pub use error::{RuntimeError, RuntimeResult};
pub use install::{
    BinaryProvisioner, InstallRequest, InstallSource, Installer, LATEST_VERSION, RELEASES_URL,
    download_suffix, should_download,
};
pub use launcher::TokioProcessLauncher;
pub use output::{extract_build_info_url, is_build_publish, parse_build_info_url};
pub use ports_impl::{ConsoleTaskLog, JsonCredentialStore};
pub use runner::{CommandOutcome, CommandRunner};
pub use session::CliSession;
pub use workspace::cleanup_cli_home;

