//! Server profile registration, once per execution.
//!
//! Whether profiles are registered is read from the CLI home directory: the
//! CLI writes its configuration file there on the first `jf c add`. This is a
//! directory listing rather than a lock, so two processes racing on an empty home
//! directory may both register. Registration overwrites, so that is harmless.

use crate::error::{RuntimeError, RuntimeResult};
use crate::session::CliSession;
use jfkit_core::{
    ArgumentList, AuthMode, CLI_CONFIG_MARKER, CredentialLookupPort, Credentials, ServerInstance,
};
use secrecy::{ExposeSecret, SecretString};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Whether `home_dir` already holds the CLI configuration file.
///
/// A missing or unreadable directory counts as not bootstrapped.
pub fn is_bootstrapped(home_dir: &Path) -> bool {
    let Ok(entries) = std::fs::read_dir(home_dir) else {
        return false;
    };
    entries
        .filter_map(Result::ok)
        .any(|entry| entry.file_name().to_string_lossy().contains(CLI_CONFIG_MARKER))
}

// ============================================================================
// Registration command
// ============================================================================

/// How a password reaches `jf c add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordDelivery {
    /// `--password-stdin`, with the password written to the process input.
    Stdin,
    /// Masked `--password=` argument, for CLI versions without stdin support.
    Argument,
}

/// A `jf c add` invocation and the secret to pipe into it, if any.
#[derive(Debug, Clone)]
pub struct Registration {
    pub command: ArgumentList,
    pub stdin: Option<SecretString>,
}

/// Build the `jf c add` command for one server.
///
/// A token is passed as a masked `--access-token=`. Otherwise the username
/// is passed in the clear and the password per `delivery`. Anonymous
/// servers get no credential flags. Blank URLs are left out.
pub fn registration_command(
    binary: &str,
    server: &ServerInstance,
    credentials: &Credentials,
    delivery: PasswordDelivery,
) -> Registration {
    let mut command = ArgumentList::new();
    command.add(binary).add("c").add("add").add(server.id());

    let mut stdin = None;
    match credentials.auth_mode() {
        AuthMode::AccessToken => {
            command.add_masked(format!(
                "--access-token={}",
                credentials.access_token().expose_secret()
            ));
        }
        AuthMode::UsernamePassword => {
            command.add(format!("--user={}", credentials.username()));
            match delivery {
                PasswordDelivery::Stdin => {
                    command.add("--password-stdin");
                    stdin = Some(credentials.password().clone());
                }
                PasswordDelivery::Argument => {
                    command.add_masked(format!(
                        "--password={}",
                        credentials.password().expose_secret()
                    ));
                }
            }
        }
        AuthMode::Anonymous => {}
    }

    let urls = [
        ("--url", server.url()),
        ("--artifactory-url", server.artifactory_url()),
        ("--distribution-url", server.distribution_url()),
        ("--xray-url", server.xray_url()),
    ];
    for (flag, url) in urls {
        if !url.trim().is_empty() {
            command.add(format!("{flag}={url}"));
        }
    }
    command.add("--interactive=false").add("--overwrite=true");

    Registration { command, stdin }
}

// ============================================================================
// Bootstrapper
// ============================================================================

/// Registers every configured server, in configuration order.
pub struct Bootstrapper {
    servers: Vec<ServerInstance>,
    credentials: Arc<dyn CredentialLookupPort>,
}

impl Bootstrapper {
    pub fn new(servers: Vec<ServerInstance>, credentials: Arc<dyn CredentialLookupPort>) -> Self {
        Self {
            servers,
            credentials,
        }
    }

    #[must_use]
    pub fn with_servers(mut self, servers: Vec<ServerInstance>) -> Self {
        self.servers = servers;
        self
    }

    /// Register every server. The first failing registration aborts the
    /// remaining ones.
    pub async fn register_all(
        &self,
        session: &CliSession,
        output: &mut (dyn Write + Send),
    ) -> RuntimeResult<()> {
        for server in &self.servers {
            let credentials = server.credentials(self.credentials.as_ref())?;
            let delivery = self.password_delivery(session, credentials).await?;
            let registration =
                registration_command(session.binary(), server, credentials, delivery);

            let mut request = session.request(registration.command);
            if let Some(secret) = registration.stdin {
                request = request.with_stdin(secret);
            }
            let exit_code = session.launch(request, output).await?;
            if exit_code != 0 {
                return Err(RuntimeError::Registration {
                    server_id: server.id().to_string(),
                    exit_code,
                });
            }
            info!(server_id = %server.id(), "Registered server profile");
        }
        Ok(())
    }

    /// The CLI version only matters for passwords, so it is not detected otherwise.
    async fn password_delivery(
        &self,
        session: &CliSession,
        credentials: &Credentials,
    ) -> RuntimeResult<PasswordDelivery> {
        if credentials.auth_mode() != AuthMode::UsernamePassword {
            return Ok(PasswordDelivery::Argument);
        }
        if session.version().await?.supports_password_stdin() {
            Ok(PasswordDelivery::Stdin)
        } else {
            Ok(PasswordDelivery::Argument)
        }
    }
}
