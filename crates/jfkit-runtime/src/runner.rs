//! "Run command" entry point.

use crate::bootstrap::{Bootstrapper, is_bootstrapped};
use crate::env::{BINARY_PATH, EncryptionKey, EnvMap, configure_cli_env, needs_encryption_key};
use crate::error::{RuntimeError, RuntimeResult};
use crate::output::{TaskLogWriter, TeeWriter, is_build_publish, parse_build_info_url};
use crate::session::CliSession;
use jfkit_core::{
    CredentialLookupPort, ExecutionContext, ProcessLauncherPort, ProxySettings, ServerInstance,
    TaskLogPort, ensure_directory, resolve_binary_path,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Logged when the binary falls back to the system path.
pub const NO_TOOL_MESSAGE: &str =
    "A 'jfrog' tool was not set. Using JFrog CLI from the system path.";

/// Result of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Combined stdout and stderr.
    pub output: String,
    /// Build info UI URL printed by `rt bp` / `rt build-publish`.
    pub build_info_url: Option<String>,
}

/// Runs `jf` commands for executions: configures the environment, bootstraps
/// server profiles once per execution, then launches the command.
pub struct CommandRunner {
    launcher: Arc<dyn ProcessLauncherPort>,
    task_log: Arc<dyn TaskLogPort>,
    bootstrapper: Bootstrapper,
    proxy: Option<ProxySettings>,
    base_env: EnvMap,
    is_windows: bool,
}

impl CommandRunner {
    pub fn new(
        launcher: Arc<dyn ProcessLauncherPort>,
        credentials: Arc<dyn CredentialLookupPort>,
        task_log: Arc<dyn TaskLogPort>,
    ) -> Self {
        Self {
            launcher,
            task_log,
            bootstrapper: Bootstrapper::new(Vec::new(), credentials),
            proxy: None,
            base_env: EnvMap::new(),
            is_windows: cfg!(windows),
        }
    }

    /// Servers to register, in order.
    #[must_use]
    pub fn with_servers(mut self, servers: Vec<ServerInstance>) -> Self {
        self.bootstrapper = self.bootstrapper.with_servers(servers);
        self
    }

    #[must_use]
    pub fn with_proxy(mut self, proxy: Option<ProxySettings>) -> Self {
        self.proxy = proxy;
        self
    }

    /// Environment every command starts from, typically the inherited one.
    #[must_use]
    pub fn with_env(mut self, env: EnvMap) -> Self {
        self.base_env = env;
        self
    }

    #[must_use]
    pub const fn with_windows(mut self, is_windows: bool) -> Self {
        self.is_windows = is_windows;
        self
    }

    /// Run `jf <args>` within `context`.
    ///
    /// A non-zero exit is an error carrying the exit code. Build-publish
    /// output that cannot be parsed only produces a warning.
    pub async fn run(
        &self,
        args: &[String],
        context: &ExecutionContext,
    ) -> RuntimeResult<CommandOutcome> {
        self.execute(args, context)
            .await
            .map_err(|e| RuntimeError::Execution(Box::new(e)))
    }

    async fn execute(
        &self,
        args: &[String],
        context: &ExecutionContext,
    ) -> RuntimeResult<CommandOutcome> {
        let home_dir = context.cli_home_dir();
        ensure_directory(&home_dir)?;

        // Shared with every other process of this execution
        let key = if needs_encryption_key(&self.base_env) {
            Some(EncryptionKey::load_or_create(&context.encryption_key_path())?)
        } else {
            None
        };

        let mut env = self.base_env.clone();
        configure_cli_env(&mut env, context, self.proxy.as_ref(), key.as_ref());
        let binary_dir = env.get(BINARY_PATH).cloned();
        let binary = resolve_binary_path(binary_dir.as_deref(), self.is_windows);

        let session = CliSession::new(binary, Arc::clone(&self.launcher))
            .with_env(env)
            .with_cwd(context.workspace())
            .with_windows(self.is_windows);

        let mut log_writer = TaskLogWriter::new(self.task_log.as_ref());
        if !is_bootstrapped(&home_dir) {
            if binary_dir.is_none() {
                self.task_log.info(NO_TOOL_MESSAGE);
            }
            self.bootstrapper
                .register_all(&session, &mut log_writer)
                .await?;
        }

        let mut tee = TeeWriter::new(self.task_log.as_ref());
        let exit_code = session
            .launch(session.request(session.command(args)), &mut tee)
            .await?;
        if exit_code != 0 {
            return Err(RuntimeError::CommandFailed { exit_code });
        }

        let output = tee.into_string();
        let build_info_url = if is_build_publish(args) {
            self.build_info_url(&output)
        } else {
            None
        };
        debug!(execution_id = %context.execution_id(), "Command finished");
        Ok(CommandOutcome {
            output,
            build_info_url,
        })
    }

    fn build_info_url(&self, output: &str) -> Option<String> {
        match parse_build_info_url(output) {
            Ok(url) => url,
            Err(e) => {
                self.task_log
                    .warn(&format!("Illegal build-publish output: {output}"));
                self.task_log.warn(&e.to_string());
                warn!(error = %e, "Could not extract build info URL");
                None
            }
        }
    }
}
