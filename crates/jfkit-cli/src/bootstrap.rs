//! CLI bootstrap: the composition root.
//!
//! Loads the configuration and credential store and picks the concrete
//! launcher and task log. Handlers only see the resulting [`CliContext`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use jfkit_core::{
    CredentialLookupPort, JfkitConfig, ProcessLauncherPort, TaskLogPort, default_config_path,
};
use jfkit_runtime::{ConsoleTaskLog, JsonCredentialStore, TokioProcessLauncher};
use tracing::debug;

/// Where to read the configuration from.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Explicit configuration file, from `--config` or `JFKIT_CONFIG`.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self { config_path }
    }
}

/// Fully composed context for command handlers.
pub struct CliContext {
    pub config: JfkitConfig,
    pub credentials: Arc<dyn CredentialLookupPort>,
    pub launcher: Arc<dyn ProcessLauncherPort>,
    pub task_log: Arc<dyn TaskLogPort>,
}

/// Build the CLI context.
///
/// An explicit configuration file must exist. Without one the default
/// location is used when present, otherwise an empty configuration (enough
/// for installing from the releases store).
pub fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let jfkit_config = load_config(config.config_path.as_deref())?;

    let credentials: Arc<dyn CredentialLookupPort> = match &jfkit_config.credentials_file {
        Some(path) => Arc::new(
            JsonCredentialStore::load(path)
                .with_context(|| format!("Loading credentials from {}", path.display()))?,
        ),
        None => Arc::new(JsonCredentialStore::empty()),
    };

    Ok(CliContext {
        config: jfkit_config,
        credentials,
        launcher: Arc::new(TokioProcessLauncher::new()),
        task_log: Arc::new(ConsoleTaskLog),
    })
}

fn load_config(explicit: Option<&Path>) -> Result<JfkitConfig> {
    if let Some(path) = explicit {
        return JfkitConfig::load(path)
            .with_context(|| format!("Loading configuration from {}", path.display()));
    }

    let default_path = default_config_path()?;
    if default_path.exists() {
        return JfkitConfig::load(&default_path)
            .with_context(|| format!("Loading configuration from {}", default_path.display()));
    }
    debug!(path = %default_path.display(), "No configuration file, using defaults");
    Ok(JfkitConfig::default())
}
