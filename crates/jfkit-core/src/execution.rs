//! Execution context of a single run.

use crate::paths::{DEFAULT_TEMP_SEPARATOR, ENCRYPTION_KEY_FILE, cli_home_dir, execution_dir};
use std::path::{Path, PathBuf};

/// Identifies one run and the workspace it operates in.
///
/// The execution id scopes the per-run CLI home directory so that concurrent
/// or sequential runs never share local configuration state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    execution_id: String,
    workspace: PathBuf,
    job_name: Option<String>,
    run_url: Option<String>,
    temp_separator: String,
}

impl ExecutionContext {
    pub fn new(execution_id: impl Into<String>, workspace: impl Into<PathBuf>) -> Self {
        Self {
            execution_id: execution_id.into(),
            workspace: workspace.into(),
            job_name: None,
            run_url: None,
            temp_separator: DEFAULT_TEMP_SEPARATOR.to_string(),
        }
    }

    #[must_use]
    pub fn with_job_name(mut self, job_name: impl Into<String>) -> Self {
        self.job_name = Some(job_name.into());
        self
    }

    #[must_use]
    pub fn with_run_url(mut self, run_url: impl Into<String>) -> Self {
        self.run_url = Some(run_url.into());
        self
    }

    /// Override the `@` separator of the workspace temp directory (`<workspace>@tmp`).
    #[must_use]
    pub fn with_temp_separator(mut self, separator: impl Into<String>) -> Self {
        self.temp_separator = separator.into();
        self
    }

    pub fn execution_id(&self) -> &str {
        &self.execution_id
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    pub fn job_name(&self) -> Option<&str> {
        self.job_name.as_deref()
    }

    pub fn run_url(&self) -> Option<&str> {
        self.run_url.as_deref()
    }

    /// Directory holding everything scoped to this execution (not created).
    pub fn execution_dir(&self) -> PathBuf {
        execution_dir(&self.workspace, &self.temp_separator, &self.execution_id)
    }

    /// Per-execution CLI home directory (not created).
    pub fn cli_home_dir(&self) -> PathBuf {
        cli_home_dir(&self.workspace, &self.temp_separator, &self.execution_id)
    }

    /// Key file shared by every process of this execution.
    pub fn encryption_key_path(&self) -> PathBuf {
        self.execution_dir().join(ENCRYPTION_KEY_FILE)
    }
}
