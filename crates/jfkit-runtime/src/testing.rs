//! Recording fakes for tests.
//!
//! Available to this crate's tests and, through the `test-utils` feature, to
//! integration tests and dependent crates.

use crate::env::{EnvMap, HOME_DIR};
use async_trait::async_trait;
use jfkit_core::{CLI_CONFIG_MARKER, LaunchError, LaunchRequest, ProcessLauncherPort, TaskLogPort};
use secrecy::ExposeSecret;
use std::collections::VecDeque;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Launcher
// ============================================================================

/// One recorded launch.
#[derive(Debug, Clone)]
pub struct LaunchRecord {
    /// Raw arguments, secrets included.
    pub command: Vec<String>,
    /// Arguments as they would be logged.
    pub display: Vec<String>,
    pub env: EnvMap,
    pub cwd: Option<PathBuf>,
    pub stdin: Option<String>,
}

impl LaunchRecord {
    /// `jf c add ...`
    pub fn is_registration(&self) -> bool {
        self.command.get(1..3) == Some(&["c".to_string(), "add".to_string()][..])
    }
}

/// Process launcher that records requests and replays scripted results.
///
/// Scripted responses are consumed in order; once exhausted every launch
/// exits 0 with no output. `jf -v` is answered separately when a version
/// output is configured.
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    version_output: Option<String>,
    write_config_marker: bool,
    responses: Mutex<VecDeque<(i32, String)>>,
    records: Mutex<Vec<LaunchRecord>>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `jf -v` with `output`.
    #[must_use]
    pub fn with_version_output(mut self, output: impl Into<String>) -> Self {
        self.version_output = Some(output.into());
        self
    }

    /// Queue the result of the next unscripted launch.
    #[must_use]
    pub fn with_response(self, exit_code: i32, output: impl Into<String>) -> Self {
        lock(&self.responses).push_back((exit_code, output.into()));
        self
    }

    /// Behave like the CLI and create its configuration file in
    /// `JFROG_CLI_HOME_DIR` on registration.
    #[must_use]
    pub const fn with_config_marker(mut self) -> Self {
        self.write_config_marker = true;
        self
    }

    pub fn records(&self) -> Vec<LaunchRecord> {
        lock(&self.records).clone()
    }

    pub fn registrations(&self) -> Vec<LaunchRecord> {
        self.records()
            .into_iter()
            .filter(LaunchRecord::is_registration)
            .collect()
    }

    fn write_marker(env: &EnvMap) {
        if let Some(home_dir) = env.get(HOME_DIR) {
            let home_dir = Path::new(home_dir);
            let _ = std::fs::create_dir_all(home_dir);
            let _ = std::fs::write(home_dir.join(format!("{CLI_CONFIG_MARKER}.v6")), "{}");
        }
    }
}

#[async_trait]
impl ProcessLauncherPort for RecordingLauncher {
    async fn launch(
        &self,
        request: LaunchRequest,
        output: &mut (dyn Write + Send),
    ) -> Result<i32, LaunchError> {
        let record = LaunchRecord {
            command: request.command.as_slice().to_vec(),
            display: request.command.to_display_vec(),
            env: request.env.clone(),
            cwd: request.cwd.clone(),
            stdin: request.stdin.as_ref().map(|s| s.expose_secret().to_string()),
        };
        let program = record.command.first().cloned().unwrap_or_default();
        let io_error = |source: std::io::Error| LaunchError::Io {
            program: program.clone(),
            source,
        };

        let is_version = record.command.get(1).is_some_and(|arg| arg == "-v");
        let is_registration = record.is_registration();
        lock(&self.records).push(record);

        if is_version {
            if let Some(version) = &self.version_output {
                output.write_all(version.as_bytes()).map_err(io_error)?;
                return Ok(0);
            }
        }
        if is_registration && self.write_config_marker {
            Self::write_marker(&request.env);
        }

        let (exit_code, text) = lock(&self.responses).pop_front().unwrap_or_default();
        output.write_all(text.as_bytes()).map_err(io_error)?;
        Ok(exit_code)
    }
}

// ============================================================================
// Task log
// ============================================================================

/// Task log that keeps everything in memory.
#[derive(Debug, Default)]
pub struct RecordingTaskLog {
    infos: Mutex<Vec<String>>,
    warnings: Mutex<Vec<String>>,
    bytes: Mutex<Vec<u8>>,
}

impl RecordingTaskLog {
    pub fn infos(&self) -> Vec<String> {
        lock(&self.infos).clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        lock(&self.warnings).clone()
    }

    /// Forwarded process output, lossily decoded.
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&lock(&self.bytes)).into_owned()
    }
}

impl TaskLogPort for RecordingTaskLog {
    fn info(&self, message: &str) {
        lock(&self.infos).push(message.to_string());
    }

    fn warn(&self, message: &str) {
        lock(&self.warnings).push(message.to_string());
    }

    fn write_bytes(&self, bytes: &[u8]) {
        lock(&self.bytes).extend_from_slice(bytes);
    }
}
