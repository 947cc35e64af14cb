//! Per-execution workspace cleanup.

use jfkit_core::{ExecutionContext, TaskLogPort};
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Delete the execution's CLI home directory and its encryption key.
///
/// Cleanup is best-effort: failures are reported on the task log and never
/// returned. Returns whether both are gone afterwards.
pub fn cleanup_cli_home(context: &ExecutionContext, task_log: &dyn TaskLogPort) -> bool {
    let home_dir = context.cli_home_dir();
    let home_removed = if home_dir.exists() {
        match std::fs::remove_dir_all(&home_dir) {
            Ok(()) => {
                task_log.info(&format!("{} deleted", home_dir.display()));
                true
            }
            Err(e) => {
                task_log.warn(&format!(
                    "Failed while attempting to delete the JFrog CLI home dir \n{e}"
                ));
                false
            }
        }
    } else {
        debug!(path = %home_dir.display(), "CLI home dir does not exist, nothing to clean");
        true
    };

    let key_removed = remove_encryption_key(&context.encryption_key_path(), task_log);
    if home_removed && key_removed {
        // Drop the now empty execution directory as well
        let _ = std::fs::remove_dir(context.execution_dir());
    }
    home_removed && key_removed
}

fn remove_encryption_key(path: &Path, task_log: &dyn TaskLogPort) -> bool {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Deleted execution encryption key");
            true
        }
        Err(e) if e.kind() == ErrorKind::NotFound => true,
        Err(e) => {
            task_log.warn(&format!(
                "Failed while attempting to delete the JFrog CLI encryption key \n{e}"
            ));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTaskLog;
    use tempfile::tempdir;

    #[test]
    fn test_cleanup_removes_home_dir() {
        let dir = tempdir().unwrap();
        let workspace = dir.path().join("job");
        let context = ExecutionContext::new("5", &workspace);
        let home_dir = context.cli_home_dir();
        std::fs::create_dir_all(&home_dir).unwrap();
        std::fs::write(home_dir.join("jfrog-cli.conf.v6"), "{}").unwrap();

        let log = RecordingTaskLog::default();
        assert!(cleanup_cli_home(&context, &log));

        assert!(!home_dir.exists());
        assert!(!home_dir.parent().unwrap().exists());
        assert_eq!(log.infos(), vec![format!("{} deleted", home_dir.display())]);
    }

    #[test]
    fn test_cleanup_removes_encryption_key() {
        let dir = tempdir().unwrap();
        let context = ExecutionContext::new("5", dir.path().join("job"));
        std::fs::create_dir_all(context.cli_home_dir()).unwrap();
        std::fs::write(context.encryption_key_path(), "0123").unwrap();

        let log = RecordingTaskLog::default();
        assert!(cleanup_cli_home(&context, &log));

        assert!(!context.encryption_key_path().exists());
        assert!(!context.execution_dir().exists());
        assert!(log.warnings().is_empty());
    }

    #[test]
    fn test_cleanup_keeps_other_executions() {
        let dir = tempdir().unwrap();
        let workspace = dir.path().join("job");
        let current = ExecutionContext::new("5", &workspace);
        let other = ExecutionContext::new("6", &workspace);
        std::fs::create_dir_all(current.cli_home_dir()).unwrap();
        std::fs::create_dir_all(other.cli_home_dir()).unwrap();

        assert!(cleanup_cli_home(&current, &RecordingTaskLog::default()));
        assert!(other.cli_home_dir().exists());
    }

    #[test]
    fn test_cleanup_of_missing_dir_is_quiet() {
        let dir = tempdir().unwrap();
        let context = ExecutionContext::new("5", dir.path().join("job"));
        let log = RecordingTaskLog::default();

        assert!(cleanup_cli_home(&context, &log));
        assert!(log.infos().is_empty());
        assert!(log.warnings().is_empty());
    }
}
