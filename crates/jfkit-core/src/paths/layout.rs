use std::fs;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// Sidecar file next to the installed binary holding the last downloaded hash.
pub const HASH_MARKER_FILE: &str = "sha256";

/// Substring of the CLI's own configuration file name. Its presence in the
/// per-execution home directory means server profiles are registered.
pub const CLI_CONFIG_MARKER: &str = "jfrog-cli.conf";

/// Name of the CLI home directory inside the execution scope.
pub const CLI_HOME_DIR_NAME: &str = ".jfrog";

/// File holding the execution's config encryption key, next to the CLI home.
pub const ENCRYPTION_KEY_FILE: &str = "encryption.key";

/// Separator between a workspace path and its `tmp` sibling.
pub const DEFAULT_TEMP_SEPARATOR: &str = "@";

const APP_DIR_NAME: &str = "jfkit";
const CONFIG_FILE_NAME: &str = "config.json";
const DEPENDENCIES_DIR_NAME: &str = "dependencies";

/// Sibling temp directory of a workspace: `<workspace><separator>tmp`.
pub fn workspace_temp_dir(workspace: &Path, separator: &str) -> PathBuf {
    let mut name = workspace.as_os_str().to_owned();
    name.push(separator);
    name.push("tmp");
    PathBuf::from(name)
}

/// `<workspace>@tmp/jfrog/<execution id>`
pub fn execution_dir(workspace: &Path, separator: &str, execution_id: &str) -> PathBuf {
    workspace_temp_dir(workspace, separator)
        .join("jfrog")
        .join(execution_id)
}

/// `<workspace>@tmp/jfrog/<execution id>/.jfrog`
pub fn cli_home_dir(workspace: &Path, separator: &str, execution_id: &str) -> PathBuf {
    execution_dir(workspace, separator, execution_id).join(CLI_HOME_DIR_NAME)
}

pub fn hash_marker_path(install_dir: &Path) -> PathBuf {
    install_dir.join(HASH_MARKER_FILE)
}

/// Shared `dependencies` directory next to an install target.
pub fn dependencies_dir(install_dir: &Path) -> Option<PathBuf> {
    install_dir.parent().map(|parent| parent.join(DEPENDENCIES_DIR_NAME))
}

/// Root directory for jfkit's own data (`<data dir>/jfkit`).
pub fn data_root() -> Result<PathBuf, PathError> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or(PathError::NoDataDir)
}

pub fn default_config_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(CONFIG_FILE_NAME))
}

/// Create `path` and its parents if missing.
pub fn ensure_directory(path: &Path) -> Result<(), PathError> {
    if path.exists() {
        if path.is_dir() {
            return Ok(());
        }
        return Err(PathError::NotADirectory(path.to_path_buf()));
    }
    fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
