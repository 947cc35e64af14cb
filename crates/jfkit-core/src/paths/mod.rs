//! Filesystem layout used by jfkit.
//!
//! Install targets hold the binary and its hash marker. Each execution gets
//! its own CLI home directory under the workspace temp directory.

mod error;
mod layout;

pub use error::PathError;
pub use layout::{
    CLI_CONFIG_MARKER, CLI_HOME_DIR_NAME, DEFAULT_TEMP_SEPARATOR, ENCRYPTION_KEY_FILE,
    HASH_MARKER_FILE, cli_home_dir, data_root, default_config_path, dependencies_dir,
    ensure_directory, execution_dir, hash_marker_path, workspace_temp_dir,
};
