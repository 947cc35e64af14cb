//! Core domain types and port definitions for jfkit.
//!
//! Everything in this crate is free of network and process concerns. The
//! transport lives in `jfkit-http`; provisioning, bootstrap and command
//! execution live in `jfkit-runtime`.

#![deny(unused_crate_dependencies)]

pub mod arguments;
pub mod credentials;
pub mod execution;
pub mod paths;
pub mod platform;
pub mod ports;
pub mod proxy;
pub mod server;
pub mod settings;
pub mod version;

pub use arguments::{ArgumentList, MASK};
pub use credentials::{AuthMode, Credentials};
pub use execution::ExecutionContext;
pub use paths::{
    CLI_CONFIG_MARKER, CLI_HOME_DIR_NAME, DEFAULT_TEMP_SEPARATOR, ENCRYPTION_KEY_FILE,
    HASH_MARKER_FILE, PathError, cli_home_dir, data_root, default_config_path, dependencies_dir,
    ensure_directory, execution_dir, hash_marker_path, workspace_temp_dir,
};
pub use platform::{
    OsFamily, PlatformError, binary_name, current_platform, resolve_binary_path, resolve_platform,
};
pub use ports::{
    CredentialError, CredentialLookupPort, LaunchError, LaunchRequest, ProcessLauncherPort,
    TaskLogPort,
};
pub use proxy::{ProxySettings, create_no_proxy_value, extract_host};
pub use server::ServerInstance;
pub use settings::{JfkitConfig, ProxyConfig, ServerConfig, SettingsError, validate_config};
pub use version::{
    CliVersion, MIN_INSTALLER_VERSION, MIN_PASSWORD_STDIN_VERSION, VersionError,
    validate_cli_version,
};
