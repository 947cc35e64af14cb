//! Configuration file model and validation.
//!
//! The configuration lists the platform servers to register, an optional
//! proxy, and the location of the credential store. These are plain serde
//! types; conversion into domain types happens through the helpers below.

use crate::proxy::ProxySettings;
use crate::server::ServerInstance;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// One configured platform server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    pub server_id: String,
    pub url: String,
    pub artifactory_url: Option<String>,
    pub distribution_url: Option<String>,
    pub xray_url: Option<String>,
    pub credentials_id: String,
}

impl ServerConfig {
    pub fn to_instance(&self) -> ServerInstance {
        ServerInstance::new(
            &self.server_id,
            &self.url,
            self.artifactory_url.as_deref(),
            self.distribution_url.as_deref(),
            self.xray_url.as_deref(),
            &self.credentials_id,
        )
    }
}

/// Proxy section of the configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub no_proxy: Option<String>,
}

impl ProxyConfig {
    pub fn to_settings(&self) -> ProxySettings {
        let mut settings = ProxySettings::new(&self.host, self.port)
            .with_no_proxy(self.no_proxy.clone().unwrap_or_default());
        if let Some(username) = &self.username {
            let password = SecretString::from(self.password.clone().unwrap_or_default());
            settings = settings.with_credentials(username, password);
        }
        settings
    }
}

/// Top-level jfkit configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct JfkitConfig {
    /// Servers in registration order.
    pub servers: Vec<ServerConfig>,
    pub proxy: Option<ProxyConfig>,
    /// JSON credential store, relative paths resolve against the config file.
    pub credentials_file: Option<PathBuf>,
}

impl JfkitConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let mut config = Self::from_json(&contents)?;

        if let (Some(file), Some(base)) = (&config.credentials_file, path.parent()) {
            if file.is_relative() {
                config.credentials_file = Some(base.join(file));
            }
        }
        debug!(
            path = %path.display(),
            servers = config.servers.len(),
            "Loaded jfkit configuration"
        );
        Ok(config)
    }

    pub fn from_json(contents: &str) -> Result<Self, SettingsError> {
        let config: Self =
            serde_json::from_str(contents).map_err(|e| SettingsError::Parse(e.to_string()))?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Server instances in configuration order.
    pub fn server_instances(&self) -> Vec<ServerInstance> {
        self.servers.iter().map(ServerConfig::to_instance).collect()
    }

    pub fn find_server(&self, server_id: &str) -> Option<ServerInstance> {
        self.servers
            .iter()
            .find(|s| s.server_id == server_id)
            .map(ServerConfig::to_instance)
    }

    /// Proxy settings, `None` when no usable proxy is configured.
    pub fn proxy_settings(&self) -> Option<ProxySettings> {
        self.proxy
            .as_ref()
            .map(ProxyConfig::to_settings)
            .filter(ProxySettings::is_configured)
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Failed to read configuration {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    Parse(String),

    #[error("Server id cannot be empty")]
    EmptyServerId,

    #[error("Server id '{0}' is configured more than once")]
    DuplicateServerId(String),

    #[error("Server '{0}' needs a platform URL or an Artifactory URL")]
    MissingServerUrl(String),

    #[error("Proxy port must be between 1 and 65535")]
    InvalidProxyPort,
}

/// Validate a configuration.
pub fn validate_config(config: &JfkitConfig) -> Result<(), SettingsError> {
    let mut seen = HashSet::new();
    for server in &config.servers {
        if server.server_id.trim().is_empty() {
            return Err(SettingsError::EmptyServerId);
        }
        if !seen.insert(server.server_id.as_str()) {
            return Err(SettingsError::DuplicateServerId(server.server_id.clone()));
        }
        let has_artifactory = server
            .artifactory_url
            .as_ref()
            .is_some_and(|u| !u.trim().is_empty());
        if server.url.trim().is_empty() && !has_artifactory {
            return Err(SettingsError::MissingServerUrl(server.server_id.clone()));
        }
    }

    if let Some(proxy) = &config.proxy {
        if !proxy.host.trim().is_empty() && proxy.port == 0 {
            return Err(SettingsError::InvalidProxyPort);
        }
    }

    Ok(())
}
