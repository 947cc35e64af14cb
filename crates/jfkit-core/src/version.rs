//! CLI version parsing and the version thresholds jfkit depends on.

use semver::Version;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Oldest CLI release the artifact-store installer can provision.
pub const MIN_INSTALLER_VERSION: CliVersion = CliVersion(Version::new(2, 6, 1));

/// First CLI release accepting `--password-stdin` on `c add`.
pub const MIN_PASSWORD_STDIN_VERSION: CliVersion = CliVersion(Version::new(2, 31, 3));

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("Version must be in the form of X.X.X")]
    InvalidFormat,

    #[error("The provided JFrog CLI version must be at least {minimum}")]
    BelowMinimum { minimum: CliVersion },

    #[error("Unable to parse JFrog CLI version from '{0}'")]
    Unparseable(String),
}

/// A JFrog CLI release version.
///
/// Parsing is lenient: missing minor/patch components default to zero and a
/// leading `v` is ignored, so `jf -v` output from any release can be compared.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CliVersion(Version);

impl CliVersion {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(Version::new(major, minor, patch))
    }

    /// Parse the output of `jf -v`, e.g. `jf version 2.31.0`.
    ///
    /// The version is the last whitespace-separated token of the trimmed output.
    pub fn from_version_output(output: &str) -> Result<Self, VersionError> {
        output
            .split_whitespace()
            .last()
            .ok_or_else(|| VersionError::Unparseable(output.trim().to_string()))?
            .parse()
    }

    pub fn is_at_least(&self, other: &Self) -> bool {
        self >= other
    }

    pub fn supports_password_stdin(&self) -> bool {
        self.is_at_least(&MIN_PASSWORD_STDIN_VERSION)
    }
}

impl FromStr for CliVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('v');
        if let Ok(version) = Version::parse(trimmed) {
            return Ok(Self(version));
        }

        let unparseable = || VersionError::Unparseable(s.trim().to_string());
        let mut parts = [0u64; 3];
        let components: Vec<&str> = trimmed.split('.').collect();
        if components.is_empty() || components.len() > 3 {
            return Err(unparseable());
        }
        for (slot, component) in parts.iter_mut().zip(&components) {
            *slot = component.parse().map_err(|_| unparseable())?;
        }
        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}

impl fmt::Display for CliVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validate a user-requested CLI version for the artifact-store installer.
///
/// Blank means "latest" and is always accepted. Anything else must be a plain
/// `X.Y.Z` triple no older than [`MIN_INSTALLER_VERSION`].
pub fn validate_cli_version(version: &str) -> Result<(), VersionError> {
    let version = version.trim();
    if version.is_empty() {
        return Ok(());
    }

    let components: Vec<&str> = version.split('.').collect();
    let well_formed = components.len() == 3
        && components
            .iter()
            .all(|c| !c.is_empty() && c.bytes().all(|b| b.is_ascii_digit()));
    if !well_formed {
        return Err(VersionError::InvalidFormat);
    }

    let parsed: CliVersion = version.parse()?;
    if parsed.is_at_least(&MIN_INSTALLER_VERSION) {
        Ok(())
    } else {
        Err(VersionError::BelowMinimum {
            minimum: MIN_INSTALLER_VERSION,
        })
    }
}
