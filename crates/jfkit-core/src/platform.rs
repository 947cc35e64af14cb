//! Operating system and CPU architecture resolution.
//!
//! Maps the host (or any given OS/architecture pair) to the canonical platform
//! token embedded in download paths, e.g. `linux-amd64` or `mac-arm64`.

use thiserror::Error;

/// Name of the CLI binary on Unix-like systems.
pub const UNIX_BINARY_NAME: &str = "jf";

/// Name of the CLI binary on Windows.
pub const WINDOWS_BINARY_NAME: &str = "jf.exe";

/// Errors raised while resolving the platform token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlatformError {
    /// The OS family or the architecture is not in the supported set.
    #[error("Unsupported operating system: {arch}")]
    UnsupportedPlatform {
        /// Raw architecture string as reported by the host
        arch: String,
    },
}

/// Operating system families with distinct download artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    Mac,
    /// Linux and other Unix flavours served by the `linux-*` artifacts.
    Unix,
}

impl OsFamily {
    /// Classify a raw OS name (`windows`, `macos`, `Mac OS X`, `linux`, `aix`, ...).
    ///
    /// Returns `None` for unrecognized families.
    pub fn from_os_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        // "darwin" contains "win", so macOS is matched first
        if name.contains("mac") || name.contains("darwin") {
            Some(Self::Mac)
        } else if name.contains("win") {
            Some(Self::Windows)
        } else if ["nix", "nux", "aix"].iter().any(|s| name.contains(s)) {
            Some(Self::Unix)
        } else {
            None
        }
    }
}

/// Resolve the platform token for an OS name and architecture string.
///
/// Windows always resolves to `windows-amd64`. macOS splits into `mac-arm64`
/// and `mac-386`. Every other supported family uses the `linux-*` artifacts
/// and must have an architecture from the known alias table.
pub fn resolve_platform(os_name: &str, arch: &str) -> Result<&'static str, PlatformError> {
    let unsupported = || PlatformError::UnsupportedPlatform {
        arch: arch.to_string(),
    };
    let arch_lower = arch.to_ascii_lowercase();

    match OsFamily::from_os_name(os_name).ok_or_else(unsupported)? {
        OsFamily::Windows => Ok("windows-amd64"),
        OsFamily::Mac => {
            if arch_lower.contains("arm64") || arch_lower == "aarch64" {
                Ok("mac-arm64")
            } else {
                Ok("mac-386")
            }
        }
        OsFamily::Unix => match arch_lower.as_str() {
            "i386" | "i486" | "i586" | "i686" | "i786" | "x86" => Ok("linux-386"),
            "amd64" | "x86_64" | "x64" => Ok("linux-amd64"),
            "arm" | "armv7l" => Ok("linux-arm"),
            "aarch64" => Ok("linux-arm64"),
            "s390x" => Ok("linux-s390x"),
            "ppc64" => Ok("linux-ppc64"),
            "ppc64le" => Ok("linux-ppc64le"),
            _ => Err(unsupported()),
        },
    }
}

/// Resolve the platform token of the running host.
pub fn current_platform() -> Result<&'static str, PlatformError> {
    resolve_platform(std::env::consts::OS, host_arch())
}

/// Rust reports `powerpc64` for both endiannesses; translate to the alias table.
fn host_arch() -> &'static str {
    match std::env::consts::ARCH {
        "powerpc64" if cfg!(target_endian = "little") => "ppc64le",
        "powerpc64" => "ppc64",
        other => other,
    }
}

/// CLI binary file name for the target OS.
pub const fn binary_name(is_windows: bool) -> &'static str {
    if is_windows {
        WINDOWS_BINARY_NAME
    } else {
        UNIX_BINARY_NAME
    }
}

/// Resolve the CLI binary path from an optional binary directory.
///
/// With no directory the bare binary name is returned so the system `PATH`
/// is used. Separators are normalised to the target OS.
pub fn resolve_binary_path(binary_dir: Option<&str>, is_windows: bool) -> String {
    let name = binary_name(is_windows);
    let joined = match binary_dir.map(str::trim).filter(|d| !d.is_empty()) {
        Some(dir) => format!("{}/{name}", dir.trim_end_matches(['/', '\\'])),
        None => name.to_string(),
    };

    if is_windows {
        joined.replace('/', "\\")
    } else {
        joined.replace('\\', "/")
    }
}
