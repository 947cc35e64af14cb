//! Cache gate deciding whether the binary must be downloaded again.
//!
//! The hash marker is a change-detection signal, not an integrity check.

use crate::error::{RuntimeError, RuntimeResult};
use jfkit_core::hash_marker_path;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Whether the binary in `install_dir` must be (re)downloaded.
///
/// An empty remote hash always downloads. A missing marker downloads.
/// Otherwise the marker content is compared byte-for-byte with the remote hash.
pub fn should_download(install_dir: &Path, remote_sha256: &str) -> RuntimeResult<bool> {
    if remote_sha256.is_empty() {
        debug!("Remote hash unavailable, downloading");
        return Ok(true);
    }

    let marker = hash_marker_path(install_dir);
    match std::fs::read(&marker) {
        Ok(content) => Ok(content != remote_sha256.as_bytes()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(true),
        Err(e) => Err(RuntimeError::io(marker, e)),
    }
}

/// Persist the hash of a fresh download.
pub fn write_marker(install_dir: &Path, remote_sha256: &str) -> RuntimeResult<()> {
    let marker = hash_marker_path(install_dir);
    std::fs::write(&marker, remote_sha256).map_err(|e| RuntimeError::io(marker, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_remote_hash_always_downloads() {
        let dir = tempdir().unwrap();
        assert!(should_download(dir.path(), "").unwrap());

        write_marker(dir.path(), "").unwrap();
        assert!(should_download(dir.path(), "").unwrap());

        write_marker(dir.path(), "abc").unwrap();
        assert!(should_download(dir.path(), "").unwrap());
    }

    #[test]
    fn test_missing_marker_downloads() {
        let dir = tempdir().unwrap();
        assert!(should_download(dir.path(), "abc").unwrap());
    }

    #[test]
    fn test_matching_marker_skips() {
        let dir = tempdir().unwrap();
        write_marker(dir.path(), "abc").unwrap();
        assert!(!should_download(dir.path(), "abc").unwrap());
    }

    #[test]
    fn test_mismatch_downloads() {
        let dir = tempdir().unwrap();
        write_marker(dir.path(), "abc").unwrap();
        assert!(should_download(dir.path(), "def").unwrap());
        // Byte-for-byte: no trimming
        assert!(should_download(dir.path(), "abc\n").unwrap());
    }
}
