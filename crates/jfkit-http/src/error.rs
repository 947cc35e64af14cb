//! Transport error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors raised by the Artifactory transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a non-2xx status.
    #[error("Request to {url} failed: {status_line}")]
    UnexpectedStatus {
        /// Numeric HTTP status
        status: u16,
        /// Protocol version and status, e.g. `HTTP/1.1 404 Not Found`
        status_line: String,
        /// The URL that was requested
        url: String,
    },

    /// A redirect response had no usable `Location` header.
    #[error("Redirect from {url} (status {status}) has no valid Location header")]
    InvalidRedirect { url: String, status: u16 },

    /// The redirect chain exceeded the configured limit.
    #[error("Too many redirects (max {max}) while requesting {url}")]
    TooManyRedirects { url: String, max: usize },

    /// A URL could not be built from the base URL and path.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Writing a downloaded body to disk failed.
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TransportError {
    /// HTTP status carried by the error, if any.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } | Self::InvalidRedirect { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_status_message_keeps_status_line() {
        let error = TransportError::UnexpectedStatus {
            status: 404,
            status_line: "HTTP/1.1 404 Not Found".to_string(),
            url: "https://acme.jfrog.io/artifactory/jfrog-cli/x".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("HTTP/1.1 404 Not Found"));
        assert!(msg.contains("acme.jfrog.io"));
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn test_status_absent_for_other_errors() {
        let error = TransportError::ClientBuild("boom".to_string());
        assert_eq!(error.status(), None);
    }
}
