//! Authenticated HTTP transport for Artifactory.
//!
//! Requests carry credentials preemptively (bearer token or basic auth) so no
//! 401 challenge round-trip is needed. Redirects are followed manually: the
//! original host is captured on the first redirect and credentials are only
//! attached to hops that stay on that host.
//!
//! # Example
//!
//! ```no_run
//! use jfkit_core::Credentials;
//! use jfkit_http::{ArtifactoryClient, TransportConfig};
//!
//! # async fn example() -> jfkit_http::TransportResult<()> {
//! let config = TransportConfig::new("https://acme.jfrog.io/artifactory")
//!     .with_credentials(&Credentials::from_access_token("token"));
//! let client = ArtifactoryClient::new(config)?;
//! client.ping().await?;
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod config;
mod error;
mod redirect;

pub use auth::PreemptiveAuth;
pub use client::{ArtifactoryClient, PING_ENDPOINT, SHA256_HEADER};
pub use config::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT, TransportConfig};
pub use error::{TransportError, TransportResult};
pub use redirect::{REDIRECTABLE_METHODS, RedirectContext, is_redirect_status, is_redirectable};
