//! Port definitions for collaborators outside the core.
//!
//! The host platform supplies credential lookup, process launching and the
//! operator-facing task log. Concrete adapters live in `jfkit-runtime`.

mod credentials;
mod process;
mod task_log;

pub use credentials::{CredentialError, CredentialLookupPort};
pub use process::{LaunchError, LaunchRequest, ProcessLauncherPort};
pub use task_log::TaskLogPort;

#[cfg(test)]
pub use credentials::MockCredentialLookupPort;
