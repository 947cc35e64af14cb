//! Adapters implementing the `jfkit-core` ports.

mod console_log;
mod credential_store;

pub use console_log::ConsoleTaskLog;
pub use credential_store::JsonCredentialStore;
