//! Command-line adapter for jfkit.
//!
//! `main.rs` wires the configuration, credential store and task log together
//! through [`bootstrap`] and dispatches to [`handlers`].

#![deny(unused_crate_dependencies)]

// Used by main.rs only
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

#[cfg(test)]
use wiremock as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
