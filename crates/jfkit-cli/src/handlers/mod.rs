//! Command handlers.
//!
//! Each handler takes the composed [`CliContext`](crate::CliContext), calls
//! into `jfkit-runtime` and formats the result for the terminal.

pub mod cleanup;
pub mod install;
pub mod ping;
pub mod run;
