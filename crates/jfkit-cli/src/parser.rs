//! Root CLI parser with global options.

use clap::Parser;
use std::path::PathBuf;

use crate::commands::Commands;

/// Provision the JFrog CLI and run it with registered server profiles.
#[derive(Debug, Parser)]
#[command(name = "jfkit")]
#[command(about = "Provision the JFrog CLI and run it against configured servers")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to <data dir>/jfkit/config.json)
    #[arg(long, env = "JFKIT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
