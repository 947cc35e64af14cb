//! Subcommand definitions.

use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download the JFrog CLI into a directory (prints the binary path)
    Install {
        /// Configured server to download from (default: releases.jfrog.io)
        #[arg(long, requires = "repository")]
        server: Option<String>,

        /// Repository on that server holding the CLI
        #[arg(long, requires = "server")]
        repository: Option<String>,

        /// CLI version in X.Y.Z form (default: latest)
        #[arg(long = "cli-version", default_value = "")]
        version: String,

        /// Install directory
        #[arg(long)]
        dir: PathBuf,
    },

    /// Run a `jf` command within an execution
    Run(RunArgs),

    /// Delete the CLI home directory of an execution
    Cleanup {
        #[command(flatten)]
        execution: ExecutionArgs,
    },

    /// Check connectivity to a configured server
    Ping {
        /// Server id
        #[arg(long)]
        server: String,
    },
}

/// Identifies one execution.
#[derive(Debug, Clone, Args)]
pub struct ExecutionArgs {
    /// Workspace directory of the run
    #[arg(long)]
    pub workspace: PathBuf,

    /// Execution id, e.g. the build number
    #[arg(long)]
    pub number: String,
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub execution: ExecutionArgs,

    /// Build name recorded by the CLI
    #[arg(long)]
    pub job_name: Option<String>,

    /// Build URL recorded by the CLI
    #[arg(long)]
    pub build_url: Option<String>,

    /// Directory of an installed CLI (default: from JFROG_BINARY_PATH or PATH)
    #[arg(long)]
    pub tool_dir: Option<PathBuf>,

    /// Arguments passed to `jf`
    #[arg(last = true, required = true)]
    pub args: Vec<String>,
}
