//! `jfkit` entry point.

use std::process::ExitCode;

use clap::Parser;
use jfkit_cli::{CliConfig, CliError, Commands, bootstrap, handlers};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(cli: jfkit_cli::Cli) -> anyhow::Result<()> {
    let ctx = bootstrap(CliConfig::new(cli.config))?;

    match cli.command {
        Commands::Install {
            server,
            repository,
            version,
            dir,
        } => {
            handlers::install::execute(
                &ctx,
                server.as_deref(),
                repository.as_deref(),
                &version,
                &dir,
            )
            .await?;
        }
        Commands::Run(args) => {
            handlers::run::execute(&ctx, args).await?;
        }
        Commands::Cleanup { execution } => {
            handlers::cleanup::execute(&ctx, &execution);
        }
        Commands::Ping { server } => {
            handlers::ping::execute(&ctx, &server).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = jfkit_cli::Cli::parse();
    init_tracing(cli.verbose);

    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
