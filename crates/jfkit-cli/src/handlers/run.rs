use std::sync::Arc;

use jfkit_core::{ExecutionContext, ensure_directory};
use jfkit_runtime::{CommandRunner, EnvMap, RuntimeError, installation_env};

use crate::bootstrap::CliContext;
use crate::commands::{ExecutionArgs, RunArgs};
use crate::error::CliError;

pub(crate) fn execution_context(args: &ExecutionArgs) -> ExecutionContext {
    ExecutionContext::new(args.number.as_str(), args.workspace.as_path())
}

/// Run `jf` with the configured servers registered for this execution.
pub async fn execute(ctx: &CliContext, args: RunArgs) -> Result<Option<String>, CliError> {
    let mut context = execution_context(&args.execution);
    if let Some(job_name) = &args.job_name {
        context = context.with_job_name(job_name.as_str());
    }
    if let Some(build_url) = &args.build_url {
        context = context.with_run_url(build_url.as_str());
    }
    ensure_directory(context.workspace()).map_err(RuntimeError::from)?;

    let mut env: EnvMap = std::env::vars().collect();
    if let Some(tool_dir) = &args.tool_dir {
        installation_env(&mut env, tool_dir);
    }

    let runner = CommandRunner::new(
        Arc::clone(&ctx.launcher),
        Arc::clone(&ctx.credentials),
        Arc::clone(&ctx.task_log),
    )
    .with_servers(ctx.config.server_instances())
    .with_proxy(ctx.config.proxy_settings())
    .with_env(env);

    let outcome = runner.run(&args.args, &context).await?;
    if let Some(url) = &outcome.build_info_url {
        ctx.task_log.info(&format!("Build info: {url}"));
    }
    Ok(outcome.build_info_url)
}
