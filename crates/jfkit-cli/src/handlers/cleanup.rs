use jfkit_runtime::cleanup_cli_home;

use crate::bootstrap::CliContext;
use crate::commands::ExecutionArgs;
use crate::handlers::run::execution_context;

/// Best-effort removal of the execution's CLI home directory.
pub fn execute(ctx: &CliContext, args: &ExecutionArgs) {
    cleanup_cli_home(&execution_context(args), ctx.task_log.as_ref());
}
