use std::path::{Path, PathBuf};
use std::sync::Arc;

use jfkit_runtime::{InstallRequest, InstallSource, Installer};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Install the CLI and return the binary path.
///
/// With a server and repository the binary comes from that server,
/// otherwise from the public releases store.
pub async fn execute(
    ctx: &CliContext,
    server: Option<&str>,
    repository: Option<&str>,
    version: &str,
    dir: &Path,
) -> Result<PathBuf, CliError> {
    let source = match (server, repository) {
        (Some(server_id), Some(repository)) => {
            InstallSource::from_config(&ctx.config, server_id, repository)?
        }
        _ => InstallSource::Releases,
    };

    let installer = Installer::new(
        source,
        Arc::clone(&ctx.credentials),
        Arc::clone(&ctx.task_log),
    )
    .with_proxy(ctx.config.proxy_settings());

    let binary = installer
        .install(&InstallRequest::new(dir).with_version(version))
        .await?;
    println!("{}", binary.display());
    Ok(binary)
}
