use jfkit_http::{ArtifactoryClient, TransportConfig};
use jfkit_runtime::RuntimeError;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Ping a configured server's artifact store and return the response body.
pub async fn execute(ctx: &CliContext, server_id: &str) -> Result<String, CliError> {
    let server = ctx
        .config
        .find_server(server_id)
        .ok_or_else(|| RuntimeError::ServerNotFound(server_id.to_string()))?;
    let credentials = server.credentials(ctx.credentials.as_ref())?;

    let config = TransportConfig::new(server.artifactory_url())
        .with_credentials(credentials)
        .with_proxy(ctx.config.proxy_settings());
    let body = ArtifactoryClient::new(config)?.ping().await?;
    ctx.task_log
        .info(&format!("{}: {}", server.artifactory_url(), body.trim()));
    Ok(body)
}
