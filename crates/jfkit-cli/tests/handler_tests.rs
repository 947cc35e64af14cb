//! Handler tests against a composed context.

use jfkit_cli::commands::{ExecutionArgs, RunArgs};
use jfkit_cli::{CliContext, CliError, handlers};
use jfkit_core::{CredentialLookupPort, JfkitConfig, ProcessLauncherPort, TaskLogPort};
use jfkit_runtime::env::ENCRYPTION_KEY;
use jfkit_runtime::testing::{RecordingLauncher, RecordingTaskLog};
use jfkit_runtime::{JsonCredentialStore, RuntimeError, TokioProcessLauncher};
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STORE: &str = r#"{"main-creds": {"accessToken": "tok"}}"#;

const BP_OUTPUT: &str = "[Info] Build info successfully deployed.\n\
    {\"buildInfoUiUrl\": \"https://acme.jfrog.io/ui/builds/pipeline/7/1/published\"}";

fn config(artifactory_url: &str) -> JfkitConfig {
    JfkitConfig::from_json(&format!(
        r#"{{"servers": [{{"serverId": "main", "url": "", "artifactoryUrl": "{artifactory_url}", "credentialsId": "main-creds"}}]}}"#
    ))
    .unwrap()
}

fn context(
    config: JfkitConfig,
    launcher: Arc<dyn ProcessLauncherPort>,
    task_log: Arc<dyn TaskLogPort>,
) -> CliContext {
    let credentials: Arc<dyn CredentialLookupPort> =
        Arc::new(JsonCredentialStore::from_json(STORE, "memory").unwrap());
    CliContext {
        config,
        credentials,
        launcher,
        task_log,
    }
}

fn execution(workspace: &Path) -> ExecutionArgs {
    ExecutionArgs {
        workspace: workspace.to_path_buf(),
        number: "7".to_string(),
    }
}

fn run_args(workspace: &Path, args: &[&str]) -> RunArgs {
    RunArgs {
        execution: execution(workspace),
        job_name: Some("pipeline".to_string()),
        build_url: None,
        tool_dir: Some(workspace.join("tools")),
        args: args.iter().map(ToString::to_string).collect(),
    }
}

#[tokio::test]
async fn ping_uses_server_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/artifactory/api/system/ping"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    let log = Arc::new(RecordingTaskLog::default());
    let ctx = context(
        config(&format!("{}/artifactory", server.uri())),
        Arc::new(TokioProcessLauncher::new()),
        log.clone(),
    );

    assert_eq!(handlers::ping::execute(&ctx, "main").await.unwrap(), "OK");
    assert!(log.infos()[0].ends_with("/artifactory: OK"));
}

#[tokio::test]
async fn ping_unknown_server() {
    let ctx = context(
        JfkitConfig::default(),
        Arc::new(TokioProcessLauncher::new()),
        Arc::new(RecordingTaskLog::default()),
    );

    let err = handlers::ping::execute(&ctx, "missing").await.unwrap_err();
    assert!(matches!(
        err,
        CliError::Runtime(RuntimeError::ServerNotFound(ref id)) if id == "missing"
    ));
    assert_eq!(err.to_string(), "Server id 'missing' doesn't exists.");
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn install_from_configured_server() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path_regex(r"^/artifactory/cli-remote/v2-jf/2\.40\.0/jfrog-cli-.+/jf(\.exe)?$"))
        .respond_with(ResponseTemplate::new(200).insert_header("X-Checksum-Sha256", "abc"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/artifactory/cli-remote/v2-jf/2\.40\.0/"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"binary".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let ctx = context(
        config(&format!("{}/artifactory", server.uri())),
        Arc::new(TokioProcessLauncher::new()),
        Arc::new(RecordingTaskLog::default()),
    );

    let binary = handlers::install::execute(
        &ctx,
        Some("main"),
        Some("cli-remote"),
        "2.40.0",
        dir.path(),
    )
    .await
    .unwrap();

    assert_eq!(binary.parent(), Some(dir.path()));
    assert_eq!(std::fs::read(&binary).unwrap(), b"binary");
}

#[tokio::test]
async fn install_rejects_old_version_from_server() {
    let dir = tempdir().unwrap();
    let ctx = context(
        config("https://acme.jfrog.io/artifactory"),
        Arc::new(TokioProcessLauncher::new()),
        Arc::new(RecordingTaskLog::default()),
    );

    let err = handlers::install::execute(&ctx, Some("main"), Some("cli"), "2.5.0", dir.path())
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::Runtime(RuntimeError::InvalidVersion(_))));
}

#[tokio::test]
async fn run_registers_servers_and_extracts_build_info() {
    let dir = tempdir().unwrap();
    let launcher = Arc::new(
        RecordingLauncher::new()
            .with_config_marker()
            .with_response(0, "")
            .with_response(0, BP_OUTPUT),
    );
    let log = Arc::new(RecordingTaskLog::default());
    let ctx = context(
        config("https://acme.jfrog.io/artifactory"),
        launcher.clone(),
        log.clone(),
    );

    let workspace = dir.path().join("job");
    let url = handlers::run::execute(&ctx, run_args(&workspace, &["rt", "bp"]))
        .await
        .unwrap();

    assert_eq!(
        url.as_deref(),
        Some("https://acme.jfrog.io/ui/builds/pipeline/7/1/published")
    );
    assert_eq!(launcher.registrations().len(), 1);
    let records = launcher.records();
    let last = records.last().unwrap();
    assert_eq!(&last.command[1..], ["rt", "bp"]);
    assert_eq!(last.cwd.as_deref(), Some(workspace.as_path()));
    assert!(log.infos().iter().any(|line| line.starts_with("Build info: ")));
}

#[tokio::test]
async fn run_failure_passes_exit_code() {
    let dir = tempdir().unwrap();
    let launcher = Arc::new(
        RecordingLauncher::new()
            .with_config_marker()
            .with_response(0, "")
            .with_response(3, "[Error] boom"),
    );
    let ctx = context(
        config("https://acme.jfrog.io/artifactory"),
        launcher,
        Arc::new(RecordingTaskLog::default()),
    );

    let err = handlers::run::execute(&ctx, run_args(&dir.path().join("job"), &["rt", "ping"]))
        .await
        .unwrap_err();
    assert_eq!(err.exit_code(), 3);
}

#[tokio::test]
async fn cleanup_removes_execution_home() {
    let dir = tempdir().unwrap();
    let ctx = context(
        config("https://acme.jfrog.io/artifactory"),
        Arc::new(RecordingLauncher::new().with_config_marker()),
        Arc::new(RecordingTaskLog::default()),
    );

    let workspace = dir.path().join("job");
    handlers::run::execute(&ctx, run_args(&workspace, &["rt", "ping"]))
        .await
        .unwrap();
    let home = dir.path().join("job@tmp").join("jfrog").join("7").join(".jfrog");
    assert!(home.exists());

    handlers::cleanup::execute(&ctx, &execution(&workspace));
    assert!(!home.exists());
}

#[tokio::test]
async fn separate_invocations_share_the_execution_key() {
    let dir = tempdir().unwrap();
    let workspace = dir.path().join("job");
    let first = Arc::new(RecordingLauncher::new().with_config_marker());
    let second = Arc::new(RecordingLauncher::new().with_config_marker());

    for launcher in [&first, &second] {
        let ctx = context(
            config("https://acme.jfrog.io/artifactory"),
            launcher.clone(),
            Arc::new(RecordingTaskLog::default()),
        );
        handlers::run::execute(&ctx, run_args(&workspace, &["rt", "ping"]))
            .await
            .unwrap();
    }

    assert_eq!(first.registrations().len(), 1);
    assert!(second.registrations().is_empty());
    let registered_with = &first.registrations()[0].env[ENCRYPTION_KEY];
    assert_eq!(&second.records()[0].env[ENCRYPTION_KEY], registered_with);

    let key_file = dir.path().join("job@tmp").join("jfrog").join("7").join("encryption.key");
    assert_eq!(&std::fs::read_to_string(&key_file).unwrap(), registered_with);

    let ctx = context(
        config("https://acme.jfrog.io/artifactory"),
        second.clone(),
        Arc::new(RecordingTaskLog::default()),
    );
    handlers::cleanup::execute(&ctx, &execution(&workspace));
    assert!(!key_file.exists());
}
