//! Process launcher backed by `tokio::process`.

use async_trait::async_trait;
use jfkit_core::{LaunchError, LaunchRequest, ProcessLauncherPort};
use secrecy::ExposeSecret;
use std::io::Write;
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::debug;

const READ_BUFFER_SIZE: usize = 8 * 1024;

/// Launches child processes with piped stdio.
///
/// Stdout and stderr are read concurrently and relayed to the caller's
/// writer in arrival order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessLauncher;

impl TokioProcessLauncher {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessLauncherPort for TokioProcessLauncher {
    async fn launch(
        &self,
        request: LaunchRequest,
        output: &mut (dyn Write + Send),
    ) -> Result<i32, LaunchError> {
        let Some((program, args)) = request.command.as_slice().split_first() else {
            return Err(LaunchError::EmptyCommand);
        };
        let io_error = |source: std::io::Error| LaunchError::Io {
            program: program.clone(),
            source,
        };

        let mut cmd = Command::new(program);
        cmd.args(args)
            .env_clear()
            .envs(&request.env)
            .stdin(if request.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(cwd) = &request.cwd {
            cmd.current_dir(cwd);
        }

        debug!(command = %request.command, "Spawning process");
        let mut child = cmd.spawn().map_err(|source| LaunchError::Spawn {
            program: program.clone(),
            source,
        })?;

        if let (Some(secret), Some(mut stdin)) = (&request.stdin, child.stdin.take()) {
            match stdin.write_all(secret.expose_secret().as_bytes()).await {
                Ok(()) => {}
                // The child exited without reading its input
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                    debug!(program = %program, "Process closed stdin early");
                }
                Err(e) => return Err(io_error(e)),
            }
            drop(stdin);
        }

        let (tx, mut rx) = mpsc::channel::<Vec<u8>>(64);
        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(forward(stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward(stderr, tx.clone()));
        }
        drop(tx);

        while let Some(chunk) = rx.recv().await {
            output.write_all(&chunk).map_err(io_error)?;
        }
        output.flush().map_err(io_error)?;

        let status = child.wait().await.map_err(io_error)?;
        debug!(program = %program, status = %status, "Process exited");
        Ok(status.code().unwrap_or(-1))
    }
}

async fn forward<R>(mut reader: R, tx: mpsc::Sender<Vec<u8>>)
where
    R: AsyncRead + Unpin,
{
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];
    loop {
        match reader.read(&mut buffer).await {
            Ok(0) => break,
            Ok(n) => {
                if tx.send(buffer[..n].to_vec()).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                debug!(error = %e, "Stopped reading process output");
                break;
            }
        }
    }
}
