use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use nanogen_core::api::{CommandExecutor, ExecutionError, ExecutionResult, Invocation};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;

use crate::backend::resolve_executable_path;

/// How long to keep collecting output after a timed-out child has been killed.
const DRAIN_GRACE: Duration = Duration::from_millis(500);

/// Spawns the external CLI with tokio and captures its output.
pub struct CodeCliExecutor {
    resolve: bool,
}

impl CodeCliExecutor {
    pub fn new() -> Self {
        Self { resolve: true }
    }

    /// Skip PATH/npm resolution and hand the program name straight to the OS.
    pub fn without_resolution() -> Self {
        Self { resolve: false }
    }

    async fn program_path(&self, program: &str) -> Result<String, ExecutionError> {
        if !self.resolve {
            return Ok(program.to_string());
        }
        let name = program.to_string();
        let resolved = tokio::task::spawn_blocking(move || resolve_executable_path(&name))
            .await
            .map_err(|e| ExecutionError::Spawn {
                program: program.to_string(),
                source: std::io::Error::other(e),
            })?;
        resolved.map_err(|e| ExecutionError::NotFound {
            program: program.to_string(),
            detail: e.to_string(),
        })
    }
}

impl Default for CodeCliExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandExecutor for CodeCliExecutor {
    fn name(&self) -> &str {
        "codecli"
    }

    async fn execute(&self, invocation: &Invocation) -> Result<ExecutionResult, ExecutionError> {
        let program = invocation.program.as_str();
        let exe_path = self.program_path(program).await?;
        tracing::debug!("Resolved executable path: {}", exe_path);

        let started = Instant::now();
        let mut child = Command::new(&exe_path)
            .args(&invocation.args)
            .envs(&invocation.envs)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ExecutionError::NotFound {
                    program: program.to_string(),
                    detail: e.to_string(),
                },
                _ => ExecutionError::Spawn {
                    program: program.to_string(),
                    source: e,
                },
            })?;

        let stdout = Capture::start(child.stdout.take());
        let stderr = Capture::start(child.stderr.take());

        let waited = match invocation.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait()).await.ok(),
            None => Some(child.wait().await),
        };

        let Some(status) = waited else {
            let limit = invocation.timeout.unwrap_or_default();
            tracing::warn!("{} timed out after {:?}, killing", program, limit);
            if let Err(e) = child.kill().await {
                tracing::warn!("failed to kill {}: {}", program, e);
            }
            return Err(ExecutionError::Timeout {
                program: program.to_string(),
                after: limit,
                stdout: stdout.finish(Some(DRAIN_GRACE)).await,
                stderr: stderr.finish(Some(DRAIN_GRACE)).await,
            });
        };

        let status = status.map_err(|e| ExecutionError::Io {
            program: program.to_string(),
            source: e,
        })?;

        Ok(ExecutionResult {
            stdout: stdout.finish(None).await,
            stderr: stderr.finish(None).await,
            exit_code: status.code(),
            duration_ms: Some(started.elapsed().as_millis() as u64),
        })
    }
}

/// Accumulates one pipe in the background so partial output survives a kill.
struct Capture {
    buf: Arc<Mutex<Vec<u8>>>,
    handle: JoinHandle<()>,
}

impl Capture {
    fn start<R>(reader: Option<R>) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let sink = buf.clone();
        let handle = tokio::spawn(async move {
            let Some(mut rd) = reader else {
                return;
            };
            let mut chunk = vec![0u8; 16 * 1024];
            loop {
                match rd.read(&mut chunk).await {
                    Ok(0) => break,
                    Ok(n) => {
                        if let Ok(mut guard) = sink.lock() {
                            guard.extend_from_slice(&chunk[..n]);
                        }
                    }
                    Err(e) => {
                        tracing::debug!("pipe read failed: {}", e);
                        break;
                    }
                }
            }
        });
        Self { buf, handle }
    }

    /// Waits for EOF (bounded by `grace` if given) and returns what was read, lossily decoded.
    async fn finish(self, grace: Option<Duration>) -> String {
        let Capture { buf, mut handle } = self;
        match grace {
            Some(grace) => {
                if tokio::time::timeout(grace, &mut handle).await.is_err() {
                    tracing::debug!("output still open after kill; returning what was captured");
                    handle.abort();
                }
            }
            None => {
                let _ = handle.await;
            }
        }
        let bytes = buf.lock().map(|g| g.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn invocation(program: &str, args: &[&str], timeout: Option<Duration>) -> Invocation {
        Invocation {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            envs: HashMap::new(),
            timeout,
        }
    }

    #[tokio::test]
    async fn missing_binary_is_not_found() {
        let exec = CodeCliExecutor::new();
        let err = exec
            .execute(&invocation("nanogen-no-such-binary-4f1c", &[], None))
            .await
            .unwrap_err();
        assert!(matches!(err, ExecutionError::NotFound { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn missing_binary_without_resolution_is_not_found() {
        let exec = CodeCliExecutor::without_resolution();
        let err = exec
            .execute(&invocation("nanogen-no-such-binary-4f1c", &[], None))
            .await
            .unwrap_err();
        assert!(matches!(err, ExecutionError::NotFound { .. }), "{err:?}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_stdout_and_exit_code() {
        let exec = CodeCliExecutor::new();
        let result = exec
            .execute(&invocation("sh", &["-c", "echo generated; echo warn >&2"], None))
            .await
            .unwrap();
        assert_eq!(result.stdout, "generated\n");
        assert_eq!(result.stderr, "warn\n");
        assert!(result.success());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_returned_not_raised() {
        let exec = CodeCliExecutor::new();
        let result = exec
            .execute(&invocation("sh", &["-c", "echo partial; exit 3"], None))
            .await
            .unwrap();
        assert_eq!(result.exit_code, Some(3));
        assert_eq!(result.stdout, "partial\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn env_overlay_reaches_child() {
        let exec = CodeCliExecutor::new();
        let mut inv = invocation("sh", &["-c", "printf %s \"$NANOBANANA_MODEL\""], None);
        inv.envs
            .insert("NANOBANANA_MODEL".into(), "gemini-3-pro-image-preview".into());
        let result = exec.execute(&inv).await.unwrap();
        assert_eq!(result.stdout, "gemini-3-pro-image-preview");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn timeout_kills_child_and_keeps_partial_output() {
        let exec = CodeCliExecutor::new();
        let started = Instant::now();
        let err = exec
            .execute(&invocation(
                "sh",
                &["-c", "echo working; exec sleep 30"],
                Some(Duration::from_millis(300)),
            ))
            .await
            .unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(10));
        match err {
            ExecutionError::Timeout { after, stdout, .. } => {
                assert_eq!(after, Duration::from_millis(300));
                assert_eq!(stdout, "working\n");
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn prompt_argument_is_passed_as_one_argv_entry() {
        let exec = CodeCliExecutor::new();
        let result = exec
            .execute(&invocation(
                "sh",
                &["-c", "printf '%s|' \"$@\"", "sh", "--yolo", "-p", "/icon \"gear\" --preview"],
                None,
            ))
            .await
            .unwrap();
        assert_eq!(result.stdout, "--yolo|-p|/icon \"gear\" --preview|");
    }
}
