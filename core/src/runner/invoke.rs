use std::sync::Arc;
use std::time::Duration;

use super::traits::{CommandExecutor, EnvProvider};
use super::types::{CommandLine, ExecutionResult, Invocation};
use crate::config::GeminiConfig;
use crate::error::ExecutionError;
use crate::render::RenderedCommand;

/// Hands rendered commands to the external CLI through an injected executor.
#[derive(Clone)]
pub struct Invoker {
    program: String,
    auto_approve_flag: String,
    prompt_flag: String,
    timeout: Option<Duration>,
    executor: Arc<dyn CommandExecutor>,
    env: Arc<dyn EnvProvider>,
}

impl Invoker {
    pub fn new(
        cfg: &GeminiConfig,
        executor: Arc<dyn CommandExecutor>,
        env: Arc<dyn EnvProvider>,
    ) -> Self {
        Self {
            program: cfg.bin.clone(),
            auto_approve_flag: cfg.auto_approve_flag.clone(),
            prompt_flag: cfg.prompt_flag.clone(),
            timeout: cfg.timeout(),
            executor,
            env,
        }
    }

    pub fn command_line(&self, command: RenderedCommand) -> CommandLine {
        CommandLine {
            program: self.program.clone(),
            auto_approve_flag: self.auto_approve_flag.clone(),
            prompt_flag: self.prompt_flag.clone(),
            command,
        }
    }

    /// Runs the command line and insists on a zero exit status.
    pub async fn invoke(&self, line: &CommandLine) -> Result<ExecutionResult, ExecutionError> {
        let invocation = Invocation {
            program: line.program.clone(),
            args: line.args(),
            envs: self.env.envs(),
            timeout: self.timeout,
        };

        tracing::info!(executor = self.executor.name(), "invoking: {}", line.echo());
        tracing::debug!(
            args = ?invocation.args,
            env_keys = ?invocation.envs.keys().collect::<Vec<_>>(),
            timeout = ?invocation.timeout,
            "invocation prepared"
        );

        let result = self.executor.execute(&invocation).await?;

        if !result.success() {
            tracing::warn!(
                "{} exited with {:?} after {:?}ms",
                line.program,
                result.exit_code,
                result.duration_ms
            );
            return Err(ExecutionError::NonZeroExit {
                program: line.program.clone(),
                code: result.exit_code,
                stdout: result.stdout,
                stderr: result.stderr,
            });
        }

        tracing::info!(
            "{} completed in {:?}ms ({} bytes of output)",
            line.program,
            result.duration_ms,
            result.stdout.len()
        );
        Ok(result)
    }
}
