#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use nanogen_core::api::{
    CommandExecutor, EnvProvider, ExecutionError, ExecutionResult, GeminiConfig, Invocation,
    Invoker, TaskRunner,
};

/// What the fake process should do when invoked.
pub enum Scripted {
    Exit { code: i32, stdout: String },
    Missing,
    Timeout { stdout: String },
}

/// Records every invocation and plays back a scripted outcome.
pub struct RecordingExecutor {
    script: Scripted,
    calls: Mutex<Vec<Invocation>>,
}

impl RecordingExecutor {
    pub fn new(script: Scripted) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn succeeding(stdout: &str) -> Arc<Self> {
        Self::new(Scripted::Exit {
            code: 0,
            stdout: stdout.to_string(),
        })
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandExecutor for RecordingExecutor {
    fn name(&self) -> &str {
        "recording"
    }

    async fn execute(&self, invocation: &Invocation) -> Result<ExecutionResult, ExecutionError> {
        self.calls.lock().unwrap().push(invocation.clone());
        match &self.script {
            Scripted::Exit { code, stdout } => Ok(ExecutionResult {
                stdout: stdout.clone(),
                stderr: String::new(),
                exit_code: Some(*code),
                duration_ms: Some(1),
            }),
            Scripted::Missing => Err(ExecutionError::NotFound {
                program: invocation.program.clone(),
                detail: "not on PATH".into(),
            }),
            Scripted::Timeout { stdout } => Err(ExecutionError::Timeout {
                program: invocation.program.clone(),
                after: invocation.timeout.unwrap_or(Duration::from_secs(1)),
                stdout: stdout.clone(),
                stderr: String::new(),
            }),
        }
    }
}

pub struct FixedEnv(pub HashMap<String, String>);

impl EnvProvider for FixedEnv {
    fn envs(&self) -> HashMap<String, String> {
        self.0.clone()
    }
}

pub fn runner_with(executor: Arc<RecordingExecutor>, cfg: &GeminiConfig) -> TaskRunner {
    let env = Arc::new(FixedEnv(HashMap::from([(
        "GEMINI_API_KEY".to_string(),
        "test-key".to_string(),
    )])));
    TaskRunner::new(Invoker::new(cfg, executor, env), cfg.output_dir.clone())
}
