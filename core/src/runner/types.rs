use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;

use crate::render::RenderedCommand;

/// One fully resolved process launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Overlaid on the inherited environment.
    pub envs: HashMap<String, String>,
    pub timeout: Option<Duration>,
}

/// What the process left behind. `exit_code` is `None` when it was killed by a signal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
    pub duration_ms: Option<u64>,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// The external CLI call: `<program> <auto-approve> <prompt-flag> <command>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandLine {
    pub program: String,
    pub auto_approve_flag: String,
    pub prompt_flag: String,
    pub command: RenderedCommand,
}

impl CommandLine {
    pub fn args(&self) -> Vec<String> {
        vec![
            self.auto_approve_flag.clone(),
            self.prompt_flag.clone(),
            self.command.joined(),
        ]
    }

    /// Human-readable form used in reports, e.g. `gemini --yolo -p '/icon "gear" ...'`.
    pub fn echo(&self) -> String {
        format!(
            "{} {} {} '{}'",
            self.program,
            self.auto_approve_flag,
            self.prompt_flag,
            self.command.joined()
        )
    }
}
