use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub gemini: GeminiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or `~/.nanogen/logs` if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "nanogen_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

/// How the external creative CLI is invoked and where it writes artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default = "default_bin")]
    pub bin: String,

    /// Skips the CLI's interactive tool-approval prompts.
    #[serde(default = "default_auto_approve_flag")]
    pub auto_approve_flag: String,

    /// Introduces the command string as a single argument.
    #[serde(default = "default_prompt_flag")]
    pub prompt_flag: String,

    /// Relative directory the extension writes to. Only quoted in reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Extra variables for the child process.
    #[serde(default)]
    pub env: HashMap<String, String>,

    /// `KEY=VALUE` file merged under `env`.
    #[serde(default)]
    pub env_file: Option<String>,
}

fn default_bin() -> String {
    "gemini".to_string()
}

fn default_auto_approve_flag() -> String {
    "--yolo".to_string()
}

fn default_prompt_flag() -> String {
    "-p".to_string()
}

fn default_output_dir() -> String {
    "nanobanana-output".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            bin: default_bin(),
            auto_approve_flag: default_auto_approve_flag(),
            prompt_flag: default_prompt_flag(),
            output_dir: default_output_dir(),
            timeout_secs: None,
            env: HashMap::new(),
            env_file: None,
        }
    }
}

impl GeminiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
