//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `nanogen_core::api` instead of reaching into internal modules.

pub use crate::config::{load_default, AppConfig, GeminiConfig, LoggingConfig};
pub use crate::engine::TaskRunner;
pub use crate::error::{CliError, ExecutionError, RenderError, TaskError, ValidationError};
pub use crate::render::{render, RenderedCommand};
pub use crate::report::{format_report, Report};
pub use crate::runner::{
    CommandExecutor, CommandLine, EnvProvider, ExecutionResult, Invocation, Invoker,
};
pub use crate::task::{TaskKind, TaskParams, TaskRequest};
