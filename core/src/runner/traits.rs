use std::collections::HashMap;

use async_trait::async_trait;

use super::types::{ExecutionResult, Invocation};
use crate::error::ExecutionError;

/// Runs one process to completion.
///
/// A non-zero exit is still `Ok`; deciding what counts as failure is the
/// caller's job. `Err` is reserved for "could not run it at all" and timeouts.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    fn name(&self) -> &str;
    async fn execute(&self, invocation: &Invocation) -> Result<ExecutionResult, ExecutionError>;
}

/// Source of environment variables layered over the inherited environment.
pub trait EnvProvider: Send + Sync {
    fn envs(&self) -> HashMap<String, String>;
}
