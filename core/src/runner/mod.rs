mod invoke;
mod traits;
pub mod types;

pub use invoke::Invoker;
pub use traits::{CommandExecutor, EnvProvider};
pub use types::{CommandLine, ExecutionResult, Invocation};
