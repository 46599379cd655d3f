#[allow(clippy::module_inception)]
pub mod error;
pub mod executor;

pub use error::{CliError, RenderError, TaskError, ValidationError};
pub use executor::ExecutionError;
