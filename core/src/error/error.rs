use thiserror::Error;

use super::executor::ExecutionError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error("config error: {0}")]
    Config(String),
    #[error("invalid input: {0}")]
    Input(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Everything that can go wrong while turning one request into a report.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),
    #[error("cannot render command: {0}")]
    Render(#[from] RenderError),
    #[error("execution failed: {0}")]
    Execution(#[from] ExecutionError),
}

/// A request field violated its declared bound or allowed set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{field}` {constraint}")]
pub struct ValidationError {
    pub field: &'static str,
    pub constraint: String,
}

impl ValidationError {
    pub fn new(field: &'static str, constraint: impl Into<String>) -> Self {
        Self {
            field,
            constraint: constraint.into(),
        }
    }

    pub fn empty(field: &'static str) -> Self {
        Self::new(field, "must not be empty")
    }

    pub fn out_of_range(field: &'static str, value: i64, min: u8, max: u8) -> Self {
        Self::new(
            field,
            format!("must be between {min} and {max} (inclusive), got {value}"),
        )
    }

    pub fn not_one_of(field: &'static str, value: &str, allowed: &[&str]) -> Self {
        Self::new(
            field,
            format!("must be one of [{}], got {:?}", allowed.join(", "), value),
        )
    }
}

/// Free text that cannot be embedded in the command string.
///
/// The external CLI has no escape syntax inside `"..."`, so offending input
/// is rejected instead of rewritten.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("`{field}` contains a double quote, which cannot be embedded in a quoted argument")]
    EmbeddedQuote { field: &'static str },
    #[error("`{field}` contains a control character")]
    ControlCharacter { field: &'static str },
    #[error("`{field}` contains whitespace or quotes, which would split the path token")]
    UnsafePath { field: &'static str },
}

impl RenderError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmbeddedQuote { field }
            | Self::ControlCharacter { field }
            | Self::UnsafePath { field } => field,
        }
    }
}
