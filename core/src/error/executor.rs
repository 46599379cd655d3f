use std::time::Duration;

use thiserror::Error;

/// Failures of the external process. Captured output travels with the error
/// so callers can still show whatever the tool printed before failing.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("executable `{program}` not found: {detail}")]
    NotFound { program: String, detail: String },

    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` {}", describe_exit(.code))]
    NonZeroExit {
        program: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("`{program}` timed out after {}", describe_duration(.after))]
    Timeout {
        program: String,
        after: Duration,
        stdout: String,
        stderr: String,
    },

    #[error("io error while waiting for `{program}`: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl ExecutionError {
    /// Standard output captured before the failure, if any was collected.
    pub fn partial_stdout(&self) -> Option<&str> {
        match self {
            Self::NonZeroExit { stdout, .. } | Self::Timeout { stdout, .. } => {
                Some(stdout.as_str()).filter(|s| !s.is_empty())
            }
            _ => None,
        }
    }

    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::NonZeroExit { stderr, .. } | Self::Timeout { stderr, .. } => {
                Some(stderr.as_str()).filter(|s| !s.is_empty())
            }
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

fn describe_duration(after: &Duration) -> String {
    if after.subsec_millis() == 0 {
        format!("{}s", after.as_secs())
    } else {
        format!("{}ms", after.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_zero_exit_keeps_partial_output() {
        let err = ExecutionError::NonZeroExit {
            program: "gemini".into(),
            code: Some(2),
            stdout: "generating 1/3...".into(),
            stderr: "quota exceeded".into(),
        };
        assert_eq!(err.to_string(), "`gemini` exited with status 2");
        assert_eq!(err.partial_stdout(), Some("generating 1/3..."));
        assert_eq!(err.stderr(), Some("quota exceeded"));
    }

    #[test]
    fn timeout_message_uses_seconds_when_whole() {
        let err = ExecutionError::Timeout {
            program: "gemini".into(),
            after: Duration::from_secs(30),
            stdout: String::new(),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "`gemini` timed out after 30s");
        assert!(err.is_timeout());
        assert_eq!(err.partial_stdout(), None);
    }

    #[test]
    fn signal_termination_is_described() {
        let err = ExecutionError::NonZeroExit {
            program: "gemini".into(),
            code: None,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "`gemini` was terminated by a signal");
    }
}
