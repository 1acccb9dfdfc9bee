//! Error types for redeploy-core

use thiserror::Error;

/// Errors that can occur while updating a stack
#[derive(Error, Debug)]
pub enum UpdateError {
    /// External tool could not be launched
    #[error("{tool} is not installed or not in PATH: {source}")]
    ToolNotFound {
        tool: String,
        source: std::io::Error,
    },

    /// External tool exited non-zero; `code` is forwarded verbatim as the
    /// process exit code
    #[error("`{command}` exited with status {code}")]
    CommandFailed { command: String, code: i32 },

    /// describe-stacks response could not be parsed
    #[error("describe-stacks returned malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl UpdateError {
    /// Exit code the process should terminate with for this error.
    ///
    /// A failed external invocation forwards the child's own exit code;
    /// everything else is a plain local failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            UpdateError::CommandFailed { code, .. } => *code,
            _ => 1,
        }
    }
}

/// Result type for stack update operations.
pub type Result<T> = std::result::Result<T, UpdateError>;
