//! Error types for the vidpress-core library.

use std::process::ExitStatus;
use thiserror::Error;

/// Custom error types for vidpress
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid path: {0}")]
    PathError(String),

    #[error("Failed to parse ffprobe output: {0}")]
    FfprobeParse(String),

    #[error("Required external command '{0}' not found in PATH")]
    DependencyNotFound(String),

    #[error("Failed to start command '{cmd}': {message}")]
    CommandStart { cmd: String, message: String },

    #[error("Command '{cmd}' failed ({status}): {stderr}")]
    CommandFailed {
        cmd: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Failed while waiting for command '{cmd}': {message}")]
    CommandWait { cmd: String, message: String },

    #[error("No processable video files found")]
    NoFilesFound,
}

/// Result type for vidpress-core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds a `CoreError::CommandStart` from a command name and the spawn error.
pub fn command_start_error(cmd: impl Into<String>, source: impl std::fmt::Display) -> CoreError {
    CoreError::CommandStart {
        cmd: cmd.into(),
        message: source.to_string(),
    }
}

/// Builds a `CoreError::CommandFailed` from a command name, exit status, and stderr text.
pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        cmd: cmd.into(),
        status,
        stderr: stderr.into(),
    }
}

/// Builds a `CoreError::CommandWait` from a command name and the wait error.
pub fn command_wait_error(cmd: impl Into<String>, source: impl std::fmt::Display) -> CoreError {
    CoreError::CommandWait {
        cmd: cmd.into(),
        message: source.to_string(),
    }
}
