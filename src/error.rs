use std::io;

use thiserror::Error;

/// Application-wide error type for the vulnsweep CLI.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("'{0}' is not installed or not on PATH")]
    MissingBinary(String),

    #[error("cannot extract an image reference from '{0}'")]
    MalformedLine(String),

    #[error("empty image reference in '{0}'")]
    EmptyReference(String),

    #[error("'{command}' exited with {status}{stderr}")]
    CommandFailed { command: String, status: String, stderr: String },

    #[error("'{command}' timed out after {seconds}s")]
    Timeout { command: String, seconds: u64 },

    #[error("Failed to parse scan report: {0}")]
    ReportParse(#[from] serde_json::Error),
}

impl AppError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        AppError::Config(msg.into())
    }

    /// Build a `CommandFailed` error, appending trimmed stderr when the command produced any.
    pub fn command_failed(command: &str, status: impl ToString, stderr: &[u8]) -> Self {
        let stderr = String::from_utf8_lossy(stderr);
        let stderr = stderr.trim();
        let stderr = if stderr.is_empty() { String::new() } else { format!(": {stderr}") };
        AppError::CommandFailed { command: command.to_string(), status: status.to_string(), stderr }
    }
}
