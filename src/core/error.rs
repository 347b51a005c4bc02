//! Error types for the logging facility

use std::path::Path;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A log destination cannot be used. Surfaced to whoever configured it.
    #[error("Invalid log file '{path}': {message}")]
    Log {
        path: String,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Integer threshold outside the known severities
    #[error("Invalid severity level: {0}")]
    InvalidSeverity(i64),

    /// Settings value that cannot be coerced to the expected type
    #[error("Invalid setting '{key}': {message}")]
    InvalidSetting { key: String, message: String },

    /// Write attempted after the backend was shut down
    #[error("Logger backend '{kind}' already shut down")]
    BackendClosed { kind: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error while reading settings
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create a log destination error without an underlying IO cause
    pub fn log(path: &Path, message: impl Into<String>) -> Self {
        LoggerError::Log {
            path: path.display().to_string(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a log destination error from a failed open
    pub fn log_io(path: &Path, source: std::io::Error) -> Self {
        LoggerError::Log {
            path: path.display().to_string(),
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Create an invalid setting error
    pub fn setting(key: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidSetting {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn closed(kind: impl Into<String>) -> Self {
        LoggerError::BackendClosed { kind: kind.into() }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// Whether this is a configuration error on a log destination
    pub fn is_log_error(&self) -> bool {
        matches!(self, LoggerError::Log { .. })
    }
}
