//! Error types for the logger system

use std::time::Duration;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON configuration error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Numeric level outside `Trace..=Fatal`
    #[error("Log level {value} is out of range (0-5)")]
    LevelOutOfRange { value: u8 },

    /// File lock error
    #[error("Failed to acquire file lock on '{path}'")]
    FileLockError { path: String },

    /// Async worker did not drain within the allowed time
    #[error("Async worker did not finish draining within {timeout:?}")]
    ShutdownTimeout { timeout: Duration },

    /// Async worker thread panicked
    #[error("Async worker thread panicked")]
    WorkerPanicked,

    /// Async worker thread could not be started
    #[error("Failed to spawn async worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a file lock error
    pub fn file_lock(path: impl Into<String>) -> Self {
        LoggerError::FileLockError { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("LoggerConfig", "empty level name");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::file_lock("/var/log/app.log");
        assert!(matches!(err, LoggerError::FileLockError { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::LevelOutOfRange { value: 9 };
        assert_eq!(err.to_string(), "Log level 9 is out of range (0-5)");

        let err = LoggerError::config("LoggerConfig", "empty level name");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for LoggerConfig: empty level name"
        );

        let err = LoggerError::ShutdownTimeout {
            timeout: Duration::from_millis(250),
        };
        assert_eq!(
            err.to_string(),
            "Async worker did not finish draining within 250ms"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: LoggerError = io_err.into();

        assert!(matches!(err, LoggerError::IoError(_)));
        assert!(err.to_string().contains("pipe closed"));
    }
}
