//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A backend failed to write an already accepted message
    #[error("{backend} backend failed to write: {source}")]
    WriteFailed {
        backend: String,
        #[source]
        source: std::io::Error,
    },

    /// No syslog endpoint could be reached
    #[error("Syslog unavailable: {message}")]
    SyslogUnavailable { message: String },

    /// The backend's sink was already released
    #[error("{backend} backend is closed")]
    Closed { backend: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a write failure error for the named backend
    pub fn write_failed(backend: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::WriteFailed {
            backend: backend.into(),
            source,
        }
    }

    pub fn syslog_unavailable(message: impl Into<String>) -> Self {
        LoggerError::SyslogUnavailable {
            message: message.into(),
        }
    }

    pub fn closed(backend: impl Into<String>) -> Self {
        LoggerError::Closed {
            backend: backend.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
