//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Level name outside the closed set of severity levels
    #[error("Invalid log level: '{value}'")]
    InvalidLevel { value: String },

    /// A sink refused to build a handle for the requested configuration
    #[error("Sink '{sink}' could not be configured: {message}")]
    SinkConfiguration { sink: String, message: String },

    /// A sink handle failed to emit a record
    #[error("Sink '{sink}' failed to emit record: {message}")]
    SinkEmit { sink: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LoggerError {
    /// Create an invalid level error
    pub fn invalid_level(value: impl Into<String>) -> Self {
        LoggerError::InvalidLevel {
            value: value.into(),
        }
    }

    /// Create a sink configuration error
    pub fn sink_configuration(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkConfiguration {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create a sink emit error
    pub fn sink_emit(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkEmit {
            sink: sink.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::invalid_level("bogus-level");
        assert!(matches!(err, LoggerError::InvalidLevel { .. }));

        let err = LoggerError::sink_configuration("memory", "closed");
        assert!(matches!(err, LoggerError::SinkConfiguration { .. }));

        let err = LoggerError::sink_emit("console", "broken pipe");
        assert!(matches!(err, LoggerError::SinkEmit { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::invalid_level("bogus-level");
        assert_eq!(err.to_string(), "Invalid log level: 'bogus-level'");

        let err = LoggerError::sink_emit("console", "broken pipe");
        assert_eq!(
            err.to_string(),
            "Sink 'console' failed to emit record: broken pipe"
        );

        let err = LoggerError::sink_configuration("memory", "closed");
        assert_eq!(
            err.to_string(),
            "Sink 'memory' could not be configured: closed"
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
