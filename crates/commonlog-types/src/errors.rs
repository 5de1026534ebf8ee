//! Error types for commonlog operations.

use thiserror::Error;

/// The main error type for commonlog operations.
///
/// The level hierarchy itself never fails. These errors come from the edges:
/// parsing names and levels, loading configuration, and opening log files.
#[derive(Error, Debug)]
pub enum LogError {
    /// Configuration-related error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal bug - should never happen in production
    #[error("Bug detected: {0}\n\nThis is an internal error. Please report this issue at:\nhttps://github.com/tliron/commonlog-rs/issues")]
    Bug(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for commonlog operations.
pub type Result<T> = std::result::Result<T, LogError>;

/// Helper macro to create and return a LogError::Bug
///
/// This should be used for conditions that should never occur
/// in normal operation and indicate a bug in commonlog itself.
///
/// # Example
///
/// ```ignore
/// if some_impossible_condition {
///     bug!("This should never happen: {:?}", condition);
/// }
/// ```
#[macro_export]
macro_rules! bug {
    ($msg:expr) => {
        return Err($crate::LogError::Bug($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::LogError::Bug(format!($fmt, $($arg)*)))
    };
}

/// Helper macro to bail out with a LogError
///
/// This is used for expected error conditions.
///
/// # Example
///
/// ```
/// use commonlog_types::{bail, Result};
///
/// fn check(segment: &str) -> Result<()> {
///     if segment.is_empty() {
///         bail!(Validation, "empty segment");
///     }
///     Ok(())
/// }
///
/// assert!(check("").is_err());
/// assert!(check("http").is_ok());
/// ```
#[macro_export]
macro_rules! bail {
    ($variant:ident, $msg:expr) => {
        return Err($crate::LogError::$variant($msg.to_string()))
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::LogError::$variant(format!($fmt, $($arg)*)))
    };
    ($msg:expr) => {
        return Err($crate::LogError::Other($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::LogError::Other(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failing_validation(name: &str) -> Result<()> {
        bail!(Validation, "Invalid logger name '{}'", name);
    }

    fn failing_bug() -> Result<()> {
        bug!("unreachable state");
    }

    #[test]
    fn test_bail_formats_variant() {
        let err = failing_validation("a..b").unwrap_err();
        assert!(matches!(err, LogError::Validation(_)));
        assert_eq!(err.to_string(), "Validation error: Invalid logger name 'a..b'");
    }

    #[test]
    fn test_bug_mentions_issue_tracker() {
        let err = failing_bug().unwrap_err();
        assert!(err.to_string().contains("unreachable state"));
        assert!(err.to_string().contains("issues"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: LogError = io.into();
        assert!(err.to_string().starts_with("IO error"));
    }
}
