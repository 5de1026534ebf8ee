//! Dotted hierarchical logger names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::errors::{LogError, Result};

/// A validated logger name such as `server.http`.
///
/// A name is an ordered sequence of non-empty segments. The empty name
/// (zero segments) is the root logger.
///
/// # Example
///
/// ```
/// use commonlog_types::LoggerName;
///
/// let name = LoggerName::parse("server.http").unwrap();
/// assert_eq!(name.segments(), ["server", "http"]);
/// assert_eq!(name.to_string(), "server.http");
///
/// // The empty string is the root
/// assert!(LoggerName::parse("").unwrap().is_root());
///
/// // Empty segments are rejected
/// assert!(LoggerName::parse("server..http").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LoggerName(Vec<String>);

impl LoggerName {
    /// The root name.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Parse a dotted name.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any segment is empty.
    pub fn parse(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Ok(Self::root());
        }
        Self::from_segments(name.split('.'))
    }

    /// Build a name from already-split segments.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any segment is empty or contains a dot.
    pub fn from_segments<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        for segment in &segments {
            Self::validate_segment(segment)?;
        }
        Ok(Self(segments))
    }

    fn validate_segment(segment: &str) -> Result<()> {
        if segment.is_empty() {
            return Err(LogError::Validation(
                "Invalid logger name: segments must not be empty".to_string(),
            ));
        }
        if segment.contains('.') {
            return Err(LogError::Validation(format!(
                "Invalid logger name segment '{}': must not contain '.'",
                segment
            )));
        }
        Ok(())
    }

    /// Get the segments.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Whether this is the root name.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Append a segment, returning the child name.
    pub fn child(&self, segment: impl Into<String>) -> Result<Self> {
        let segment = segment.into();
        Self::validate_segment(&segment)?;
        let mut segments = self.0.clone();
        segments.push(segment);
        Ok(Self(segments))
    }

    /// The parent name, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }
}

impl fmt::Display for LoggerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for LoggerName {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LoggerName {
    type Error = LogError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<LoggerName> for String {
    fn from(name: LoggerName) -> Self {
        name.to_string()
    }
}

impl AsRef<[String]> for LoggerName {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}
