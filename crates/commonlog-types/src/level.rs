//! Severity levels and the verbosity policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::errors::{LogError, Result};

/// Log level enumeration for the logging system.
///
/// Levels are ordered from least to most verbose. `None` is a sentinel for
/// "nothing passes" and is never the level of an actual message.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Level {
    /// No logging
    #[default]
    None = 0,
    /// Critical failures
    Critical = 1,
    /// Error messages
    Error = 2,
    /// Warnings
    Warning = 3,
    /// Significant but normal events
    Notice = 4,
    /// Informational messages
    Info = 5,
    /// Debug messages
    Debug = 6,
}

impl Level {
    /// Every level, in ascending verbosity.
    pub const ALL: [Level; 7] = [
        Level::None,
        Level::Critical,
        Level::Error,
        Level::Warning,
        Level::Notice,
        Level::Info,
        Level::Debug,
    ];

    /// Convert a user-facing verbosity count (e.g. `-v`, `-vv`) to a max level.
    ///
    /// Negative verbosity disables logging, `0` shows notices and above,
    /// `1` adds infos and anything higher adds debugs.
    ///
    /// ```
    /// use commonlog_types::Level;
    ///
    /// assert_eq!(Level::from_verbosity(-1), Level::None);
    /// assert_eq!(Level::from_verbosity(0), Level::Notice);
    /// assert_eq!(Level::from_verbosity(1), Level::Info);
    /// assert_eq!(Level::from_verbosity(7), Level::Debug);
    /// ```
    pub fn from_verbosity(verbosity: i32) -> Self {
        match verbosity {
            v if v < 0 => Level::None,
            0 => Level::Notice,
            1 => Level::Info,
            _ => Level::Debug,
        }
    }

    /// Whether a message may carry this level.
    pub fn is_loggable(self) -> bool {
        self != Level::None
    }

    /// The ordinal value of the level.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Short tag used in single-line text output.
    pub fn tag(self) -> &'static str {
        match self {
            Level::None => "",
            Level::Critical => "CRIT",
            Level::Error => "ERROR",
            Level::Warning => "WARN",
            Level::Notice => "NOTE",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = LogError;

    fn try_from(value: u8) -> Result<Self> {
        Level::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| LogError::Validation(format!("Unsupported level ordinal: {}", value)))
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Level::None),
            "critical" | "crit" => Ok(Level::Critical),
            "error" | "err" => Ok(Level::Error),
            "warning" | "warn" => Ok(Level::Warning),
            "notice" | "note" => Ok(Level::Notice),
            "info" => Ok(Level::Info),
            "debug" => Ok(Level::Debug),
            _ => Err(LogError::Validation(format!("Invalid log level: {}", s))),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::None => write!(f, "None"),
            Level::Critical => write!(f, "Critical"),
            Level::Error => write!(f, "Error"),
            Level::Warning => write!(f, "Warning"),
            Level::Notice => write!(f, "Notice"),
            Level::Info => write!(f, "Info"),
            Level::Debug => write!(f, "Debug"),
        }
    }
}
