//! Configuration types and structures.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use crate::errors::{LogError, Result};
use crate::level::Level;
use crate::name::LoggerName;
use crate::traits::Backend;

/// Log configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Verbosity count (negative disables logging)
    #[serde(default)]
    pub verbosity: i32,
    /// Log file path; stderr when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Whether to include call-site locations
    #[serde(default)]
    pub trace: bool,
    /// Log format for the tracing subscriber
    #[serde(default)]
    pub format: LogFormat,
    /// Per-name maximum levels (dotted name, `""` for the root)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub levels: BTreeMap<String, Level>,
}

impl LogConfig {
    /// Parsed level overrides, in name order.
    ///
    /// # Errors
    ///
    /// Returns a validation error for any malformed name.
    pub fn overrides(&self) -> Result<Vec<(LoggerName, Level)>> {
        self.levels
            .iter()
            .map(|(name, level)| Ok((LoggerName::parse(name)?, *level)))
            .collect()
    }

    /// The most verbose level any name may log at under this configuration.
    pub fn max_level(&self) -> Level {
        self.levels
            .values()
            .copied()
            .fold(Level::from_verbosity(self.verbosity), Level::max)
    }

    /// Configure `backend` output and root level, then apply the overrides.
    ///
    /// Overrides are applied in name order, so a parent is always set
    /// before its children.
    ///
    /// # Errors
    ///
    /// Returns an error if an override name is malformed or the backend
    /// cannot open its output.
    pub fn apply(&self, backend: &dyn Backend) -> Result<()> {
        let overrides = self.overrides()?;
        backend.configure(self.verbosity, self.path.clone())?;
        for (name, level) in overrides {
            backend.set_max_level(name.segments(), level);
        }
        Ok(())
    }

    /// Apply only the root level and the overrides, leaving output alone.
    ///
    /// # Errors
    ///
    /// Returns a validation error if an override name is malformed.
    pub fn apply_levels(&self, backend: &dyn Backend) -> Result<()> {
        let overrides = self.overrides()?;
        backend.set_max_level(&[], Level::from_verbosity(self.verbosity));
        for (name, level) in overrides {
            backend.set_max_level(name.segments(), level);
        }
        Ok(())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-field human-readable format
    #[default]
    Full,
    /// Compact single-line format
    Compact,
}

/// Parse level directives such as `server.http=debug,db=none`.
///
/// A directive without `=` sets the root level.
///
/// # Example
///
/// ```
/// use commonlog_types::Level;
/// use commonlog_types::config::parse_level_directives;
///
/// let levels = parse_level_directives("info,server.http=debug").unwrap();
/// assert_eq!(levels.get(""), Some(&Level::Info));
/// assert_eq!(levels.get("server.http"), Some(&Level::Debug));
/// ```
pub fn parse_level_directives(input: &str) -> Result<BTreeMap<String, Level>> {
    let mut levels = BTreeMap::new();

    for directive in input.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        let (name, level) = match directive.split_once('=') {
            Some((name, level)) => (name.trim(), level),
            None => ("", directive),
        };

        // Validate now so a bad name is reported with its directive
        LoggerName::parse(name).map_err(|e| {
            LogError::Config(format!("Invalid level directive '{}': {}", directive, e))
        })?;
        let level: Level = level.parse().map_err(|e| {
            LogError::Config(format!("Invalid level directive '{}': {}", directive, e))
        })?;

        levels.insert(name.to_string(), level);
    }

    Ok(levels)
}
