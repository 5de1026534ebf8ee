//! Layered configuration for commonlog.
//!
//! Configuration values are resolved in this priority order:
//! 1. Environment variables
//! 2. Programmatically set values
//! 3. Values loaded from file
//! 4. Default values
//!
//! The log settings live under the `log` key of the document:
//!
//! ```yaml
//! log:
//!   verbosity: 1
//!   path: ~/.local/state/app.log
//!   trace: false
//!   format: compact
//!   levels:
//!     "": notice
//!     server.http: debug
//! ```
//!
//! ## Example
//!
//! ```
//! use commonlog_core::config::Config;
//! use commonlog_types::Level;
//!
//! let mut config = Config::new();
//! config.set("log.verbosity", 2).unwrap();
//! config.set("log.levels.db", "error").unwrap();
//!
//! let log = config.log_config().unwrap();
//! assert_eq!(log.verbosity, 2);
//! assert_eq!(log.levels.get("db"), Some(&Level::Error));
//! ```

use crate::util::data::{deep_merge, get_path, load_yaml_file, set_path};
use crate::util::fs::expand_path;
use commonlog_types::config::parse_level_directives;
use commonlog_types::{bail, LogConfig, LogError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable holding the verbosity count.
pub const ENV_VERBOSITY: &str = "COMMONLOG_VERBOSITY";
/// Environment variable holding the log file path.
pub const ENV_PATH: &str = "COMMONLOG_PATH";
/// Environment variable enabling call-site tracing.
pub const ENV_TRACE: &str = "COMMONLOG_TRACE";
/// Environment variable holding level directives, e.g. `db=error,http=debug`.
pub const ENV_LEVELS: &str = "COMMONLOG_LEVELS";

/// Configuration layer priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigLayer {
    /// Default values
    Default = 0,
    /// Values loaded from file
    Loaded = 1,
    /// Values set programmatically
    Set = 2,
    /// Values from environment variables
    Environment = 3,
}

impl ConfigLayer {
    /// All layers, lowest priority first.
    pub const ASCENDING: [ConfigLayer; 4] = [
        ConfigLayer::Default,
        ConfigLayer::Loaded,
        ConfigLayer::Set,
        ConfigLayer::Environment,
    ];
}

/// Layered configuration document.
#[derive(Clone, Debug, Default)]
pub struct Config {
    layers: HashMap<ConfigLayer, Value>,
    file_path: Option<PathBuf>,
    auto_save: bool,
}

impl Config {
    /// An empty configuration with no backing file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a YAML or JSON file.
    ///
    /// If the file doesn't exist, an empty configuration is created that
    /// will save to `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = expand_path(path);
        let mut layers = HashMap::new();

        if path.exists() {
            let value = load_yaml_file(&path).map_err(|e| {
                LogError::Config(format!("Failed to load config file {}: {}", path.display(), e))
            })?;

            // An empty file parses as null
            if !value.is_null() {
                layers.insert(ConfigLayer::Loaded, value);
            }
            debug!(path = %path.display(), "Loaded configuration file");
        }

        Ok(Self {
            layers,
            file_path: Some(path),
            auto_save: false,
        })
    }

    /// Get a configuration value by dotted key, respecting layer priority.
    ///
    /// Returns `None` if the key is missing from every layer or cannot be
    /// converted to `T`.
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        ConfigLayer::ASCENDING.iter().rev().find_map(|layer| {
            let value = get_path(self.layers.get(layer)?, key)?;
            serde_json::from_value(value.clone()).ok()
        })
    }

    /// Set a configuration value programmatically.
    pub fn set(&mut self, key: &str, value: impl Serialize) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.set_in(ConfigLayer::Set, key, value)?;

        if self.auto_save {
            self.save()?;
        }
        Ok(())
    }

    /// Set a value in a specific layer.
    pub fn set_in(&mut self, layer: ConfigLayer, key: &str, value: Value) -> Result<()> {
        let data = self.layers.entry(layer).or_insert_with(|| json!({}));
        set_path(data, key, value)
    }

    /// Replace the environment layer from `COMMONLOG_*` variables.
    pub fn with_environment(self) -> Result<Self> {
        self.with_environment_from(std::env::vars())
    }

    /// Replace the environment layer from the given variables.
    ///
    /// Unrelated variables are ignored.
    pub fn with_environment_from<I, K, V>(mut self, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.layers.remove(&ConfigLayer::Environment);

        for (key, value) in vars {
            let value = value.as_ref();
            match key.as_ref() {
                ENV_VERBOSITY => {
                    let verbosity: i32 = value.trim().parse().map_err(|_| {
                        LogError::Config(format!("{} must be an integer, got '{}'", ENV_VERBOSITY, value))
                    })?;
                    self.set_in(ConfigLayer::Environment, "log.verbosity", json!(verbosity))?;
                }
                ENV_PATH => {
                    self.set_in(ConfigLayer::Environment, "log.path", json!(value))?;
                }
                ENV_TRACE => {
                    let trace = parse_flag(value).ok_or_else(|| {
                        LogError::Config(format!("{} must be a boolean, got '{}'", ENV_TRACE, value))
                    })?;
                    self.set_in(ConfigLayer::Environment, "log.trace", json!(trace))?;
                }
                ENV_LEVELS => {
                    // Level names are dotted, so the whole map is set at once
                    let levels = parse_level_directives(value)?
                        .into_iter()
                        .map(|(name, level)| Ok((name, serde_json::to_value(level)?)))
                        .collect::<Result<serde_json::Map<String, Value>>>()?;
                    self.set_in(ConfigLayer::Environment, "log.levels", Value::Object(levels))?;
                }
                _ => {}
            }
        }

        Ok(self)
    }

    /// Enable auto-save on changes.
    pub fn with_auto_save(mut self, auto_save: bool) -> Self {
        self.auto_save = auto_save;
        self
    }

    /// The file this configuration loads from and saves to.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// All layers merged, higher priority layers winning.
    pub fn merged(&self) -> Value {
        ConfigLayer::ASCENDING
            .iter()
            .filter_map(|layer| self.layers.get(layer))
            .fold(json!({}), |merged, layer| deep_merge(merged, layer.clone()))
    }

    /// Save the merged configuration to the backing file as YAML.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.file_path else {
            bail!(Config, "Cannot save: no file path set");
        };

        let yaml = serde_yaml::to_string(&self.merged())?;
        fs::write(path, yaml).map_err(|e| {
            LogError::Config(format!("Failed to write config file {}: {}", path.display(), e))
        })?;

        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// The `log` section as a [`LogConfig`].
    ///
    /// A leading `~` in the log path is expanded and level names are
    /// validated.
    pub fn log_config(&self) -> Result<LogConfig> {
        let section = self.merged().get("log").cloned().unwrap_or_else(|| json!({}));
        let mut config: LogConfig = serde_json::from_value(section)
            .map_err(|e| LogError::Config(format!("Invalid log configuration: {}", e)))?;

        config.path = config.path.map(expand_path);
        config.overrides()?;
        Ok(config)
    }
}

/// Load the log configuration from an optional file plus the environment.
///
/// An explicitly named file must exist.
pub fn load_log_config(path: Option<&Path>) -> Result<LogConfig> {
    let config = match path {
        Some(path) => {
            let expanded = expand_path(path);
            if !expanded.exists() {
                bail!(Config, "Config file not found: {}", expanded.display());
            }
            Config::load(expanded)?
        }
        None => Config::new(),
    };

    config.with_environment()?.log_config()
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
