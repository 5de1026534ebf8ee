//! Installation of the process-wide `tracing` subscriber.
//!
//! [`TracingBackend`](crate::TracingBackend) and the crate's own
//! diagnostics emit `tracing` events. These functions install the
//! subscriber that writes them out, honouring [`LogConfig`] for the
//! destination, format and default filter.

use crate::backend::tracing_adapter::level_filter;
use commonlog_types::{LogConfig, LogError, LogFormat, Result};
use std::io::{self, IsTerminal};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Initialize the subscriber with default configuration.
///
/// Writes to stderr, filtered by `RUST_LOG` or at info level.
pub fn init_default() -> Result<()> {
    init_from_config(&LogConfig::default())
}

/// Initialize the subscriber from `config`.
///
/// `RUST_LOG` takes precedence over the verbosity-derived filter. A log
/// path sends output to that file, appending.
///
/// # Errors
///
/// Returns a configuration error if a subscriber is already installed, or
/// an I/O error if the log directory cannot be created.
pub fn init_from_config(config: &LogConfig) -> Result<()> {
    let filter = env_filter(config);
    let writer = make_writer(config)?;
    let ansi = config.path.is_none() && io::stderr().is_terminal();

    let layer = match config.format {
        LogFormat::Full => tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(ansi)
            .with_file(config.trace)
            .with_line_number(config.trace)
            .boxed(),
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(ansi)
            .with_file(config.trace)
            .with_line_number(config.trace)
            .compact()
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| LogError::Config(format!("Failed to initialize logging: {}", e)))
}

/// The subscriber filter for `config`: `RUST_LOG` if set, else
/// [`default_filter`].
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(config))
}

/// A filter passing the most verbose level the configuration allows, so
/// per-name overrides are not cut off by the subscriber.
pub fn default_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::new(level_filter(config.max_level()).to_string())
}

fn make_writer(config: &LogConfig) -> Result<BoxMakeWriter> {
    let Some(path) = &config.path else {
        return Ok(BoxMakeWriter::new(io::stderr));
    };

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| LogError::Config(format!("Log path has no file name: {}", path.display())))?;

    std::fs::create_dir_all(&directory)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy().into_owned())
        .build(&directory)
        .map_err(|e| LogError::Config(format!("Failed to open log file {}: {}", path.display(), e)))?;
    Ok(BoxMakeWriter::new(appender))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tracing_subscriber::filter::LevelFilter;
    use tempfile::TempDir;

    #[test]
    fn test_default_filter_follows_verbosity() {
        let quiet = LogConfig {
            verbosity: -1,
            ..LogConfig::default()
        };
        assert_eq!(default_filter(&quiet).max_level_hint(), Some(LevelFilter::OFF));

        let chatty = LogConfig {
            verbosity: 2,
            ..LogConfig::default()
        };
        assert_eq!(default_filter(&chatty).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(
            default_filter(&LogConfig::default()).max_level_hint(),
            Some(LevelFilter::INFO)
        );

        let mut overridden = LogConfig::default();
        overridden.levels.insert("db".to_string(), commonlog_types::Level::Debug);
        assert_eq!(default_filter(&overridden).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_make_writer_creates_directory() {
        let dir = TempDir::new().unwrap();
        let config = LogConfig {
            path: Some(dir.path().join("nested").join("app.log")),
            ..LogConfig::default()
        };

        make_writer(&config).unwrap();
        assert!(dir.path().join("nested").is_dir());
        assert!(dir.path().join("nested").join("app.log").exists());
    }

    #[test]
    fn test_make_writer_rejects_path_without_file_name() {
        let config = LogConfig {
            path: Some(PathBuf::from("/")),
            ..LogConfig::default()
        };
        assert!(matches!(make_writer(&config), Err(LogError::Config(_))));
    }

    #[test]
    fn test_second_init_fails() {
        let _ = init_default();
        assert!(matches!(init_default(), Err(LogError::Config(_))));
    }
}
