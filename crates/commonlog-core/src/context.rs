//! Explicit handle on the active backend.
//!
//! A [`LogContext`] owns the backend that loggers forward to. It is created
//! once at startup and cloned (cheaply) into whatever needs loggers; there
//! is no process-wide backend.

use crate::backend::{BackendKind, SimpleBackend};
use crate::logger::{BackendLogger, Logger};
use commonlog_types::{Backend, Level, LogConfig, LoggerName, Result};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Verbosity used by [`LogContext::initialize`] in quiet mode.
pub const QUIET_VERBOSITY: i32 = -4;

/// Shared access to a backend and the loggers bound to it.
///
/// # Example
///
/// ```
/// use commonlog_core::{LogContext, Logger, SimpleBackend};
/// use commonlog_types::Level;
/// use std::sync::Arc;
///
/// let context = LogContext::new(Arc::new(SimpleBackend::with_writer(std::io::sink())));
/// context.configure(0, None).unwrap();
///
/// let logger = context.logger("server.http").unwrap();
/// logger.notice("listening");
/// assert_eq!(logger.get_max_level(), Level::Notice);
/// ```
#[derive(Clone)]
pub struct LogContext {
    backend: Arc<dyn Backend>,
}

impl LogContext {
    /// Create a context around `backend`.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Create a backend of `kind` and apply `config` to it.
    ///
    /// # Errors
    ///
    /// Returns an error if an override name is malformed or the log file
    /// cannot be opened.
    pub fn from_config(kind: BackendKind, config: &LogConfig) -> Result<Self> {
        let backend: Arc<dyn Backend> = match kind {
            BackendKind::Simple => Arc::new(SimpleBackend::new().with_trace(config.trace)),
            BackendKind::Tracing => kind.create(),
        };
        let context = Self::new(backend);
        context.apply_config(config)?;
        Ok(context)
    }

    /// The backend loggers forward to.
    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    /// A logger for a dotted name. The empty string is the root logger.
    ///
    /// # Errors
    ///
    /// Returns a validation error for names with empty segments.
    pub fn logger(&self, name: &str) -> Result<BackendLogger> {
        Ok(self.logger_for(LoggerName::parse(name)?))
    }

    /// A logger for an already parsed name.
    pub fn logger_for(&self, name: LoggerName) -> BackendLogger {
        BackendLogger::new(name, Arc::clone(&self.backend))
    }

    /// Configure the backend's output and root level.
    pub fn configure(&self, verbosity: i32, path: Option<PathBuf>) -> Result<()> {
        self.backend.configure(verbosity, path)
    }

    /// Configure for a command line program.
    ///
    /// With `quiet` and no log file, logging is switched off entirely. A log
    /// file is always honoured.
    pub fn initialize(&self, verbosity: i32, path: Option<PathBuf>, quiet: bool) -> Result<()> {
        let verbosity = if quiet && path.is_none() {
            QUIET_VERBOSITY
        } else {
            verbosity
        };
        self.configure(verbosity, path)
    }

    /// Configure output from `config` and apply its level overrides.
    pub fn apply_config(&self, config: &LogConfig) -> Result<()> {
        config.apply(self.backend.as_ref())?;
        debug!(
            verbosity = config.verbosity,
            overrides = config.levels.len(),
            "Applied log configuration"
        );
        Ok(())
    }

    /// Whether `level` is allowed for `name`.
    pub fn allow_level(&self, name: &LoggerName, level: Level) -> bool {
        self.backend.allow_level(name.segments(), level)
    }

    /// Set the max level for `name` and its descendants.
    pub fn set_max_level(&self, name: &LoggerName, level: Level) {
        self.backend.set_max_level(name.segments(), level);
    }

    /// The effective max level for `name`.
    pub fn get_max_level(&self, name: &LoggerName) -> Level {
        self.backend.get_max_level(name.segments())
    }
}

impl Default for LogContext {
    fn default() -> Self {
        Self::new(Arc::new(SimpleBackend::new()))
    }
}

impl fmt::Debug for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogContext").finish_non_exhaustive()
    }
}

/// Run `f` and log its error, if any, as `"{task}: {error}"` at error level.
pub fn call_and_log_error<F, E>(f: F, task: &str, logger: &dyn Logger)
where
    F: FnOnce() -> std::result::Result<(), E>,
    E: fmt::Display,
{
    if let Err(e) = f() {
        logger.error_fmt(format_args!("{}: {}", task, e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commonlog_types::LogError;
    use parking_lot::Mutex;
    use std::io::{self, Write};
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn name(dotted: &str) -> LoggerName {
        LoggerName::parse(dotted).unwrap()
    }

    #[test]
    fn test_loggers_share_the_backend() {
        let context = LogContext::new(Arc::new(SimpleBackend::with_writer(io::sink())));
        context.configure(0, None).unwrap();

        let http = context.logger("server.http").unwrap();
        http.set_max_level(Level::Debug);

        let child = context.logger("server.http.v2").unwrap();
        assert!(child.allow_level(Level::Debug));
        assert!(!context.allow_level(&name("server.db"), Level::Debug));
        assert_eq!(context.get_max_level(&name("server.db")), Level::Notice);
    }

    #[test]
    fn test_logger_rejects_bad_names() {
        let context = LogContext::default();
        assert!(matches!(context.logger("a..b"), Err(LogError::Validation(_))));
        assert!(context.logger("").unwrap().name().is_root());
    }

    #[test]
    fn test_initialize_quiet() {
        let context = LogContext::new(Arc::new(SimpleBackend::with_writer(io::sink())));

        context.initialize(2, None, true).unwrap();
        assert_eq!(context.get_max_level(&LoggerName::root()), Level::None);

        context.initialize(2, None, false).unwrap();
        assert_eq!(context.get_max_level(&LoggerName::root()), Level::Debug);

        let dir = TempDir::new().unwrap();
        context.initialize(1, Some(dir.path().join("app.log")), true).unwrap();
        assert_eq!(context.get_max_level(&LoggerName::root()), Level::Info);
    }

    #[test]
    fn test_apply_config_overrides_root() {
        let context = LogContext::new(Arc::new(SimpleBackend::with_writer(io::sink())));
        let mut config = LogConfig::default();
        config.levels.insert(String::new(), Level::Warning);
        config.levels.insert("server.http".to_string(), Level::Debug);

        context.apply_config(&config).unwrap();

        assert_eq!(context.get_max_level(&LoggerName::root()), Level::Warning);
        assert_eq!(context.get_max_level(&name("server.http.v2")), Level::Debug);
        assert_eq!(context.get_max_level(&name("server.db")), Level::Warning);
    }

    #[test]
    fn test_apply_levels_leaves_output_alone() {
        let buffer = SharedBuffer::default();
        let context = LogContext::new(Arc::new(SimpleBackend::with_writer(buffer.clone())));
        let mut config = LogConfig {
            verbosity: 1,
            path: Some(PathBuf::from("/nonexistent/dir/app.log")),
            ..LogConfig::default()
        };
        config.levels.insert("db".to_string(), Level::Error);

        config.apply_levels(context.backend().as_ref()).unwrap();
        assert_eq!(context.get_max_level(&name("web")), Level::Info);
        assert_eq!(context.get_max_level(&name("db")), Level::Error);

        context.logger("web").unwrap().info("written");
        assert!(!buffer.0.lock().is_empty());
    }

    #[test]
    fn test_from_config_with_trace() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.log");
        let config = LogConfig {
            verbosity: 2,
            path: Some(path.clone()),
            trace: true,
            ..LogConfig::default()
        };

        let context = LogContext::from_config(BackendKind::Simple, &config).unwrap();
        let logger = context.logger("app").unwrap();
        crate::log_debug!(logger, "traced {}", 1);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("DEBUG [app] traced 1"));
        assert!(contents.contains("└─"));
        assert!(contents.contains("context.rs:"));
    }

    #[test]
    fn test_call_and_log_error() {
        let buffer = SharedBuffer::default();
        let context = LogContext::new(Arc::new(SimpleBackend::with_writer(buffer.clone())));
        context.set_max_level(&LoggerName::root(), Level::Notice);
        let logger = context.logger("task").unwrap();

        call_and_log_error(|| Ok::<(), String>(()), "cleanup", &logger);
        assert!(buffer.0.lock().is_empty());

        call_and_log_error(|| Err("disk full"), "cleanup", &logger);
        let output = String::from_utf8(buffer.0.lock().clone()).unwrap();
        assert!(output.trim_end().ends_with("ERROR [task] cleanup: disk full"));
    }
}
