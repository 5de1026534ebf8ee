//! Logger facade.
//!
//! A [`Logger`] is a handle bound to one name. Every convenience method
//! funnels through [`Logger::new_message`], which returns `None` when the
//! level is not allowed, so message text is only built for messages that
//! will actually be emitted.

use commonlog_types::{keys, Backend, Fields, Level, LoggerName, Message, Value};
use std::fmt::{self, Arguments};
use std::panic::Location;
use std::sync::Arc;

/// Logging interface for application components.
///
/// Implementations must be `Send + Sync` so a logger can be shared across
/// threads behind an `Arc<dyn Logger>`.
pub trait Logger: Send + Sync {
    /// Whether `level` is loggable for this logger.
    fn allow_level(&self, level: Level) -> bool;

    /// Set the maximum loggable level for this logger's name.
    fn set_max_level(&self, level: Level);

    /// Get the effective maximum loggable level for this logger's name.
    fn get_max_level(&self) -> Level;

    /// Create a new message with `fields` already set, or `None` if the
    /// level is not loggable.
    ///
    /// `depth` counts the frames between the caller and this call.
    fn new_message(&self, level: Level, depth: usize, fields: &Fields) -> Option<Box<dyn Message>>;

    /// Create and send a message with the `_message` key and extra fields.
    ///
    /// The caller's location is recorded as `_file` and `_line` unless
    /// `fields` sets them. Calls through `dyn Logger` record the location
    /// of this method instead.
    #[track_caller]
    fn log(&self, level: Level, depth: usize, message: &str, fields: &Fields) {
        let caller = Location::caller();
        if let Some(mut msg) = self.new_message(level, depth + 1, &Fields::new()) {
            set_location(&mut *msg, caller);
            for (key, value) in fields.iter() {
                msg.set(key, value.clone());
            }
            msg.set(keys::MESSAGE, Value::from(message));
            msg.send();
        }
    }

    /// Create and send a message whose text is formatted from `args`.
    ///
    /// Formatting only happens if the level is loggable.
    #[track_caller]
    fn log_fmt(&self, level: Level, depth: usize, args: Arguments<'_>) {
        let caller = Location::caller();
        if let Some(mut msg) = self.new_message(level, depth + 1, &Fields::new()) {
            set_location(&mut *msg, caller);
            msg.set(keys::MESSAGE, Value::Str(fmt::format(args)));
            msg.send();
        }
    }

    /// Log a critical message.
    #[track_caller]
    fn critical(&self, message: &str) {
        self.log(Level::Critical, 1, message, &Fields::new());
    }

    /// Log a formatted critical message.
    #[track_caller]
    fn critical_fmt(&self, args: Arguments<'_>) {
        self.log_fmt(Level::Critical, 1, args);
    }

    /// Log an error message.
    #[track_caller]
    fn error(&self, message: &str) {
        self.log(Level::Error, 1, message, &Fields::new());
    }

    /// Log a formatted error message.
    #[track_caller]
    fn error_fmt(&self, args: Arguments<'_>) {
        self.log_fmt(Level::Error, 1, args);
    }

    /// Log a warning message.
    #[track_caller]
    fn warning(&self, message: &str) {
        self.log(Level::Warning, 1, message, &Fields::new());
    }

    /// Log a formatted warning message.
    #[track_caller]
    fn warning_fmt(&self, args: Arguments<'_>) {
        self.log_fmt(Level::Warning, 1, args);
    }

    /// Log a notice message.
    #[track_caller]
    fn notice(&self, message: &str) {
        self.log(Level::Notice, 1, message, &Fields::new());
    }

    /// Log a formatted notice message.
    #[track_caller]
    fn notice_fmt(&self, args: Arguments<'_>) {
        self.log_fmt(Level::Notice, 1, args);
    }

    /// Log an info message.
    #[track_caller]
    fn info(&self, message: &str) {
        self.log(Level::Info, 1, message, &Fields::new());
    }

    /// Log a formatted info message.
    #[track_caller]
    fn info_fmt(&self, args: Arguments<'_>) {
        self.log_fmt(Level::Info, 1, args);
    }

    /// Log a debug message.
    #[track_caller]
    fn debug(&self, message: &str) {
        self.log(Level::Debug, 1, message, &Fields::new());
    }

    /// Log a formatted debug message.
    #[track_caller]
    fn debug_fmt(&self, args: Arguments<'_>) {
        self.log_fmt(Level::Debug, 1, args);
    }
}

fn set_location(message: &mut dyn Message, location: &Location<'_>) {
    message.set(keys::FILE, Value::from(location.file()));
    message.set(keys::LINE, Value::from(location.line()));
}

/// Log a formatted message at an explicit level, tagged with the call site.
///
/// The format arguments are only evaluated when the level is loggable.
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        use $crate::Logger as _;
        if let Some(mut message) = $logger.new_message($level, 0, &$crate::Fields::new()) {
            message.set($crate::keys::FILE, $crate::Value::from(file!()));
            message.set($crate::keys::LINE, $crate::Value::from(line!()));
            message.set($crate::keys::MESSAGE, $crate::Value::Str(format!($($arg)+)));
            message.send();
        }
    }};
}

/// Log a formatted critical message.
#[macro_export]
macro_rules! log_critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Critical, $($arg)+)
    };
}

/// Log a formatted error message.
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Log a formatted warning message.
#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Warning, $($arg)+)
    };
}

/// Log a formatted notice message.
#[macro_export]
macro_rules! log_notice {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Notice, $($arg)+)
    };
}

/// Log a formatted info message.
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log a formatted debug message.
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// [`Logger`] bound to a name and forwarding to an explicit backend.
///
/// # Example
///
/// ```
/// use commonlog_core::{BackendLogger, Logger, SimpleBackend};
/// use commonlog_types::{Level, LoggerName};
/// use std::sync::Arc;
///
/// let backend = Arc::new(SimpleBackend::with_writer(std::io::sink()));
/// let logger = BackendLogger::new(LoggerName::parse("server.http").unwrap(), backend);
///
/// logger.set_max_level(Level::Info);
/// assert!(logger.allow_level(Level::Info));
/// assert!(!logger.allow_level(Level::Debug));
/// ```
#[derive(Clone)]
pub struct BackendLogger {
    name: LoggerName,
    backend: Arc<dyn Backend>,
}

impl BackendLogger {
    /// Create a logger for `name` on `backend`.
    pub fn new(name: LoggerName, backend: Arc<dyn Backend>) -> Self {
        Self { name, backend }
    }

    /// The logger's name.
    pub fn name(&self) -> &LoggerName {
        &self.name
    }
}

impl fmt::Debug for BackendLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendLogger")
            .field("name", &self.name.to_string())
            .finish_non_exhaustive()
    }
}

impl Logger for BackendLogger {
    fn allow_level(&self, level: Level) -> bool {
        self.backend.allow_level(self.name.segments(), level)
    }

    fn set_max_level(&self, level: Level) {
        self.backend.set_max_level(self.name.segments(), level);
    }

    fn get_max_level(&self) -> Level {
        self.backend.get_max_level(self.name.segments())
    }

    fn new_message(&self, level: Level, depth: usize, fields: &Fields) -> Option<Box<dyn Message>> {
        let mut message = self.backend.new_message(self.name.segments(), level, depth + 1)?;
        for (key, value) in fields.iter() {
            message.set(key, value.clone());
        }
        Some(message)
    }
}

/// A logger that discards all messages.
///
/// Useful for:
/// - Unit tests where log output would be noise
/// - Components that take an optional logger
///
/// # Example
///
/// ```
/// use commonlog_core::{Logger, NoOpLogger};
/// use commonlog_types::Level;
/// use std::sync::Arc;
///
/// let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);
/// logger.info("This message is discarded");
/// assert_eq!(logger.get_max_level(), Level::None);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    fn allow_level(&self, _level: Level) -> bool {
        false
    }

    fn set_max_level(&self, _level: Level) {}

    fn get_max_level(&self) -> Level {
        Level::None
    }

    #[inline]
    fn new_message(&self, _level: Level, _depth: usize, _fields: &Fields) -> Option<Box<dyn Message>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SimpleBackend;
    use commonlog_types::Result;
    use mockall::mock;
    use mockall::predicate::*;
    use parking_lot::Mutex;
    use std::io::{self, Write};
    use std::path::PathBuf;

    mock! {
        pub TestBackend {}

        impl Backend for TestBackend {
            fn configure(&self, verbosity: i32, path: Option<PathBuf>) -> Result<()>;
            fn new_message(&self, name: &[String], level: Level, depth: usize) -> Option<Box<dyn Message>>;
            fn allow_level(&self, name: &[String], level: Level) -> bool;
            fn set_max_level(&self, name: &[String], level: Level);
            fn get_max_level(&self, name: &[String]) -> Level;
        }
    }

    /// Counts how often it is formatted.
    struct Expensive(Arc<Mutex<usize>>);

    impl fmt::Display for Expensive {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            *self.0.lock() += 1;
            write!(f, "expensive")
        }
    }

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

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    fn name(dotted: &str) -> LoggerName {
        LoggerName::parse(dotted).unwrap()
    }

    #[test]
    fn test_refused_message_is_never_formatted() {
        let mut backend = MockTestBackend::new();
        backend
            .expect_new_message()
            .withf(|name, level, _| name == ["server", "db"] && *level == Level::Debug)
            .times(1)
            .returning(|_, _, _| None);

        let logger = BackendLogger::new(name("server.db"), Arc::new(backend));
        let count = Arc::new(Mutex::new(0));
        logger.debug_fmt(format_args!("{}", Expensive(Arc::clone(&count))));

        assert_eq!(*count.lock(), 0);
    }

    #[test]
    fn test_forwards_levels_to_backend() {
        let mut backend = MockTestBackend::new();
        backend
            .expect_set_max_level()
            .withf(|name, level| name == ["a", "b"] && *level == Level::Info)
            .times(1)
            .return_const(());
        backend
            .expect_get_max_level()
            .times(1)
            .return_const(Level::Info);
        backend
            .expect_allow_level()
            .with(always(), eq(Level::Debug))
            .times(1)
            .return_const(false);

        let logger = BackendLogger::new(name("a.b"), Arc::new(backend));
        logger.set_max_level(Level::Info);
        assert_eq!(logger.get_max_level(), Level::Info);
        assert!(!logger.allow_level(Level::Debug));
    }

    #[test]
    fn test_depth_is_incremented_per_layer() {
        let mut backend = MockTestBackend::new();
        backend
            .expect_new_message()
            .with(always(), eq(Level::Error), eq(2))
            .times(1)
            .returning(|_, _, _| None);

        let logger = BackendLogger::new(name("x"), Arc::new(backend));
        logger.new_message(Level::Error, 1, &Fields::new());
    }

    #[test]
    fn test_convenience_methods_write_through_backend() {
        let buffer = SharedBuffer::default();
        let backend = Arc::new(SimpleBackend::with_writer(buffer.clone()));
        backend.set_max_level(&[], Level::Notice);

        let logger = BackendLogger::new(name("app"), backend);
        logger.critical("disk on fire");
        logger.notice_fmt(format_args!("{} users", 3));
        logger.info("hidden");
        logger.log(Level::Warning, 0, "slow", &Fields::new().with("ms", 1500));

        let output = buffer.contents();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("CRIT [app] disk on fire"));
        assert!(lines[1].ends_with("NOTE [app] 3 users"));
        assert!(lines[2].ends_with("WARN [app] slow {ms=\"1500\"}"));
    }

    #[test]
    fn test_macros_capture_call_site() {
        let buffer = SharedBuffer::default();
        let backend = Arc::new(SimpleBackend::with_writer(buffer.clone()).with_trace(true));
        backend.set_max_level(&[], Level::Debug);
        let logger = BackendLogger::new(name("app"), backend);

        crate::log_debug!(logger, "value is {}", 7);

        let output = buffer.contents();
        assert!(output.contains("DEBUG [app] value is 7"));
        assert!(output.contains("logger.rs:"));
    }

    #[test]
    fn test_methods_record_call_site() {
        let buffer = SharedBuffer::default();
        let backend = Arc::new(SimpleBackend::with_writer(buffer.clone()).with_trace(true));
        backend.set_max_level(&[], Level::Debug);
        let logger = BackendLogger::new(name("app"), backend);

        logger.error("boom");
        let error_line = line!() - 1;
        logger.info_fmt(format_args!("{} done", 2));
        let info_line = line!() - 1;

        let output = buffer.contents();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with("ERROR [app] boom"));
        assert_eq!(lines[1], format!("└─{}:{}", file!(), error_line));
        assert!(lines[2].ends_with("INFO [app] 2 done"));
        assert_eq!(lines[3], format!("└─{}:{}", file!(), info_line));
    }

    #[test]
    fn test_explicit_location_fields_win() {
        let buffer = SharedBuffer::default();
        let backend = Arc::new(SimpleBackend::with_writer(buffer.clone()).with_trace(true));
        backend.set_max_level(&[], Level::Debug);
        let logger = BackendLogger::new(name("app"), backend);

        let fields = Fields::new().with(keys::FILE, "gen.rs").with(keys::LINE, 12);
        logger.log(Level::Notice, 0, "generated", &fields);

        assert!(buffer.contents().ends_with("NOTE [app] generated\n└─gen.rs:12\n"));
    }

    #[test]
    fn test_macros_skip_formatting_when_refused() {
        let buffer = SharedBuffer::default();
        let backend = Arc::new(SimpleBackend::with_writer(buffer.clone()));
        backend.set_max_level(&[], Level::Warning);
        let logger = BackendLogger::new(name("app"), backend);

        let count = Arc::new(Mutex::new(0));
        crate::log_info!(logger, "{}", Expensive(Arc::clone(&count)));
        crate::log_error!(logger, "{}", Expensive(Arc::clone(&count)));

        assert_eq!(*count.lock(), 1);
        assert!(buffer.contents().contains("ERROR [app] expensive"));
    }

    #[test]
    fn test_noop_logger_as_trait_object() {
        let logger: Box<dyn Logger> = Box::new(NoOpLogger);
        logger.critical("test message");
        logger.debug_fmt(format_args!("debug {}", 1));
        logger.set_max_level(Level::Debug);
        assert!(!logger.allow_level(Level::Critical));
        assert!(logger.new_message(Level::Critical, 0, &Fields::new()).is_none());
    }

    #[test]
    fn test_loggers_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NoOpLogger>();
        assert_send_sync::<BackendLogger>();
    }
}
