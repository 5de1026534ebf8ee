//! Loggers that attach fixed fields to every message.

use crate::logger::Logger;
use commonlog_types::{keys, Fields, Level, Message, Value};
use std::fmt;
use std::sync::Arc;

/// Wrapping [`Logger`] that sets the same fields on every message.
///
/// Deriving a new logger from a `KeyValueLogger` with
/// [`with_fields`](Self::with_fields) or [`scope`](Self::scope) merges into
/// the existing fields instead of nesting wrappers.
///
/// # Example
///
/// ```
/// use commonlog_core::{KeyValueLogger, Logger, NoOpLogger};
/// use commonlog_types::{Fields, Value};
/// use std::sync::Arc;
///
/// let logger = KeyValueLogger::scoped(Arc::new(NoOpLogger), "request");
/// let logger = logger.scope("auth").with_fields(Fields::new().with("user", "alice"));
///
/// assert_eq!(logger.fields().get("_scope"), Some(&Value::from("request.auth")));
/// assert_eq!(logger.fields().get("user"), Some(&Value::from("alice")));
/// ```
#[derive(Clone)]
pub struct KeyValueLogger {
    inner: Arc<dyn Logger>,
    fields: Fields,
}

impl KeyValueLogger {
    /// Wrap `logger`, setting `fields` on every message.
    pub fn new(logger: Arc<dyn Logger>, fields: Fields) -> Self {
        Self { inner: logger, fields }
    }

    /// Wrap `logger`, setting `_scope` on every message.
    pub fn scoped(logger: Arc<dyn Logger>, scope: &str) -> Self {
        Self::new(logger, Fields::new().with(keys::SCOPE, scope))
    }

    /// A logger with `fields` merged over ours. Later values win.
    pub fn with_fields(&self, fields: Fields) -> Self {
        let mut merged = self.fields.clone();
        merged.merge(&fields);
        Self::new(Arc::clone(&self.inner), merged)
    }

    /// A logger whose scope is ours with `scope` appended using `.`.
    pub fn scope(&self, scope: &str) -> Self {
        let scope = match self.fields.get(keys::SCOPE) {
            Some(existing) => {
                let existing = existing.to_string();
                if existing.is_empty() {
                    scope.to_string()
                } else {
                    format!("{}.{}", existing, scope)
                }
            }
            None => scope.to_string(),
        };

        let mut fields = self.fields.clone();
        fields.set(keys::SCOPE, Value::Str(scope));
        Self::new(Arc::clone(&self.inner), fields)
    }

    /// The fields set on every message.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }
}

impl fmt::Debug for KeyValueLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyValueLogger")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl Logger for KeyValueLogger {
    fn allow_level(&self, level: Level) -> bool {
        self.inner.allow_level(level)
    }

    fn set_max_level(&self, level: Level) {
        self.inner.set_max_level(level);
    }

    fn get_max_level(&self) -> Level {
        self.inner.get_max_level()
    }

    fn new_message(&self, level: Level, depth: usize, fields: &Fields) -> Option<Box<dyn Message>> {
        let mut message = self.inner.new_message(level, depth + 1, &self.fields)?;
        for (key, value) in fields.iter() {
            message.set(key, value.clone());
        }
        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SimpleBackend;
    use crate::logger::{BackendLogger, NoOpLogger};
    use commonlog_types::{Backend, LoggerName};
    use parking_lot::Mutex;
    use std::io::{self, Write};

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

    fn setup(max: Level) -> (SharedBuffer, Arc<dyn Logger>) {
        let buffer = SharedBuffer::default();
        let backend = Arc::new(SimpleBackend::with_writer(buffer.clone()));
        backend.set_max_level(&[], max);
        let name = LoggerName::parse("svc").unwrap();
        (buffer, Arc::new(BackendLogger::new(name, backend)))
    }

    fn output(buffer: &SharedBuffer) -> String {
        String::from_utf8(buffer.0.lock().clone()).unwrap()
    }

    #[test]
    fn test_scope_appends_with_dot() {
        let logger = KeyValueLogger::scoped(Arc::new(NoOpLogger), "a").scope("b").scope("c");
        assert_eq!(logger.fields().get(keys::SCOPE), Some(&Value::from("a.b.c")));

        let logger = KeyValueLogger::new(Arc::new(NoOpLogger), Fields::new()).scope("only");
        assert_eq!(logger.fields().get(keys::SCOPE), Some(&Value::from("only")));
    }

    #[test]
    fn test_with_fields_merges() {
        let logger = KeyValueLogger::new(
            Arc::new(NoOpLogger),
            Fields::new().with("a", 1).with("b", 2),
        );
        let merged = logger.with_fields(Fields::new().with("b", 3).with("c", 4));

        assert_eq!(merged.fields().len(), 3);
        assert_eq!(merged.fields().get("b"), Some(&Value::Int(3)));
        // the parent logger keeps its fields
        assert_eq!(logger.fields().get("b"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_fields_reach_the_backend() {
        let (buffer, inner) = setup(Level::Info);
        let logger = KeyValueLogger::scoped(inner, "request")
            .with_fields(Fields::new().with("id", 7));

        logger.info("accepted");
        logger.log(Level::Notice, 0, "done", &Fields::new().with("status", 200));

        let output = output(&buffer);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("INFO [svc:request] accepted {id=\"7\"}"));
        assert!(lines[1].ends_with("NOTE [svc:request] done {id=\"7\" status=\"200\"}"));
    }

    #[test]
    fn test_levels_pass_through() {
        let (buffer, inner) = setup(Level::Warning);
        let logger = KeyValueLogger::scoped(inner, "x");

        assert_eq!(logger.get_max_level(), Level::Warning);
        logger.debug("hidden");
        assert!(output(&buffer).is_empty());

        logger.set_max_level(Level::Debug);
        assert!(logger.allow_level(Level::Debug));
        logger.debug("shown");
        assert!(output(&buffer).contains("DEBUG [svc:x] shown"));
    }
}
