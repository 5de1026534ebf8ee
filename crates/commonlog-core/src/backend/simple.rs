//! Plain text backend writing one line per message.

use crate::hierarchy::NameHierarchy;
use crate::message::LinearMessage;
use crate::time;
use commonlog_types::{Backend, Level, Message, Result};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Permissions for newly created log files.
pub const LOG_FILE_MODE: u32 = 0o600;

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Backend that renders messages as text lines:
///
/// ```text
/// 2024/03/09 07:05:01.123  NOTE [server.http:request] accepted {client="10.0.0.1"}
/// ```
///
/// With call-site tracing enabled a second `└─file:line` line follows.
pub struct SimpleBackend {
    hierarchy: NameHierarchy,
    writer: SharedWriter,
    trace: AtomicBool,
}

impl SimpleBackend {
    /// A backend writing to stderr. Nothing is loggable until configured.
    pub fn new() -> Self {
        Self::with_writer(io::stderr())
    }

    /// A backend writing to `writer`. Nothing is loggable until configured.
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            hierarchy: NameHierarchy::new(),
            writer: Arc::new(Mutex::new(Box::new(writer))),
            trace: AtomicBool::new(false),
        }
    }

    /// Enable or disable the call-site line, builder style.
    pub fn with_trace(self, trace: bool) -> Self {
        self.set_trace(trace);
        self
    }

    /// Enable or disable the call-site line.
    pub fn set_trace(&self, trace: bool) {
        self.trace.store(trace, Ordering::Relaxed);
    }

    /// The level hierarchy used for filtering.
    pub fn hierarchy(&self) -> &NameHierarchy {
        &self.hierarchy
    }

    /// A handle writing to the backend's current destination.
    ///
    /// The handle follows later calls to `configure`.
    pub fn writer(&self) -> LogWriter {
        LogWriter(Arc::clone(&self.writer))
    }

    fn replace_writer(&self, writer: Box<dyn Write + Send>) {
        let mut current = self.writer.lock();
        if let Err(e) = current.flush() {
            warn!("Failed to flush previous log output: {}", e);
        }
        *current = writer;
    }
}

/// Writer returned by [`SimpleBackend::writer`].
#[derive(Clone)]
pub struct LogWriter(SharedWriter);

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.0.lock().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.lock().flush()
    }
}

impl Default for SimpleBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for SimpleBackend {
    fn configure(&self, verbosity: i32, path: Option<PathBuf>) -> Result<()> {
        let max_level = Level::from_verbosity(verbosity);

        let writer: Box<dyn Write + Send> = match (&path, max_level) {
            (_, Level::None) => Box::new(io::sink()),
            (Some(path), _) => Box::new(open_log_file(path)?),
            (None, _) => Box::new(io::stderr()),
        };

        self.replace_writer(writer);
        self.hierarchy.set_max_level::<&str>(&[], max_level);

        debug!(verbosity, ?path, level = %max_level, "Configured simple log backend");
        Ok(())
    }

    fn new_message(&self, name: &[String], level: Level, _depth: usize) -> Option<Box<dyn Message>> {
        if !level.is_loggable() || !self.allow_level(name, level) {
            return None;
        }

        let writer = Arc::clone(&self.writer);
        let name = name.to_vec();
        let trace = self.trace.load(Ordering::Relaxed);

        Some(Box::new(LinearMessage::new(move |message| {
            let line = format_line(&message, &name, level, trace);
            let mut writer = writer.lock();
            if let Err(e) = writer.write_all(line.as_bytes()).and_then(|_| writer.flush()) {
                warn!("Failed to write log line: {}", e);
            }
        })))
    }

    fn allow_level(&self, name: &[String], level: Level) -> bool {
        self.hierarchy.allow_level(name, level)
    }

    fn set_max_level(&self, name: &[String], level: Level) {
        self.hierarchy.set_max_level(name, level);
    }

    fn get_max_level(&self, name: &[String]) -> Level {
        self.hierarchy.get_max_level(name)
    }
}

/// Render one message, including the trailing newline.
pub fn format_line(message: &LinearMessage, name: &[String], level: Level, trace: bool) -> String {
    let mut line = time::timestamp();
    line.push_str(&format!("{:>6}", level.tag()));

    let prefix = message.prefix(name);
    if !prefix.is_empty() {
        line.push(' ');
        line.push_str(&prefix);
    }

    if !message.message.is_empty() {
        line.push(' ');
        line.push_str(&message.message.replace('\n', "¶"));
    }

    let values = message.values_string(false);
    if !values.is_empty() {
        line.push(' ');
        line.push_str(&values);
    }

    if trace {
        let location = message.location_string();
        if !location.is_empty() {
            line.push_str("\n└─");
            line.push_str(&location);
        }
    }

    line.push('\n');
    line
}

/// Open `path` for appending, creating it if needed.
pub fn open_log_file(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(LOG_FILE_MODE);
    }

    Ok(options.open(path)?)
}
