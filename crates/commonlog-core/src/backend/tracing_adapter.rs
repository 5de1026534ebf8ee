//! Backend forwarding messages to the `tracing` ecosystem.

use crate::hierarchy::NameHierarchy;
use crate::message::LinearMessage;
use commonlog_types::{Backend, Level, Message, Result};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;

/// The `tracing` level a message level is emitted at.
///
/// `tracing` has no notice or critical, so notice maps to INFO and critical
/// to ERROR. [`Level::None`] has no counterpart.
pub fn tracing_level(level: Level) -> Option<tracing::Level> {
    match level {
        Level::None => None,
        Level::Critical | Level::Error => Some(tracing::Level::ERROR),
        Level::Warning => Some(tracing::Level::WARN),
        Level::Notice | Level::Info => Some(tracing::Level::INFO),
        Level::Debug => Some(tracing::Level::DEBUG),
    }
}

/// The subscriber filter matching a maximum message level.
pub fn level_filter(level: Level) -> LevelFilter {
    match tracing_level(level) {
        Some(level) => LevelFilter::from_level(level),
        None => LevelFilter::OFF,
    }
}

macro_rules! emit {
    ($level:expr, $($rest:tt)+) => {
        match $level {
            Level::None => {}
            Level::Critical | Level::Error => tracing::error!(target: "commonlog", $($rest)+),
            Level::Warning => tracing::warn!(target: "commonlog", $($rest)+),
            Level::Notice | Level::Info => tracing::info!(target: "commonlog", $($rest)+),
            Level::Debug => tracing::debug!(target: "commonlog", $($rest)+),
        }
    };
}

/// Backend that turns messages into `tracing` events.
///
/// Filtering by name happens here, before an event is created, so the
/// installed subscriber only sees messages the hierarchy allows. Output
/// goes wherever the subscriber writes; see [`crate::log`].
#[derive(Debug, Default)]
pub struct TracingBackend {
    hierarchy: NameHierarchy,
}

impl TracingBackend {
    /// Create a backend. Nothing is loggable until configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// The level hierarchy used for filtering.
    pub fn hierarchy(&self) -> &NameHierarchy {
        &self.hierarchy
    }
}

impl Backend for TracingBackend {
    fn configure(&self, verbosity: i32, path: Option<PathBuf>) -> Result<()> {
        let max_level = Level::from_verbosity(verbosity);
        self.hierarchy.set_max_level::<&str>(&[], max_level);

        if path.is_some() {
            debug!(?path, "Tracing backend ignores the log path; configure the subscriber instead");
        }
        Ok(())
    }

    fn new_message(&self, name: &[String], level: Level, _depth: usize) -> Option<Box<dyn Message>> {
        if !level.is_loggable() || !self.allow_level(name, level) {
            return None;
        }

        let name = name.join(".");
        Some(Box::new(LinearMessage::new(move |message| {
            let values = message.values_string(false);
            emit!(
                level,
                logger = %name,
                scope = %message.scope,
                values = %values,
                file = %message.file,
                line = ?message.line,
                "{}",
                message.message
            );
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
