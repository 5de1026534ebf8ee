//! Core trait definitions for the logging facade.

use std::path::PathBuf;
use crate::errors::Result;
use crate::level::Level;
use crate::value::Value;

/// Message keys with special meaning to backends.
pub mod keys {
    /// The base text of the message
    pub const MESSAGE: &str = "_message";
    /// The scope of the message
    pub const SCOPE: &str = "_scope";
    /// Source file in which the message was created
    pub const FILE: &str = "_file";
    /// Line number within `_file`
    pub const LINE: &str = "_line";
}

/// A message under construction.
///
/// Obtained from [`Backend::new_message`], filled in with [`Message::set`]
/// and handed back to the backend with [`Message::send`].
pub trait Message: Send {
    /// Set a value on the message.
    ///
    /// See [`keys`] for the specially supported keys.
    fn set(&mut self, key: &str, value: Value);

    /// Send the message to the backend.
    fn send(self: Box<Self>);
}

/// Trait for pluggable logging backends.
///
/// A backend owns a level hierarchy and decides, per name and level,
/// whether a message is emitted. Implementations must be usable from
/// many threads at once.
pub trait Backend: Send + Sync {
    /// Configure output and the root level.
    ///
    /// Verbosity follows [`Level::from_verbosity`]. With no `path` the
    /// backend writes to stderr; a negative verbosity discards everything.
    fn configure(&self, verbosity: i32, path: Option<PathBuf>) -> Result<()>;

    /// Create a new message, or `None` if the level is not allowed.
    ///
    /// `depth` is a hint for call-site capture and never affects filtering.
    fn new_message(&self, name: &[String], level: Level, depth: usize) -> Option<Box<dyn Message>>;

    /// Whether `level` is allowed for `name`.
    fn allow_level(&self, name: &[String], level: Level) -> bool;

    /// Set the maximum level for `name` and, by inheritance, its descendants.
    fn set_max_level(&self, name: &[String], level: Level);

    /// Get the effective maximum level for `name`.
    fn get_max_level(&self, name: &[String]) -> Level;
}
