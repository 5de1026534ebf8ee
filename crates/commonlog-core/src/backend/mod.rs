//! Bundled backends.
//!
//! - [`SimpleBackend`]: text lines to stderr, a file or any writer
//! - [`TracingBackend`]: events for an installed `tracing` subscriber

pub mod simple;
pub mod tracing_adapter;

pub use simple::{LogWriter, SimpleBackend};
pub use tracing_adapter::TracingBackend;

use commonlog_types::{Backend, LogError, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Selects one of the bundled backends by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// [`SimpleBackend`]
    #[default]
    Simple,
    /// [`TracingBackend`]
    Tracing,
}

impl BackendKind {
    /// Create a fresh, unconfigured backend of this kind.
    pub fn create(self) -> Arc<dyn Backend> {
        match self {
            BackendKind::Simple => Arc::new(SimpleBackend::new()),
            BackendKind::Tracing => Arc::new(TracingBackend::new()),
        }
    }
}

impl FromStr for BackendKind {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(BackendKind::Simple),
            "tracing" => Ok(BackendKind::Tracing),
            other => Err(LogError::Validation(format!("Unknown backend: {}", other))),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Simple => write!(f, "simple"),
            BackendKind::Tracing => write!(f, "tracing"),
        }
    }
}
