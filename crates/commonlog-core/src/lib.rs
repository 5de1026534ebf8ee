//! # CommonLog Core
//!
//! Hierarchical level filtering, the logger facade, bundled backends and
//! configuration for commonlog.
//!
//! This crate provides:
//!
//! - **Hierarchy**: Dotted-name level resolution ([`NameHierarchy`])
//! - **Loggers**: The [`Logger`] trait, backend-bound and key-value loggers
//! - **Backends**: Plain text ([`SimpleBackend`]) and `tracing` ([`TracingBackend`])
//! - **Configuration**: Layered YAML configuration with environment overrides
//! - **Subscriber setup**: Installing a `tracing` subscriber from [`LogConfig`]
//!
//! ## Example
//!
//! ```
//! use commonlog_core::{log_info, KeyValueLogger, LogContext, Logger, SimpleBackend};
//! use commonlog_types::Level;
//! use std::sync::Arc;
//!
//! let context = LogContext::new(Arc::new(SimpleBackend::with_writer(std::io::sink())));
//! context.configure(1, None)?;
//!
//! let http = context.logger("server.http")?;
//! http.set_max_level(Level::Debug);
//! log_info!(http, "listening on {}", 8080);
//!
//! let request = KeyValueLogger::scoped(Arc::new(http), "request");
//! request.debug("accepted");
//! # Ok::<(), commonlog_types::LogError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod config;
pub mod context;
pub mod hierarchy;
pub mod key_value;
pub mod log;
pub mod logger;
pub mod message;
pub mod time;
pub mod util;

// Re-export commonly used items
pub use backend::{BackendKind, LogWriter, SimpleBackend, TracingBackend};
pub use context::{call_and_log_error, LogContext};
pub use hierarchy::NameHierarchy;
pub use key_value::KeyValueLogger;
pub use logger::{BackendLogger, Logger, NoOpLogger};
pub use message::LinearMessage;

pub use commonlog_types::{keys, Backend, Fields, Level, LogConfig, LogError, LoggerName, Message, Result, Value};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
