//! # CommonLog Types
//!
//! Core types, traits, and enums shared across all commonlog crates.
//!
//! This crate provides the vocabulary the logging facade is built from:
//!
//! - The ordered severity [`Level`] and the verbosity-to-level policy
//! - Validated dotted logger names ([`LoggerName`])
//! - Typed message fields ([`Value`], [`Fields`])
//! - The [`Backend`] and [`Message`] capability traits implemented by sinks
//! - Configuration structures and the shared error type
//!
//! ## Example
//!
//! ```
//! use commonlog_types::{Level, LoggerName};
//!
//! let name = LoggerName::parse("server.http").unwrap();
//! assert_eq!(name.segments(), ["server", "http"]);
//!
//! assert_eq!(Level::from_verbosity(0), Level::Notice);
//! assert!(Level::Error < Level::Debug);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod level;
pub mod name;
pub mod value;
pub mod traits;
pub mod config;

// Re-export common types for convenience
pub use errors::{LogError, Result};
pub use level::Level;
pub use name::LoggerName;
pub use value::{Fields, Value};
pub use traits::{keys, Backend, Message};
pub use config::{LogConfig, LogFormat};
