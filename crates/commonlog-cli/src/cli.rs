//! CLI structure and command definitions.

use crate::commands::{self, check, emit, levels, resolve, version};
use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use commonlog_core::BackendKind;
use commonlog_types::{Level, LogConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "commonlog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect and exercise hierarchical log level configuration", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress log output unless a log file is configured
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true, env = "COMMONLOG_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Level override such as `server.http=debug` (repeatable)
    #[arg(short = 'l', long = "level", global = true, value_name = "NAME=LEVEL")]
    pub levels: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the effective max level of logger names
    Resolve {
        /// Dotted logger names; an empty string is the root
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// List explicitly configured levels
    Levels,

    /// Send one message through a backend
    Emit {
        /// Dotted logger name
        name: String,

        /// Message level
        level: Level,

        /// Message text
        message: String,

        /// Extra field (repeatable)
        #[arg(short, long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,

        /// Backend to send through
        #[arg(short, long, default_value = "simple")]
        backend: BackendKind,
    },

    /// Validate the configuration
    Check,

    /// Show version information
    Version,
}

impl Cli {
    pub fn execute(&self) -> Result<()> {
        match &self.command {
            Commands::Resolve { names } => resolve::execute(&self.prepare(false)?, names),
            Commands::Levels => levels::execute(&self.prepare(false)?),
            Commands::Emit {
                name,
                level,
                message,
                fields,
                backend,
            } => {
                // The simple backend opens the log file itself
                let config = self.prepare(*backend == BackendKind::Tracing)?;
                emit::execute(self, &config, name, *level, message, fields, *backend)
            }
            Commands::Check => check::execute(self, &self.prepare(false)?),
            Commands::Version => version::execute(self.verbose > 0),
        }
    }

    /// Load the configuration and install the tracing subscriber.
    ///
    /// The subscriber only writes to the configured log file when
    /// `file_output` is set.
    fn prepare(&self, file_output: bool) -> Result<LogConfig> {
        let config = commands::load_config(self)?;
        commands::init_tracing(self, &config, file_output)?;
        Ok(config)
    }
}
