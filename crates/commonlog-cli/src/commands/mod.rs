//! CLI command implementations.

pub mod check;
pub mod emit;
pub mod levels;
pub mod resolve;
pub mod version;

use crate::cli::Cli;
use anyhow::{Context, Result};
use commonlog_core::config::load_log_config;
use commonlog_core::context::QUIET_VERBOSITY;
use commonlog_core::{log, BackendKind, LogContext, SimpleBackend};
use commonlog_types::config::parse_level_directives;
use commonlog_types::{Backend, LogConfig, LoggerName};
use std::sync::Arc;

/// The effective log configuration: file, then environment, then flags.
pub fn load_config(cli: &Cli) -> Result<LogConfig> {
    let mut config = load_log_config(cli.config.as_deref()).context("Failed to load configuration")?;

    if cli.verbose > 0 {
        config.verbosity = i32::from(cli.verbose);
    }

    for directive in &cli.levels {
        let levels = parse_level_directives(directive)
            .with_context(|| format!("Invalid --level '{}'", directive))?;
        config.levels.extend(levels);
    }

    Ok(config)
}

/// Install the subscriber for the tool's own diagnostics and the tracing backend.
///
/// Without `file_output` the subscriber writes to stderr and the configured
/// log file is not touched.
pub fn init_tracing(cli: &Cli, config: &LogConfig, file_output: bool) -> Result<()> {
    let mut subscriber = config.clone();
    if !file_output {
        subscriber.path = None;
    }
    if cli.quiet && subscriber.path.is_none() {
        subscriber.verbosity = QUIET_VERBOSITY;
        subscriber.levels.clear();
    }

    log::init_from_config(&subscriber).context("Failed to initialize logging")
}

/// A context whose backend writes output, honouring `--quiet`.
pub fn output_context(cli: &Cli, config: &LogConfig, kind: BackendKind) -> Result<LogContext> {
    let backend: Arc<dyn Backend> = match kind {
        BackendKind::Simple => Arc::new(SimpleBackend::new().with_trace(config.trace)),
        BackendKind::Tracing => kind.create(),
    };

    let context = LogContext::new(backend);
    context
        .initialize(config.verbosity, config.path.clone(), cli.quiet)
        .context("Failed to configure log output")?;

    for (name, level) in config.overrides()? {
        context.set_max_level(&name, level);
    }
    Ok(context)
}

/// A backend with the configured levels applied and no output.
pub fn levels_backend(config: &LogConfig) -> Result<SimpleBackend> {
    let backend = SimpleBackend::with_writer(std::io::sink());
    config.apply_levels(&backend)?;
    Ok(backend)
}

/// Display form of a logger name, with the root shown as `<root>`.
pub fn display_name(name: &LoggerName) -> String {
    if name.is_root() {
        "<root>".to_string()
    } else {
        name.to_string()
    }
}
