//! Send one message through a backend.

use super::output_context;
use crate::cli::Cli;
use anyhow::{bail, Context, Result};
use commonlog_core::{BackendKind, Logger};
use commonlog_types::{Fields, Level, LogConfig, Value};
use tracing::debug;

pub fn execute(
    cli: &Cli,
    config: &LogConfig,
    name: &str,
    level: Level,
    message: &str,
    fields: &[String],
    backend: BackendKind,
) -> Result<()> {
    if !level.is_loggable() {
        bail!("Cannot emit a message at level '{}'", level);
    }

    let fields = fields
        .iter()
        .map(|field| parse_field(field))
        .collect::<Result<Fields>>()?;

    let context = output_context(cli, config, backend)?;
    let logger = context
        .logger(name)
        .with_context(|| format!("Invalid logger name '{}'", name))?;

    if !logger.allow_level(level) {
        debug!(logger = %name, %level, "Message filtered");
    }
    logger.log(level, 0, message, &fields);

    Ok(())
}

/// Parse `key=value`. Integers and booleans keep their type.
fn parse_field(field: &str) -> Result<(String, Value)> {
    let Some((key, value)) = field.split_once('=') else {
        bail!("Invalid field '{}': expected KEY=VALUE", field);
    };

    let key = key.trim();
    if key.is_empty() {
        bail!("Invalid field '{}': empty key", field);
    }

    let value = if let Ok(i) = value.parse::<i64>() {
        Value::Int(i)
    } else if let Ok(b) = value.parse::<bool>() {
        Value::Bool(b)
    } else {
        Value::from(value)
    };

    Ok((key.to_string(), value))
}
