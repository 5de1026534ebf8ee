//! Show effective levels for logger names.

use super::{display_name, levels_backend};
use anyhow::{Context, Result};
use commonlog_types::{LogConfig, LoggerName};

pub fn execute(config: &LogConfig, names: &[String]) -> Result<()> {
    let backend = levels_backend(config)?;

    for name in names {
        let name = LoggerName::parse(name).with_context(|| format!("Invalid logger name '{}'", name))?;
        let level = backend.hierarchy().get_max_level(name.segments());
        println!("{} = {}", display_name(&name), level);
    }

    Ok(())
}
