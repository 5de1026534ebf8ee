//! List explicitly configured levels.

use super::levels_backend;
use anyhow::Result;
use colored::Colorize;
use commonlog_types::LogConfig;

pub fn execute(config: &LogConfig) -> Result<()> {
    let backend = levels_backend(config)?;

    for (name, level) in backend.hierarchy().configured() {
        let name = if name.is_empty() { "<root>".to_string() } else { name };
        println!("{} = {}", name.cyan(), level);
    }

    Ok(())
}
