//! Validate the configuration.

use crate::cli::Cli;
use anyhow::Result;
use colored::Colorize;
use commonlog_types::{Level, LogConfig};
use std::path::Path;

pub fn execute(cli: &Cli, config: &LogConfig) -> Result<()> {
    let overrides = config.overrides()?;

    match &cli.config {
        Some(path) => println!("{} {}", "Configuration OK:".green().bold(), path.display()),
        None => println!("{} (no file)", "Configuration OK".green().bold()),
    }

    println!("  Root level: {}", Level::from_verbosity(config.verbosity));
    match &config.path {
        Some(path) => {
            println!("  Output: {}", path.display());
            if !log_directory_exists(path) {
                println!("  {} log directory does not exist", "Warning:".yellow().bold());
            }
        }
        None => println!("  Output: stderr"),
    }
    println!("  Trace: {}", config.trace);
    println!("  Overrides: {}", overrides.len());

    Ok(())
}

fn log_directory_exists(path: &Path) -> bool {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.is_dir(),
        _ => true,
    }
}
