//! commonlog CLI entry point.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

mod cli;
mod commands;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.execute() {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}
