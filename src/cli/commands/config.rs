//! Configuration command implementations

use crate::cli::Output;
use crate::config::ZipcrackConfig;
use anyhow::Result;
use clap::{Args, Subcommand};
use std::process::ExitCode;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the merged configuration (defaults, files, environment, flags)
    Show,
}

pub fn execute(args: ConfigArgs, config: &ZipcrackConfig, output: &Output) -> Result<ExitCode> {
    match args.command {
        ConfigCommands::Show => show(config, output),
    }
}

fn show(config: &ZipcrackConfig, output: &Output) -> Result<ExitCode> {
    output.verbose("Configuration after merging every layer:");
    // Printed even with --quiet so it can be piped into a file
    print!("{}", config.to_toml()?);
    Ok(ExitCode::SUCCESS)
}
