use crate::cli::Output;
use crate::config::ZipcrackConfig;
use crate::logging;
use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::process::ExitCode;

pub mod config;
pub mod crack;
pub mod last_dir;

#[derive(Parser)]
#[command(
    name = "zipcrack",
    version = crate::VERSION,
    about = "Recover the password of a ZipCrypto-protected archive entry by brute force",
    long_about = "zipcrack tries every candidate over a fixed alphabet, shortest first, \
                  spreading leading symbols across all CPU cores. Each candidate is verified \
                  by decrypting and reading the whole entry, so ZipCrypto's weak header check \
                  cannot produce false positives."
)]
pub struct Cli {
    /// Run as if started in <DIR> instead of current working directory
    #[arg(short = 'C', long = "directory", global = true)]
    pub directory: Option<String>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search for the password of an archive entry
    Crack(crack::CrackArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Show the directory the last archive was opened from
    LastDir(last_dir::LastDirArgs),
}

impl Cli {
    pub async fn run(self) -> Result<ExitCode> {
        // Change directory if specified
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        let output = Output::new(self.verbose > 0, self.quiet);

        let overrides = match &self.command {
            Some(Commands::Crack(args)) => Some(args.overrides()),
            _ => None,
        };
        let config = match ZipcrackConfig::load_with_overrides(self.config.as_deref(), overrides) {
            Ok(config) => config,
            Err(e) => {
                logging::init(self.verbose, self.quiet, None);
                return Err(e);
            }
        };

        let log_file = match logging::open_log_file(&config.logging) {
            Ok(file) => file,
            Err(e) => {
                output.warning(&format!("File logging disabled: {e}"));
                None
            }
        };
        logging::init(self.verbose, self.quiet, log_file);
        tracing::info!("Application started");

        let result = match self.command {
            Some(Commands::Crack(args)) => crack::execute(args, &config, &output).await,
            Some(Commands::Config(args)) => config::execute(args, &config, &output),
            Some(Commands::LastDir(args)) => last_dir::execute(args, &config),
            None => {
                // Show help when no command is provided
                Cli::command().print_help()?;
                Ok(ExitCode::SUCCESS)
            }
        };

        if let Err(e) = &result {
            tracing::error!("{e:#}");
        }
        tracing::info!("Application stopped");
        result
    }
}
