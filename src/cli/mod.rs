//! Command-line interface for zipcrack
//!
//! Argument parsing with clap, one module per subcommand, and a shared
//! [`Output`] for styled messages.

pub mod commands;
pub mod output;

pub use commands::Cli;
pub use output::Output;
