use clap::Parser;
use std::process::ExitCode;

use zipcrack::cli::{Cli, Output};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new(false, cli.quiet);
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            output.error(&format!("{e:#}"));
            ExitCode::from(2)
        }
    }
}
