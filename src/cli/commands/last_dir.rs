use crate::config::ZipcrackConfig;
use crate::persist::LastDirectory;
use anyhow::Result;
use clap::Args;
use std::process::ExitCode;

#[derive(Args)]
pub struct LastDirArgs {
    /// Print the path of the state file instead of its content
    #[arg(long)]
    pub file: bool,
}

pub fn execute(args: LastDirArgs, config: &ZipcrackConfig) -> Result<ExitCode> {
    let store = LastDirectory::new(&config.state.last_dir_file);
    if args.file {
        println!("{}", store.file().display());
    } else {
        println!("{}", store.load().display());
    }
    Ok(ExitCode::SUCCESS)
}
