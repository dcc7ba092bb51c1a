use std::process::ExitCode;

use clap::Parser;
use log::error;
use pixveil_core::{StegoError, StegoStatus};

mod cli;
mod commands;

use cli::{CliArgs, Commands};

pub type CliResult<T> = Result<T, StegoError>;

fn main() -> ExitCode {
    env_logger::init();

    let args = CliArgs::parse();
    let result = match args.command {
        Commands::Hide(args) => args.run(),
        Commands::Unveil(args) => args.run(),
        Commands::Capacity(args) => args.run(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let status = StegoStatus::from(&e);
            error!("{status}: {e}");
            eprintln!("Error: {e}");
            ExitCode::from(status.code() as u8)
        }
    }
}
