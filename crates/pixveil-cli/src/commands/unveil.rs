use std::path::PathBuf;

use clap::Args;
use log::info;

use crate::cli::resolve_password;
use crate::CliResult;

/// Unveils a hidden file from an image or a directory of PNG frames
#[derive(Args, Debug)]
pub struct UnveilArgs {
    /// Password used to encrypt the data
    #[arg(short, long, value_name = "password", conflicts_with = "ask_password")]
    pub password: Option<String>,

    /// Ask for the password on the terminal
    #[arg(long)]
    pub ask_password: bool,

    /// Carrier that contains secret data
    #[arg(short = 'i', long = "in", value_name = "carrier", required = true)]
    pub media: PathBuf,

    /// Unveiled file will be stored in that folder
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output folder",
        required = true
    )]
    pub output_folder: PathBuf,
}

impl UnveilArgs {
    pub fn run(self) -> CliResult<()> {
        let password = resolve_password(self.password, self.ask_password, false)?;
        let written = pixveil_core::commands::unveil(&self.media, &self.output_folder, password)?;
        info!("unveiled file written to {}", written.display());
        println!("{}", written.display());
        Ok(())
    }
}
