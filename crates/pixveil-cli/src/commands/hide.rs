use std::path::PathBuf;

use clap::Args;

use super::CodecArgs;
use crate::cli::resolve_password;
use crate::CliResult;

/// Hides a file in a PNG/JPEG image or a directory of PNG frames
#[derive(Args, Debug)]
pub struct HideArgs {
    /// Password used to encrypt the data
    #[arg(short, long, value_name = "password", conflicts_with = "ask_password")]
    pub password: Option<String>,

    /// Ask for the password on the terminal
    #[arg(long)]
    pub ask_password: bool,

    /// Carrier image or frame directory, used readonly.
    #[arg(short = 'i', long = "in", value_name = "carrier", required = true)]
    pub media: PathBuf,

    /// The carrier with the hidden data will be stored here
    #[arg(short = 'o', long = "out", value_name = "output", required = true)]
    pub write_to_file: PathBuf,

    /// File to hide
    #[arg(short = 'd', long = "data", value_name = "data file", required = true)]
    pub data_file: PathBuf,

    #[command(flatten)]
    pub codec: CodecArgs,
}

impl HideArgs {
    pub fn run(self) -> CliResult<()> {
        let password = resolve_password(self.password, self.ask_password, true)?;
        pixveil_core::commands::hide(
            &self.media,
            &self.write_to_file,
            &self.data_file,
            password,
            self.codec.into(),
        )
    }
}
