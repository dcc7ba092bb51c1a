use std::path::PathBuf;

use clap::Args;

use super::CodecArgs;
use crate::CliResult;

/// Prints how many bytes of file name and data fit into a carrier
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// Carrier image or frame directory
    #[arg(short = 'i', long = "in", value_name = "carrier", required = true)]
    pub media: PathBuf,

    #[command(flatten)]
    pub codec: CodecArgs,
}

impl CapacityArgs {
    pub fn run(self) -> CliResult<()> {
        let bytes = pixveil_core::commands::capacity(&self.media, self.codec.into())?;
        println!("{bytes}");
        Ok(())
    }
}
