use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::Password;
use pixveil_core::{Algorithm, EdgeMode, StegoError};

use crate::commands::*;
use crate::CliResult;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Hide(hide::HideArgs),
    Unveil(unveil::UnveilArgs),
    Capacity(capacity::CapacityArgs),
}

/// Embedding algorithm
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlgorithmArg {
    /// One bit in the least significant bit of every usable channel byte
    #[default]
    Lsb,
    /// Pixel value differencing on pairs of neighbouring samples
    Pvd,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Lsb => Algorithm::Lsb,
            AlgorithmArg::Pvd => Algorithm::Pvd,
        }
    }
}

/// Restricts embedding to edge pixels
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeModeArg {
    #[default]
    None,
    Canny,
    Sobel,
}

impl From<EdgeModeArg> for EdgeMode {
    fn from(value: EdgeModeArg) -> Self {
        match value {
            EdgeModeArg::None => EdgeMode::None,
            EdgeModeArg::Canny => EdgeMode::Canny,
            EdgeModeArg::Sobel => EdgeMode::Sobel,
        }
    }
}

/// Prompts for a password on the terminal, twice if `confirm` is set
pub fn ask_for_password(confirm: bool) -> CliResult<String> {
    let prompt = Password::new().with_prompt("Password");
    let prompt = if confirm {
        prompt.with_confirmation("Repeat password", "Passwords do not match")
    } else {
        prompt
    };
    prompt.interact().map_err(|e| match e {
        dialoguer::Error::IO(e) => StegoError::IoError(e),
    })
}

/// Picks the password given on the command line or asks for one
pub fn resolve_password(
    password: Option<String>,
    ask: bool,
    confirm: bool,
) -> CliResult<Option<String>> {
    match password {
        Some(password) => Ok(Some(password)),
        None if ask => ask_for_password(confirm).map(Some),
        None => Ok(None),
    }
}
