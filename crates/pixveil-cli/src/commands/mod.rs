pub mod capacity;
pub mod hide;
pub mod unveil;

use clap::Args;
use pixveil_core::CodecOptions;

use crate::cli::{AlgorithmArg, EdgeModeArg};

/// Codec flags shared by `hide` and `capacity`
#[derive(Args, Debug, Clone, Copy)]
pub struct CodecArgs {
    /// Embedding algorithm
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Lsb)]
    pub algorithm: AlgorithmArg,

    /// Only embed in edge pixels found by this detector
    #[arg(long, value_enum, default_value_t = EdgeModeArg::None)]
    pub edges: EdgeModeArg,
}

impl From<CodecArgs> for CodecOptions {
    fn from(args: CodecArgs) -> Self {
        CodecOptions::new(args.algorithm.into(), args.edges.into())
    }
}
