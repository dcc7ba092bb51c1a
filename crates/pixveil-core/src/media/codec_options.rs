use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::StegoError;

/// Substitution algorithm used for file name and payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Least significant bit substitution, one bit per channel byte
    #[default]
    Lsb,
    /// Pixel value differencing, a variable number of bits per pixel pair
    Pvd,
}

impl FromStr for Algorithm {
    type Err = StegoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lsb" => Ok(Self::Lsb),
            "pvd" => Ok(Self::Pvd),
            _ => Err(StegoError::InvalidOption(format!("unknown algorithm '{s}'"))),
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lsb => f.write_str("lsb"),
            Self::Pvd => f.write_str("pvd"),
        }
    }
}

/// Edge detector restricting where data may be hidden
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EdgeMode {
    /// Every pixel is eligible
    #[default]
    None,
    Canny,
    Sobel,
}

impl EdgeMode {
    pub fn is_gated(self) -> bool {
        self != Self::None
    }
}

impl FromStr for EdgeMode {
    type Err = StegoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "canny" => Ok(Self::Canny),
            "sobel" => Ok(Self::Sobel),
            _ => Err(StegoError::InvalidOption(format!("unknown edge mode '{s}'"))),
        }
    }
}

impl Display for EdgeMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Canny => f.write_str("canny"),
            Self::Sobel => f.write_str("sobel"),
        }
    }
}

/// Codec configuration for hiding, the decoder reads it back from the header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecOptions {
    pub algorithm: Algorithm,
    pub edge_mode: EdgeMode,
}

impl CodecOptions {
    pub const fn new(algorithm: Algorithm, edge_mode: EdgeMode) -> Self {
        Self {
            algorithm,
            edge_mode,
        }
    }

    /// Parses both options from their names, e.g. `("pvd", "canny")`
    pub fn parse(algorithm: &str, edge_mode: &str) -> crate::Result<Self> {
        Ok(Self::new(algorithm.parse()?, edge_mode.parse()?))
    }
}
