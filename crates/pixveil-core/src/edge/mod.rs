//! Edge masks restricting where data may be hidden.
//!
//! The two lowest bits of every sample are ignored, so hiding data does not change
//! the mask and the decoder recomputes exactly what the encoder saw.

mod canny;
mod sobel;

use log::debug;

use crate::media::{EdgeMode, Frame};

pub use canny::canny;
pub use sobel::{sobel, Direction, Gradient};

/// Per pixel edge strength, 0 marks a pixel as not eligible
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMask {
    width: usize,
    height: usize,
    values: Vec<u8>,
}

impl EdgeMask {
    pub fn new(width: usize, height: usize, values: Vec<u8>) -> Self {
        debug_assert_eq!(values.len(), width * height);
        Self {
            width,
            height,
            values,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn get(&self, row: usize, column: usize) -> u8 {
        self.values[row * self.width + column]
    }

    pub fn is_edge(&self, row: usize, column: usize) -> bool {
        self.get(row, column) != 0
    }

    pub fn count_edges(&self) -> usize {
        self.count_edges_from(0)
    }

    /// Edge pixels at or after the row-major pixel index `start`
    pub fn count_edges_from(&self, start: usize) -> usize {
        self.values
            .iter()
            .skip(start)
            .filter(|value| **value != 0)
            .count()
    }
}

/// Computes edge masks and keeps the last one around
#[derive(Debug, Default)]
pub struct EdgeDetector {
    mask: Option<EdgeMask>,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the detector selected by `mode`, `EdgeMode::None` clears the mask
    pub fn detect(&mut self, frame: &Frame, mode: EdgeMode) -> Option<&EdgeMask> {
        self.mask = match mode {
            EdgeMode::None => None,
            EdgeMode::Sobel => Some(sobel(frame).magnitudes),
            EdgeMode::Canny => Some(canny(frame)),
        };
        if let Some(mask) = &self.mask {
            debug!(
                "{mode} mask of {}x{} has {} edge pixels",
                mask.width,
                mask.height,
                mask.count_edges()
            );
        }
        self.mask.as_ref()
    }

    /// The mask of the last [`EdgeDetector::detect`] call
    pub fn mask(&self) -> Option<&EdgeMask> {
        self.mask.as_ref()
    }
}
