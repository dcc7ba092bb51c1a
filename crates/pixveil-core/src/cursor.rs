use crate::error::StegoError;
use crate::media::CHANNELS;
use crate::result::Result;

/// A position in a frame, shared by all phases of an encode or decode run.
///
/// The meaning of `column` depends on the view: LSB addresses single channel bytes
/// (a row is `3 * width` long), PVD addresses the first pixel of a pair (a row is `width` long).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub row: usize,
    pub column: usize,
}

impl Cursor {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    pub fn origin() -> Self {
        Self::default()
    }

    /// Moves `step` columns forward, continuing on the next row when `row_width` is crossed
    pub fn advance(&mut self, step: usize, row_width: usize) {
        self.column += step;
        if self.column >= row_width {
            self.next_row();
        }
    }

    pub fn next_row(&mut self) {
        self.row += 1;
        self.column = 0;
    }

    /// Fails with `OutOfRoom` once the cursor went past the last row
    pub fn ensure_within(&self, height: usize) -> Result<()> {
        if self.row >= height {
            return Err(StegoError::OutOfRoom);
        }
        Ok(())
    }

    /// Converts a channel byte position into the pixel pair view.
    ///
    /// The pixel is rounded up and then aligned to the next even column.
    pub fn to_pair_view(self) -> Self {
        let pixel = self.column.div_ceil(CHANNELS);
        Self {
            row: self.row,
            column: pixel.div_ceil(2) * 2,
        }
    }

    /// Linear index in a row-major grid with rows of `row_width`
    pub fn index(&self, row_width: usize) -> usize {
        self.row * row_width + self.column
    }
}
