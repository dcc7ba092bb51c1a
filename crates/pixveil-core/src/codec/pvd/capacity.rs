use super::pair::recovered_difference;
use crate::cursor::Cursor;
use crate::edge::EdgeMask;
use crate::media::{Channel, Plane, CHANNELS};

/// Difference ranges `[lower, next lower)` and the bits a pair in that range carries
const RANGES: [(u8, u8); 6] = [(0, 2), (8, 3), (16, 4), (32, 5), (64, 6), (128, 7)];

/// Bits a pair with the given absolute difference can carry, before any ceiling
pub fn range_capacity(difference: u8) -> u8 {
    RANGES
        .iter()
        .rev()
        .find(|(lower, _)| difference >= *lower)
        .map_or(2, |(_, capacity)| *capacity)
}

/// Lowest difference of the range holding `capacity` bits
pub fn lower_bound(capacity: u8) -> u8 {
    RANGES
        .iter()
        .find(|(_, bits)| *bits == capacity)
        .map_or(0, |(lower, _)| *lower)
}

/// Most bits a channel may carry per pair
pub fn ceiling(channel: Channel) -> u8 {
    match channel {
        Channel::Blue => 7,
        Channel::Green => 3,
        Channel::Red => 5,
    }
}

/// Range capacity of `difference`, or 0 if it exceeds the ceiling of `channel`
pub fn channel_capacity(channel: Channel, difference: u8) -> u8 {
    let capacity = range_capacity(difference);
    if capacity > ceiling(channel) {
        0
    } else {
        capacity
    }
}

/// Per channel bit capacity of every pixel pair `(2i, 2i + 1)` of a frame.
///
/// When edge gated, green holds the continuation flag of a pair instead of a capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityTable {
    pairs_per_row: usize,
    gated: bool,
    cells: [Vec<u8>; CHANNELS],
}

impl CapacityTable {
    /// The table as seen by the encoder on an untouched frame.
    ///
    /// With `gated` a pair is eligible only if both pixels are edges in `mask`.
    pub fn for_embedding(planes: &[Plane; CHANNELS], gated: bool, mask: Option<&EdgeMask>) -> Self {
        Self::build(planes, gated, |row, column| {
            let eligible = !gated
                || mask.is_none_or(|mask| {
                    mask.is_edge(row, column) && mask.is_edge(row, column + 1)
                });
            let mut cells = [0u8; CHANNELS];
            if !eligible {
                return cells;
            }
            for channel in Channel::ALL {
                let (first, second) = planes[channel.index()].pair(row, column);
                cells[channel.index()] = channel_capacity(channel, first.abs_diff(second));
            }
            if gated {
                let carries = cells[Channel::Blue.index()] != 0 || cells[Channel::Red.index()] != 0;
                cells[Channel::Green.index()] = u8::from(carries);
            }
            cells
        })
    }

    /// The table recovered from a carrier, with the parity bit of every pair undone
    pub fn for_extraction(planes: &[Plane; CHANNELS], gated: bool) -> Self {
        Self::build(planes, gated, |row, column| {
            let mut cells = [0u8; CHANNELS];
            if gated {
                let flag = planes[Channel::Green.index()].get(row, column) & 1;
                if flag == 0 {
                    return cells;
                }
                cells[Channel::Green.index()] = flag;
            }
            for channel in Channel::ALL {
                if gated && channel == Channel::Green {
                    continue;
                }
                let pair = planes[channel.index()].pair(row, column);
                cells[channel.index()] = channel_capacity(channel, recovered_difference(pair));
            }
            cells
        })
    }

    fn build<F>(planes: &[Plane; CHANNELS], gated: bool, mut cell: F) -> Self
    where
        F: FnMut(usize, usize) -> [u8; CHANNELS],
    {
        let (width, height) = (planes[0].width(), planes[0].height());
        let pairs_per_row = width / 2;
        let mut cells: [Vec<u8>; CHANNELS] =
            std::array::from_fn(|_| Vec::with_capacity(pairs_per_row * height));

        for row in 0..height {
            for pair in 0..pairs_per_row {
                let values = cell(row, pair * 2);
                for (channel, value) in values.into_iter().enumerate() {
                    cells[channel].push(value);
                }
            }
        }

        Self {
            pairs_per_row,
            gated,
            cells,
        }
    }

    /// Value for the pair starting at pixel `column`, which must be even
    pub fn get(&self, channel: Channel, row: usize, column: usize) -> u8 {
        self.cells[channel.index()][row * self.pairs_per_row + column / 2]
    }

    /// Bits carried by all pairs at or after `start`, a position in the pair view
    pub fn total_bits_from(&self, start: Cursor) -> u64 {
        let pairs = self.cells[0].len();
        let first = (start.row * self.pairs_per_row + start.column / 2).min(pairs);

        Channel::ALL
            .iter()
            .filter(|channel| !(self.gated && **channel == Channel::Green))
            .map(|channel| {
                self.cells[channel.index()][first..]
                    .iter()
                    .map(|bits| u64::from(*bits))
                    .sum::<u64>()
            })
            .sum()
    }
}
