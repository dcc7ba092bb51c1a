//! Pixel value differencing.
//!
//! Every channel plane is walked in horizontal pairs `(2i, 2i + 1)`. The difference of a pair
//! selects how many bits it carries, the value is encoded by moving the difference within
//! its range. With an edge mask the green channel turns into a per pair flag telling the
//! decoder whether blue and red carry data.

mod capacity;
mod pair;

use log::trace;

pub use capacity::{ceiling, channel_capacity, lower_bound, range_capacity, CapacityTable};
pub use pair::{
    apply_parity, clamp_pair, embed_overhead, embed_value, extract_value, recovered_capacity,
    recovered_difference,
};

use super::{FrameCodec, Progress};
use crate::bits::{BitSink, BitSource};
use crate::cursor::Cursor;
use crate::edge::EdgeMask;
use crate::media::{Channel, Frame};
use crate::result::Result;

const UNGATED_CHANNELS: &[Channel] = &[Channel::Blue, Channel::Green, Channel::Red];
const GATED_CHANNELS: &[Channel] = &[Channel::Blue, Channel::Red];

#[derive(Debug, Clone, Copy, Default)]
pub struct PvdCodec {
    gated: bool,
}

impl PvdCodec {
    pub fn new(gated: bool) -> Self {
        Self { gated }
    }

    fn data_channels(&self) -> &'static [Channel] {
        if self.gated {
            GATED_CHANNELS
        } else {
            UNGATED_CHANNELS
        }
    }
}

impl FrameCodec for PvdCodec {
    fn capacity_bits(&self, frame: &Frame, mask: Option<&EdgeMask>, start: Cursor) -> u64 {
        CapacityTable::for_embedding(&frame.split_planes(), self.gated, mask)
            .total_bits_from(start.to_pair_view())
    }

    /// Leaves `cursor` in the pair view
    fn embed(
        &self,
        frame: &mut Frame,
        mask: Option<&EdgeMask>,
        cursor: &mut Cursor,
        source: &mut BitSource<'_>,
    ) -> Result<Progress> {
        let (width, height) = (frame.width(), frame.height());
        let mut planes = frame.split_planes();
        let table = CapacityTable::for_embedding(&planes, self.gated, mask);
        *cursor = cursor.to_pair_view();

        'pairs: while cursor.row < height && !source.is_exhausted() {
            if cursor.column + 1 >= width {
                cursor.next_row();
                continue;
            }
            let (row, column) = (cursor.row, cursor.column);

            if self.gated {
                let flag = table.get(Channel::Green, row, column);
                let green = &mut planes[Channel::Green.index()];
                let (first, second) = green.pair(row, column);
                green.set_pair(row, column, ((first & !1) | flag, second));
            }

            for channel in self.data_channels() {
                if source.is_exhausted() {
                    break 'pairs;
                }
                let plane = &mut planes[channel.index()];
                let pair = plane.pair(row, column);
                let capacity = table.get(*channel, row, column);
                let embedded = if capacity == 0 {
                    embed_overhead(pair)
                } else {
                    embed_value(pair, source.take_value(capacity)?, capacity)
                };
                plane.set_pair(row, column, embedded);
            }
            cursor.advance(2, width);
        }

        frame.merge_planes(&planes);
        trace!("pvd embedding stopped at {cursor:?}");

        Ok(if source.is_exhausted() {
            Progress::Complete
        } else {
            Progress::FrameFull
        })
    }

    /// Leaves `cursor` in the pair view
    fn extract(
        &self,
        frame: &Frame,
        _mask: Option<&EdgeMask>,
        cursor: &mut Cursor,
        sink: &mut BitSink,
    ) -> Result<Progress> {
        let (width, height) = (frame.width(), frame.height());
        let planes = frame.split_planes();
        let table = CapacityTable::for_extraction(&planes, self.gated);
        *cursor = cursor.to_pair_view();

        'pairs: while cursor.row < height && !sink.is_full() {
            if cursor.column + 1 >= width {
                cursor.next_row();
                continue;
            }
            let (row, column) = (cursor.row, cursor.column);

            if self.gated && table.get(Channel::Green, row, column) == 0 {
                cursor.advance(2, width);
                continue;
            }

            for channel in self.data_channels() {
                if sink.is_full() {
                    break 'pairs;
                }
                let capacity = table.get(*channel, row, column);
                if capacity == 0 {
                    continue;
                }
                let value = extract_value(planes[channel.index()].pair(row, column), capacity);
                sink.push_value(value, capacity)?;
            }
            cursor.advance(2, width);
        }

        Ok(if sink.is_full() {
            Progress::Complete
        } else {
            Progress::FrameFull
        })
    }
}
