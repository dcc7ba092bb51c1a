use super::{FrameCodec, Progress};
use crate::bits::{BitSink, BitSource};
use crate::cursor::Cursor;
use crate::edge::EdgeMask;
use crate::media::{Frame, CHANNELS};
use crate::result::Result;

/// One bit in bit 0 of every eligible channel byte, walking the frame row by row.
///
/// With an edge mask a channel byte is eligible only if its pixel is an edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct LsbCodec;

fn is_eligible(mask: Option<&EdgeMask>, cursor: &Cursor) -> bool {
    mask.is_none_or(|mask| mask.is_edge(cursor.row, cursor.column / CHANNELS))
}

impl FrameCodec for LsbCodec {
    fn capacity_bits(&self, frame: &Frame, mask: Option<&EdgeMask>, start: Cursor) -> u64 {
        let total = frame.samples().len();
        let start = start.index(frame.row_stride());
        if start >= total {
            return 0;
        }

        let bytes = match mask {
            None => total - start,
            Some(mask) => {
                let first_whole_pixel = start.div_ceil(CHANNELS);
                let partial = first_whole_pixel * CHANNELS - start;
                let partial = if partial > 0 && mask.values()[start / CHANNELS] != 0 {
                    partial
                } else {
                    0
                };
                partial + mask.count_edges_from(first_whole_pixel) * CHANNELS
            }
        };
        bytes as u64
    }

    fn embed(
        &self,
        frame: &mut Frame,
        mask: Option<&EdgeMask>,
        cursor: &mut Cursor,
        source: &mut BitSource<'_>,
    ) -> Result<Progress> {
        let (stride, height) = (frame.row_stride(), frame.height());

        while !source.is_exhausted() {
            if cursor.row >= height {
                return Ok(Progress::FrameFull);
            }
            if is_eligible(mask, cursor) {
                let Some(bit) = source.next_bit()? else {
                    break;
                };
                let sample = frame.sample_mut(cursor.row, cursor.column);
                *sample = (*sample & !1) | u8::from(bit);
            }
            cursor.advance(1, stride);
        }

        Ok(Progress::Complete)
    }

    fn extract(
        &self,
        frame: &Frame,
        mask: Option<&EdgeMask>,
        cursor: &mut Cursor,
        sink: &mut BitSink,
    ) -> Result<Progress> {
        let (stride, height) = (frame.row_stride(), frame.height());

        while !sink.is_full() {
            if cursor.row >= height {
                return Ok(Progress::FrameFull);
            }
            if is_eligible(mask, cursor) {
                sink.push_bit(frame.sample(cursor.row, cursor.column) & 1 == 1)?;
            }
            cursor.advance(1, stride);
        }

        Ok(Progress::Complete)
    }
}
