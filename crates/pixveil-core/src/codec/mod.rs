//! Substitution codecs writing the file name and payload bits into a frame.

mod lsb;
pub mod pvd;

use enum_dispatch::enum_dispatch;

use crate::bits::{BitSink, BitSource};
use crate::cursor::Cursor;
use crate::edge::EdgeMask;
use crate::media::{Algorithm, EdgeMode, Frame};
use crate::result::Result;

pub use lsb::LsbCodec;
pub use pvd::PvdCodec;

/// How far a codec got with one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// All bits were written or read
    Complete,
    /// The frame ended while bits were still pending
    FrameFull,
}

#[enum_dispatch]
pub trait FrameCodec {
    /// Bits that fit into `frame` when starting at `start`, which is a channel byte position
    fn capacity_bits(&self, frame: &Frame, mask: Option<&EdgeMask>, start: Cursor) -> u64;

    /// Writes bits from `source` starting at `cursor`, leaves `cursor` behind the last touched position
    fn embed(
        &self,
        frame: &mut Frame,
        mask: Option<&EdgeMask>,
        cursor: &mut Cursor,
        source: &mut BitSource<'_>,
    ) -> Result<Progress>;

    /// Reads bits into `sink` with the same traversal as [`FrameCodec::embed`]
    fn extract(
        &self,
        frame: &Frame,
        mask: Option<&EdgeMask>,
        cursor: &mut Cursor,
        sink: &mut BitSink,
    ) -> Result<Progress>;
}

#[enum_dispatch(FrameCodec)]
#[derive(Debug, Clone, Copy)]
pub enum Codec {
    LsbCodec,
    PvdCodec,
}

impl Codec {
    pub fn new(algorithm: Algorithm, edge_mode: EdgeMode) -> Self {
        match algorithm {
            Algorithm::Lsb => LsbCodec.into(),
            Algorithm::Pvd => PvdCodec::new(edge_mode.is_gated()).into(),
        }
    }
}
