pub mod codec_options;
mod frame;
mod types;
pub mod video;

use std::path::Path;

pub use codec_options::{Algorithm, CodecOptions, EdgeMode};
pub use frame::{Channel, Frame, Plane, CHANNELS};
pub use types::*;
pub use video::{FrameDirectory, FrameDirectoryWriter, FrameSink, FrameSource};

pub trait Persist {
    fn save_as(&mut self, _: &Path) -> crate::Result<()>;
}
