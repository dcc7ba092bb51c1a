use std::path::{Path, PathBuf};

use log::info;

use crate::media::{FrameSource, Media};
use crate::{CodecOptions, StegoEngine, StegoError};

pub fn prepare() -> CapacityApi {
    CapacityApi::default()
}

/// Estimates how many bytes of file name and content a carrier takes
#[derive(Default, Debug)]
pub struct CapacityApi {
    image: Option<PathBuf>,
    options: CodecOptions,
}

impl CapacityApi {
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    /// For frame directories the first frame's capacity is taken for every frame
    pub fn execute(self) -> Result<u64, StegoError> {
        let Some(image) = self.image else {
            return Err(StegoError::CarrierNotSet);
        };

        let capacity = match Media::from_file(&image)? {
            Media::Image(frame) => StegoEngine::capacity(&frame, self.options),
            Media::Frames(mut frames) => {
                let count = frames.remaining_frames().unwrap_or(1) as u64;
                match frames.next_frame()? {
                    Some(first) => StegoEngine::capacity(&first, self.options) * count,
                    None => 0,
                }
            }
        };
        info!(
            "{image:?} holds {capacity} bytes with {} and edge mode {}",
            self.options.algorithm, self.options.edge_mode
        );

        Ok(capacity)
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use tempfile::tempdir;

    use crate::media::{Algorithm, EdgeMode};
    use crate::CodecOptions;

    #[test]
    fn should_report_sequential_lsb_capacity() {
        let temp_dir = tempdir().unwrap();
        let carrier = temp_dir.path().join("carrier.png");
        RgbImage::from_fn(20, 10, |x, _| Rgb([x as u8, 0, 0]))
            .save(&carrier)
            .unwrap();

        let capacity = super::prepare().with_image(&carrier).execute().unwrap();

        // (200 pixels - 10 header pixels) * 3 bits
        assert_eq!(capacity, 190 * 3 / 8);

        let gated = super::prepare()
            .with_image(&carrier)
            .with_options(CodecOptions::new(Algorithm::Lsb, EdgeMode::Canny))
            .execute()
            .unwrap();
        assert!(gated <= capacity);
    }
}
