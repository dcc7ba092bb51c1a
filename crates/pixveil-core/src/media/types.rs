use std::path::Path;

use image::{ImageError, ImageFormat};
use log::{error, warn};

use crate::error::StegoError;
use crate::result::Result;

use super::{Frame, FrameDirectory, Persist};

/// a carrier for steganography
#[derive(Debug)]
pub enum Media {
    /// A single PNG or JPEG image
    Image(Frame),
    /// A directory of PNG frames
    Frames(FrameDirectory),
}

impl Media {
    /// Opens an image file or a directory of frames
    pub fn from_file(f: &Path) -> Result<Self> {
        if !f.exists() {
            error!("Carrier {f:?} does not exist");
            return Err(StegoError::ImageNotFound(f.to_path_buf()));
        }
        if f.is_dir() {
            return Ok(Self::Frames(FrameDirectory::open(f)?));
        }

        let image = image::open(f).map_err(|e| {
            error!("Error decoding carrier {f:?}: {e}");
            StegoError::InvalidMedia(e.to_string())
        })?;
        Ok(Self::Image(Frame::from_rgb_image(&image.to_rgb8())))
    }
}

impl Persist for Frame {
    /// Always writes PNG, other formats would destroy the hidden bits
    fn save_as(&mut self, file: &Path) -> Result<()> {
        if crate::api::is_jpeg_extension(file) {
            warn!("Output {file:?} is named like a JPEG but is written as PNG");
        }
        self.to_rgb_image()
            .save_with_format(file, ImageFormat::Png)
            .map_err(|e| {
                error!("Error saving image {file:?}: {e}");
                match e {
                    ImageError::IoError(source) => StegoError::FileOpenFailed {
                        path: file.to_path_buf(),
                        source,
                    },
                    other => StegoError::ImageEncodingError(other),
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn should_tell_missing_from_broken_carriers() {
        let dir = tempdir().unwrap();
        let broken = dir.path().join("broken.png");
        fs::write(&broken, b"definitely not a png").unwrap();

        assert!(matches!(
            Media::from_file(&dir.path().join("missing.png")),
            Err(StegoError::ImageNotFound(_))
        ));
        assert!(matches!(
            Media::from_file(&broken),
            Err(StegoError::InvalidMedia(_))
        ));
    }

    #[test]
    fn should_save_and_reload_a_frame_losslessly() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("frame.png");
        let mut frame = Frame::from_fn(5, 3, |x, y| [x as u8, y as u8, (x * y) as u8 + 1]);

        frame.save_as(&file).unwrap();

        match Media::from_file(&file).unwrap() {
            Media::Image(loaded) => assert_eq!(loaded, frame),
            other => panic!("unexpected media {other:?}"),
        }
    }
}
