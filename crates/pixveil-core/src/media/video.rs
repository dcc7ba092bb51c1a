//! Videos as ordered sequences of decoded frames.
//!
//! On disk a video is a directory of `*.png` frames, taken in file name order.

use std::collections::VecDeque;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageError, ImageFormat};
use log::{debug, error, warn};

use super::Frame;
use crate::error::StegoError;
use crate::result::Result;

pub trait FrameSource {
    /// Frames still to be delivered, if known
    fn remaining_frames(&self) -> Option<usize>;

    /// The next frame, `None` once the source is drained
    fn next_frame(&mut self) -> Result<Option<Frame>>;
}

pub trait FrameSink {
    fn write_frame(&mut self, frame: &Frame) -> Result<()>;
}

impl FrameSource for VecDeque<Frame> {
    fn remaining_frames(&self) -> Option<usize> {
        Some(self.len())
    }

    fn next_frame(&mut self) -> Result<Option<Frame>> {
        Ok(self.pop_front())
    }
}

impl FrameSink for Vec<Frame> {
    fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        self.push(frame.clone());
        Ok(())
    }
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("png"))
        .unwrap_or(false)
}

/// Reads the `*.png` frames of a directory in lexicographic order
#[derive(Debug)]
pub struct FrameDirectory {
    frames: Vec<PathBuf>,
    next: usize,
}

impl FrameDirectory {
    /// Fails with `VideoOpenFailed` if the directory cannot be read or holds no frames
    pub fn open(dir: &Path) -> Result<Self> {
        let entries = fs::read_dir(dir).map_err(|e| {
            error!("Cannot read frame directory {dir:?}: {e}");
            StegoError::VideoOpenFailed(dir.to_path_buf())
        })?;

        let mut frames: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.is_file() && is_png(path))
            .collect();
        frames.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        if frames.is_empty() {
            error!("Frame directory {dir:?} contains no png frames");
            return Err(StegoError::VideoOpenFailed(dir.to_path_buf()));
        }
        debug!("opened {} frames in {dir:?}", frames.len());

        Ok(Self { frames, next: 0 })
    }

    /// File names of all frames, for writing a modified copy under the same names
    pub fn file_names(&self) -> Vec<OsString> {
        self.frames
            .iter()
            .filter_map(|path| path.file_name().map(|name| name.to_os_string()))
            .collect()
    }
}

impl FrameSource for FrameDirectory {
    fn remaining_frames(&self) -> Option<usize> {
        Some(self.frames.len() - self.next)
    }

    fn next_frame(&mut self) -> Result<Option<Frame>> {
        let Some(path) = self.frames.get(self.next) else {
            return Ok(None);
        };
        let image = image::open(path).map_err(|e| {
            error!("Error decoding frame {path:?}: {e}");
            StegoError::InvalidMedia(format!("frame {path:?}: {e}"))
        })?;
        self.next += 1;

        Ok(Some(Frame::from_rgb_image(&image.to_rgb8())))
    }
}

/// Writes frames as PNG files into a directory
#[derive(Debug)]
pub struct FrameDirectoryWriter {
    dir: PathBuf,
    names: Vec<OsString>,
    frames_written: usize,
    created: Vec<PathBuf>,
    created_dir: bool,
}

impl FrameDirectoryWriter {
    /// Frames are named after `names` in order, frames beyond get a numbered name
    pub fn create(dir: &Path, names: Vec<OsString>) -> Result<Self> {
        let created_dir = !dir.exists();
        fs::create_dir_all(dir).map_err(|e| {
            error!("Cannot create output directory {dir:?}: {e}");
            StegoError::VideoReencodingFailed {
                path: dir.to_path_buf(),
                source: ImageError::IoError(e),
            }
        })?;

        Ok(Self {
            dir: dir.to_path_buf(),
            names,
            frames_written: 0,
            created: Vec::new(),
            created_dir,
        })
    }

    /// Removes the frame files this writer created, and the directory if it was created by
    /// [`FrameDirectoryWriter::create`]. Files that existed before are left alone.
    pub fn discard(self) {
        for path in &self.created {
            if let Err(e) = fs::remove_file(path) {
                warn!("Cannot remove partially written frame {path:?}: {e}");
            }
        }
        if self.created_dir {
            if let Err(e) = fs::remove_dir(&self.dir) {
                warn!("Cannot remove output directory {:?}: {e}", self.dir);
            }
        }
    }
}

impl FrameSink for FrameDirectoryWriter {
    fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        let index = self.frames_written;
        let path = match self.names.get(index) {
            Some(name) => self.dir.join(name),
            None => self.dir.join(format!("frame-{index:06}.png")),
        };
        let existed = path.exists();

        frame
            .to_rgb_image()
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|source| {
                error!("Error writing frame {path:?}: {source}");
                StegoError::VideoReencodingFailed {
                    path: path.clone(),
                    source,
                }
            })?;
        self.frames_written += 1;
        if !existed {
            self.created.push(path);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn write_frames(dir: &Path, names: &[&str]) {
        for (i, name) in names.iter().enumerate() {
            Frame::from_fn(4, 4, |_, _| [i as u8 * 10, 0, 0])
                .to_rgb_image()
                .save_with_format(dir.join(name), ImageFormat::Png)
                .unwrap();
        }
    }

    #[test]
    fn should_read_frames_in_file_name_order() {
        let dir = tempdir().unwrap();
        let names = ["frame-002.png", "frame-000.png", "frame-001.png"];
        write_frames(dir.path(), &names);
        fs::write(dir.path().join("notes.txt"), b"not a frame").unwrap();

        let mut frames = FrameDirectory::open(dir.path()).unwrap();

        assert_eq!(frames.remaining_frames(), Some(3));
        let first = frames.next_frame().unwrap().unwrap();
        assert_eq!(first.pixel(0, 0), [10, 0, 0]);
        assert_eq!(frames.file_names()[0], OsString::from("frame-000.png"));
        assert_eq!(frames.remaining_frames(), Some(2));
    }

    #[test]
    fn should_fail_on_missing_or_empty_directories() {
        let dir = tempdir().unwrap();

        assert!(matches!(
            FrameDirectory::open(dir.path()),
            Err(StegoError::VideoOpenFailed(_))
        ));
        assert!(matches!(
            FrameDirectory::open(&dir.path().join("nope")),
            Err(StegoError::VideoOpenFailed(_))
        ));
    }

    #[test]
    fn should_write_frames_under_their_names_and_discard_them() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        let mut writer =
            FrameDirectoryWriter::create(&out, vec![OsString::from("a.png")]).unwrap();

        writer.write_frame(&Frame::new(2, 2)).unwrap();
        writer.write_frame(&Frame::new(2, 2)).unwrap();

        assert!(out.join("a.png").is_file());
        assert!(out.join("frame-000001.png").is_file());

        writer.discard();
        assert!(!out.exists());
    }

    #[test]
    fn should_only_discard_frames_it_created() {
        let dir = tempdir().unwrap();
        write_frames(dir.path(), &["kept.png"]);
        let mut writer = FrameDirectoryWriter::create(
            dir.path(),
            vec![OsString::from("kept.png"), OsString::from("new.png")],
        )
        .unwrap();

        writer.write_frame(&Frame::new(2, 2)).unwrap();
        writer.write_frame(&Frame::new(2, 2)).unwrap();
        writer.discard();

        assert!(dir.path().join("kept.png").is_file());
        assert!(!dir.path().join("new.png").exists());
        assert!(dir.path().is_dir());
    }
}
