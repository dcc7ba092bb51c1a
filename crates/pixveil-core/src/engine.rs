//! Drives header, file name and payload through one image or a sequence of frames.

use std::path::Path;

use log::{debug, info};

use crate::bits::{BitSink, BitSource};
use crate::codec::{Codec, FrameCodec, Progress};
use crate::cursor::Cursor;
use crate::edge::{EdgeDetector, EdgeMask};
use crate::error::StegoError;
use crate::header::{Header, HeaderCodec, HEADER_BYTES};
use crate::media::{Algorithm, CodecOptions, Frame, FrameSink, FrameSource};
use crate::result::Result;

/// What was recovered from a carrier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unveiled {
    pub header: Header,
    /// Raw file name bytes as they were hidden
    pub file_name: Vec<u8>,
    pub payload: Vec<u8>,
}

impl Unveiled {
    /// The last path component of the hidden file name, `None` if there is none
    pub fn safe_file_name(&self) -> Option<String> {
        let name = String::from_utf8_lossy(&self.file_name);
        Path::new(name.as_ref())
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.is_empty())
    }
}

/// Position right behind the header of a first frame
fn header_end(frame: &Frame) -> Cursor {
    let stride = frame.row_stride().max(1);
    Cursor::new(HEADER_BYTES / stride, HEADER_BYTES % stride)
}

pub struct StegoEngine {
    options: CodecOptions,
    encrypted: bool,
    password_supplied: bool,
    detector: EdgeDetector,
    cursor: Cursor,
}

impl StegoEngine {
    /// An engine for hiding, `encrypted` is recorded in the header only
    pub fn new(options: CodecOptions, encrypted: bool) -> Self {
        Self {
            options,
            encrypted,
            password_supplied: false,
            detector: EdgeDetector::new(),
            cursor: Cursor::origin(),
        }
    }

    /// An engine for unveiling, the codec options are taken from the header
    pub fn decoder(password_supplied: bool) -> Self {
        Self {
            options: CodecOptions::default(),
            encrypted: false,
            password_supplied,
            detector: EdgeDetector::new(),
            cursor: Cursor::origin(),
        }
    }

    pub fn options(&self) -> CodecOptions {
        self.options
    }

    /// Mask of the frame processed last, if an edge mode is active
    pub fn edge_mask(&self) -> Option<&EdgeMask> {
        self.detector.mask()
    }

    /// Bytes of file name and payload that fit into a first frame, behind the header
    pub fn capacity(frame: &Frame, options: CodecOptions) -> u64 {
        if frame.samples().len() < HEADER_BYTES {
            return 0;
        }
        Self::capacity_from(frame, options, header_end(frame))
    }

    /// Bytes that fit into a follow-up frame of a video, which carries no header
    pub fn frame_capacity(frame: &Frame, options: CodecOptions) -> u64 {
        Self::capacity_from(frame, options, Cursor::origin())
    }

    fn capacity_from(frame: &Frame, options: CodecOptions, start: Cursor) -> u64 {
        let mut detector = EdgeDetector::new();
        let mask = detector.detect(frame, options.edge_mode);
        Codec::new(options.algorithm, options.edge_mode).capacity_bits(frame, mask, start) / 8
    }

    /// Hides `payload` under `file_name` in `frame`.
    ///
    /// The frame is left untouched if the data does not fit.
    pub fn hide_in_image(
        &mut self,
        frame: &mut Frame,
        file_name: &[u8],
        payload: &[u8],
    ) -> Result<()> {
        let header = Header::new(
            self.options,
            self.encrypted,
            file_name.len(),
            payload.len() as u64,
        )?;
        let codec = Codec::new(header.algorithm, header.edge_mode);

        let available = self.first_frame_capacity(frame, &codec);
        ensure_fits(header.hidden_len(), available)?;

        HeaderCodec::encode(frame, &header, &mut self.cursor)?;
        let mut source = BitSource::new(file_name, payload);
        match codec.embed(frame, self.detector.mask(), &mut self.cursor, &mut source)? {
            Progress::Complete => {
                info!(
                    "hid {} bytes with {} and edge mode {}",
                    header.hidden_len(),
                    header.algorithm,
                    header.edge_mode
                );
                Ok(())
            }
            Progress::FrameFull => Err(StegoError::OutOfRoom),
        }
    }

    /// Recovers file name and payload from `frame`
    pub fn unveil_from_image(&mut self, frame: &Frame) -> Result<Unveiled> {
        let (header, codec, mut sink) = self.begin_unveil(frame)?;

        match self.extract_frame(&codec, &header, frame, &mut sink)? {
            Progress::Complete => Ok(finish_unveil(header, sink)),
            Progress::FrameFull => Err(StegoError::OutOfRoom),
        }
    }

    /// Hides `payload` across the frames of `source`, every frame ends up in `sink`.
    ///
    /// Running out of frames is only noticed at the end, then `FileTooLarge` is returned
    /// and whatever `sink` received has to be discarded.
    pub fn hide_in_frames<S, W>(
        &mut self,
        source: &mut S,
        sink: &mut W,
        file_name: &[u8],
        payload: &[u8],
    ) -> Result<()>
    where
        S: FrameSource + ?Sized,
        W: FrameSink + ?Sized,
    {
        let frame_count = source.remaining_frames();
        let Some(mut frame) = source.next_frame()? else {
            return Err(StegoError::InvalidMedia("no frames to hide in".into()));
        };
        let header = Header::new(
            self.options,
            self.encrypted,
            file_name.len(),
            payload.len() as u64,
        )?;
        let codec = Codec::new(header.algorithm, header.edge_mode);

        let first_capacity = self.first_frame_capacity(&frame, &codec);
        let estimate = first_capacity * frame_count.unwrap_or(1) as u64;
        ensure_fits(header.hidden_len(), estimate)?;

        HeaderCodec::encode(&mut frame, &header, &mut self.cursor)?;
        let mut bits = BitSource::new(file_name, payload);
        let mut frames = 1usize;
        loop {
            if frames > 1 {
                self.cursor = Cursor::origin();
                self.detector.detect(&frame, header.edge_mode);
            }
            let mask = self.detector.mask();
            let progress = codec.embed(&mut frame, mask, &mut self.cursor, &mut bits)?;
            sink.write_frame(&frame)?;
            let pending = bits.remaining_bits();
            debug!("frame {frames} done, {pending} bits pending");
            if progress == Progress::Complete {
                break;
            }

            frame = match source.next_frame()? {
                Some(frame) => frame,
                None => {
                    let written = header.hidden_len() * 8 - bits.remaining_bits();
                    return Err(StegoError::FileTooLarge {
                        needed: header.hidden_len(),
                        available: written / 8,
                    });
                }
            };
            frames += 1;
        }

        let mut passed = 0usize;
        while let Some(frame) = source.next_frame()? {
            sink.write_frame(&frame)?;
            passed += 1;
        }
        info!(
            "hid {} bytes in {frames} frames, {passed} frames passed through",
            header.hidden_len()
        );
        Ok(())
    }

    /// Recovers file name and payload from the frames of `source`
    pub fn unveil_from_frames<S>(&mut self, source: &mut S) -> Result<Unveiled>
    where
        S: FrameSource + ?Sized,
    {
        let Some(mut frame) = source.next_frame()? else {
            return Err(StegoError::InvalidMedia("no frames to unveil".into()));
        };
        let (header, codec, mut sink) = self.begin_unveil(&frame)?;

        while self.extract_frame(&codec, &header, &frame, &mut sink)? == Progress::FrameFull {
            frame = source.next_frame()?.ok_or_else(|| {
                StegoError::InvalidMedia(format!(
                    "frames ended with {} bits still pending",
                    sink.remaining_bits()
                ))
            })?;
            self.cursor = Cursor::origin();
        }

        Ok(finish_unveil(header, sink))
    }

    /// Capacity behind the header in bits, leaves the frame's mask in the detector
    fn first_frame_capacity(&mut self, frame: &Frame, codec: &Codec) -> u64 {
        if frame.samples().len() < HEADER_BYTES {
            return 0;
        }
        let mask = self.detector.detect(frame, self.options.edge_mode);
        codec.capacity_bits(frame, mask, header_end(frame)) / 8
    }

    fn begin_unveil(&mut self, frame: &Frame) -> Result<(Header, Codec, BitSink)> {
        let header = HeaderCodec::decode(frame, &mut self.cursor, self.password_supplied)?;
        self.options = header.options();
        let codec = Codec::new(header.algorithm, header.edge_mode);
        Ok((header, codec, BitSink::new(header.hidden_len())))
    }

    fn extract_frame(
        &mut self,
        codec: &Codec,
        header: &Header,
        frame: &Frame,
        sink: &mut BitSink,
    ) -> Result<Progress> {
        // PVD carries its own per pair flag, only LSB needs the mask on the way back
        let mask = match header.algorithm {
            Algorithm::Lsb => self.detector.detect(frame, header.edge_mode),
            Algorithm::Pvd => None,
        };
        codec.extract(frame, mask, &mut self.cursor, sink)
    }
}

fn ensure_fits(needed: u64, available: u64) -> Result<()> {
    if needed > available {
        return Err(StegoError::FileTooLarge { needed, available });
    }
    Ok(())
}

fn finish_unveil(header: Header, sink: BitSink) -> Unveiled {
    let mut payload = sink.into_bytes();
    let file_name: Vec<u8> = payload.drain(..header.file_name_length as usize).collect();
    debug!(
        "unveiled {} name bytes and {} payload bytes",
        file_name.len(),
        payload.len()
    );
    Unveiled {
        header,
        file_name,
        payload,
    }
}
