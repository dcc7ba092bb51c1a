//! The metadata block at the start of the first frame.
//!
//! ```text
//! byte 0      bit 0     algorithm (0 = LSB, 1 = PVD)
//! byte 1      bits 0-1  edge mode (00 none, 01 canny, 11 sobel)
//! byte 2      bit 0     encrypted
//! bytes 3-11  bits 0-1  file name length, 18 bits, lowest bits first
//! bytes 12-29 bits 0-1  file length, 36 bits, lowest bits first
//! ```

use log::{debug, warn};

use crate::bits::{from_bit_pairs, to_bit_pairs};
use crate::cursor::Cursor;
use crate::error::StegoError;
use crate::media::{Algorithm, CodecOptions, EdgeMode, Frame, CHANNELS};
use crate::result::Result;

pub const HEADER_PIXELS: usize = 10;
pub const HEADER_BYTES: usize = HEADER_PIXELS * CHANNELS;

pub const FILE_NAME_LENGTH_BITS: u32 = 18;
pub const FILE_LENGTH_BITS: u32 = 36;
pub const MAX_FILE_NAME_LENGTH: u64 = (1 << FILE_NAME_LENGTH_BITS) - 1;
pub const MAX_FILE_LENGTH: u64 = (1 << FILE_LENGTH_BITS) - 1;

const EDGE_NONE: u8 = 0b00;
const EDGE_CANNY: u8 = 0b01;
const EDGE_SOBEL: u8 = 0b11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub algorithm: Algorithm,
    pub edge_mode: EdgeMode,
    pub encrypted: bool,
    pub file_name_length: u32,
    pub file_length: u64,
}

impl Header {
    /// Fails with `FileTooLarge` if a length does not fit its field
    pub fn new(
        options: CodecOptions,
        encrypted: bool,
        file_name_length: usize,
        file_length: u64,
    ) -> Result<Self> {
        if file_name_length as u64 > MAX_FILE_NAME_LENGTH {
            return Err(StegoError::FileTooLarge {
                needed: file_name_length as u64,
                available: MAX_FILE_NAME_LENGTH,
            });
        }
        if file_length > MAX_FILE_LENGTH {
            return Err(StegoError::FileTooLarge {
                needed: file_length,
                available: MAX_FILE_LENGTH,
            });
        }

        Ok(Self {
            algorithm: options.algorithm,
            edge_mode: options.edge_mode,
            encrypted,
            file_name_length: file_name_length as u32,
            file_length,
        })
    }

    pub fn options(&self) -> CodecOptions {
        CodecOptions::new(self.algorithm, self.edge_mode)
    }

    /// Bytes following the header, file name and file together
    pub fn hidden_len(&self) -> u64 {
        u64::from(self.file_name_length) + self.file_length
    }
}

fn edge_mode_bits(edge_mode: EdgeMode) -> u8 {
    match edge_mode {
        EdgeMode::None => EDGE_NONE,
        EdgeMode::Canny => EDGE_CANNY,
        EdgeMode::Sobel => EDGE_SOBEL,
    }
}

fn edge_mode_from_bits(bits: u8) -> Option<EdgeMode> {
    match bits {
        EDGE_NONE => Some(EdgeMode::None),
        EDGE_CANNY => Some(EdgeMode::Canny),
        EDGE_SOBEL => Some(EdgeMode::Sobel),
        _ => None,
    }
}

pub struct HeaderCodec;

impl HeaderCodec {
    /// Writes `header` into the first [`HEADER_BYTES`] channel bytes, leaves `cursor` right after them
    pub fn encode(frame: &mut Frame, header: &Header, cursor: &mut Cursor) -> Result<()> {
        if frame.samples().len() < HEADER_BYTES {
            return Err(StegoError::OutOfRoom);
        }
        *cursor = Cursor::origin();

        let algorithm = u8::from(header.algorithm == Algorithm::Pvd);
        put(frame, cursor, algorithm, 0b1)?;
        put(frame, cursor, edge_mode_bits(header.edge_mode), 0b11)?;
        put(frame, cursor, u8::from(header.encrypted), 0b1)?;

        let name_length = to_bit_pairs(header.file_name_length.into(), FILE_NAME_LENGTH_BITS)?;
        let file_length = to_bit_pairs(header.file_length, FILE_LENGTH_BITS)?;
        for pair in name_length.into_iter().chain(file_length) {
            put(frame, cursor, pair, 0b11)?;
        }
        debug!("header written: {header:?}");

        Ok(())
    }

    /// Reads the header back. All fields are read before anything is validated,
    /// so `cursor` ends up behind the header even if an error is returned.
    pub fn decode(frame: &Frame, cursor: &mut Cursor, password_supplied: bool) -> Result<Header> {
        if frame.samples().len() < HEADER_BYTES {
            return Err(StegoError::OutOfRoom);
        }
        *cursor = Cursor::origin();

        let algorithm = take(frame, cursor, 0b1)?;
        let edge_mode = take(frame, cursor, 0b11)?;
        let encrypted = take(frame, cursor, 0b1)? == 1;

        let mut name_length = [0u8; FILE_NAME_LENGTH_BITS as usize / 2];
        for pair in name_length.iter_mut() {
            *pair = take(frame, cursor, 0b11)?;
        }
        let mut file_length = [0u8; FILE_LENGTH_BITS as usize / 2];
        for pair in file_length.iter_mut() {
            *pair = take(frame, cursor, 0b11)?;
        }

        let Some(edge_mode) = edge_mode_from_bits(edge_mode) else {
            warn!("header carries the unused edge mode bits {edge_mode:#04b}");
            return Err(StegoError::InvalidHeader);
        };
        if password_supplied && !encrypted {
            return Err(StegoError::DataNotEncrypted);
        }
        if encrypted && !password_supplied {
            return Err(StegoError::MissingPassword);
        }

        let header = Header {
            algorithm: if algorithm == 1 {
                Algorithm::Pvd
            } else {
                Algorithm::Lsb
            },
            edge_mode,
            encrypted,
            file_name_length: from_bit_pairs(&name_length)? as u32,
            file_length: from_bit_pairs(&file_length)?,
        };
        debug!("header read: {header:?}");

        Ok(header)
    }
}

fn put(frame: &mut Frame, cursor: &mut Cursor, value: u8, mask: u8) -> Result<()> {
    cursor.ensure_within(frame.height())?;
    let stride = frame.row_stride();
    let sample = frame.sample_mut(cursor.row, cursor.column);
    *sample = (*sample & !mask) | (value & mask);
    cursor.advance(1, stride);
    Ok(())
}

fn take(frame: &Frame, cursor: &mut Cursor, mask: u8) -> Result<u8> {
    cursor.ensure_within(frame.height())?;
    let value = frame.sample(cursor.row, cursor.column) & mask;
    cursor.advance(1, frame.row_stride());
    Ok(value)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn carrier(width: usize, height: usize) -> Frame {
        Frame::from_fn(width, height, |x, y| [(x * 7 + y) as u8, 0xff, 0x55])
    }

    fn header(options: CodecOptions, encrypted: bool) -> Header {
        Header::new(options, encrypted, 12, 16 * 1024).unwrap()
    }

    #[test]
    fn should_leave_the_cursor_behind_30_channel_bytes() {
        let mut frame = carrier(16, 4);
        let mut cursor = Cursor::origin();

        let h = header(CodecOptions::default(), false);
        HeaderCodec::encode(&mut frame, &h, &mut cursor).unwrap();

        assert_eq!(cursor, Cursor::new(0, HEADER_BYTES));
    }

    #[test]
    fn should_wrap_the_header_over_narrow_rows() {
        let mut frame = carrier(4, 3);
        let h = header(CodecOptions::new(Algorithm::Pvd, EdgeMode::Sobel), true);
        let mut cursor = Cursor::origin();

        HeaderCodec::encode(&mut frame, &h, &mut cursor).unwrap();
        assert_eq!(cursor, Cursor::new(2, 6));

        let mut cursor = Cursor::origin();
        assert_eq!(HeaderCodec::decode(&frame, &mut cursor, true).unwrap(), h);
        assert_eq!(cursor, Cursor::new(2, 6));
    }

    #[test]
    fn should_put_the_flags_into_pixel_zero() {
        let mut frame = Frame::new(10, 1);
        let h = header(CodecOptions::new(Algorithm::Pvd, EdgeMode::Sobel), true);

        HeaderCodec::encode(&mut frame, &h, &mut Cursor::origin()).unwrap();

        assert_eq!(frame.pixel(0, 0), [1, 0b11, 1]);
    }

    #[test]
    fn should_only_touch_the_two_lowest_bits() {
        let original = carrier(16, 2);
        let mut frame = original.clone();

        HeaderCodec::encode(
            &mut frame,
            &Header::new(CodecOptions::default(), false, 0, MAX_FILE_LENGTH).unwrap(),
            &mut Cursor::origin(),
        )
        .unwrap();

        for (before, after) in original.samples().iter().zip(frame.samples()) {
            assert_eq!(before & !0b11, after & !0b11);
        }
        let (before, after) = (original.samples(), frame.samples());
        assert_eq!(&before[HEADER_BYTES..], &after[HEADER_BYTES..]);
    }

    #[test]
    fn should_fail_on_frames_smaller_than_the_header() {
        let mut frame = carrier(3, 3);

        let result = HeaderCodec::encode(
            &mut frame,
            &header(CodecOptions::default(), false),
            &mut Cursor::origin(),
        );

        assert!(matches!(result, Err(StegoError::OutOfRoom)));
    }

    #[test]
    fn should_reject_lengths_exceeding_their_fields() {
        let options = CodecOptions::default();

        assert!(matches!(
            Header::new(options, false, 1 << 18, 1),
            Err(StegoError::FileTooLarge { .. })
        ));
        assert!(matches!(
            Header::new(options, false, 1, 1 << 36),
            Err(StegoError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn should_reject_the_unused_edge_mode_but_still_consume_the_header() {
        let mut frame = carrier(16, 2);
        HeaderCodec::encode(
            &mut frame,
            &header(CodecOptions::default(), false),
            &mut Cursor::origin(),
        )
        .unwrap();
        let edge_bits = (frame.sample(0, 1) & !0b11) | 0b10;
        *frame.sample_mut(0, 1) = edge_bits;

        let mut cursor = Cursor::origin();
        let result = HeaderCodec::decode(&frame, &mut cursor, false);

        assert!(matches!(result, Err(StegoError::InvalidHeader)));
        assert_eq!(cursor, Cursor::new(0, HEADER_BYTES));
    }

    #[test]
    fn should_check_the_encryption_flag_against_the_password() {
        let mut plain = carrier(16, 2);
        let mut sealed = carrier(16, 2);
        let options = CodecOptions::default();
        HeaderCodec::encode(&mut plain, &header(options, false), &mut Cursor::origin()).unwrap();
        HeaderCodec::encode(&mut sealed, &header(options, true), &mut Cursor::origin()).unwrap();

        assert!(matches!(
            HeaderCodec::decode(&plain, &mut Cursor::origin(), true),
            Err(StegoError::DataNotEncrypted)
        ));
        assert!(matches!(
            HeaderCodec::decode(&sealed, &mut Cursor::origin(), false),
            Err(StegoError::MissingPassword)
        ));
    }

    fn any_options() -> impl Strategy<Value = CodecOptions> {
        (
            prop_oneof![Just(Algorithm::Lsb), Just(Algorithm::Pvd)],
            prop_oneof![
                Just(EdgeMode::None),
                Just(EdgeMode::Canny),
                Just(EdgeMode::Sobel)
            ],
        )
            .prop_map(|(algorithm, edge_mode)| CodecOptions::new(algorithm, edge_mode))
    }

    proptest! {
        #[test]
        fn header_survives_encode_and_decode(
            options in any_options(),
            encrypted in any::<bool>(),
            name_length in 0..=MAX_FILE_NAME_LENGTH as usize,
            file_length in 0..=MAX_FILE_LENGTH,
            width in 10usize..40,
        ) {
            let mut frame = carrier(width, 2);
            let header = Header::new(options, encrypted, name_length, file_length).unwrap();
            HeaderCodec::encode(&mut frame, &header, &mut Cursor::origin()).unwrap();

            let decoded = HeaderCodec::decode(&frame, &mut Cursor::origin(), encrypted).unwrap();

            prop_assert_eq!(decoded, header);
        }
    }
}
