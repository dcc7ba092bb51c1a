//! LSB-first bit slicing shared by the header and the frame codecs.

use std::io::{self, Chain, Read};

use bitstream_io::{BitRead, BitReader, BitWrite, BitWriter, LittleEndian};

use crate::result::Result;

/// Yields the bits of the file name followed by the payload as one continuous stream.
///
/// Bits come least significant first. The source outlives a single frame,
/// so a byte can be split across two frames of a video.
pub struct BitSource<'a> {
    reader: BitReader<Chain<&'a [u8], &'a [u8]>, LittleEndian>,
    remaining: u64,
}

impl<'a> BitSource<'a> {
    pub fn new(name: &'a [u8], payload: &'a [u8]) -> Self {
        let remaining = (name.len() as u64 + payload.len() as u64) * 8;
        Self {
            reader: BitReader::endian(name.chain(payload), LittleEndian),
            remaining,
        }
    }

    pub fn remaining_bits(&self) -> u64 {
        self.remaining
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    pub fn next_bit(&mut self) -> Result<Option<bool>> {
        if self.is_exhausted() {
            return Ok(None);
        }
        let bit = self.reader.read_bit()?;
        self.remaining -= 1;
        Ok(Some(bit))
    }

    /// Takes up to `count` bits as a value, first bit in the lowest position.
    /// Bits missing at the end of the stream are zero.
    pub fn take_value(&mut self, count: u8) -> Result<u8> {
        let mut value = 0u8;
        for i in 0..count {
            match self.next_bit()? {
                Some(true) => value |= 1 << i,
                Some(false) => {}
                None => break,
            }
        }
        Ok(value)
    }
}

/// Upper bound for reserving memory up front, a damaged header may announce far more
const MAX_PREALLOCATION: u64 = 16 * 1024 * 1024;

/// Collects extracted bits until the expected number of bytes is complete
pub struct BitSink {
    writer: BitWriter<Vec<u8>, LittleEndian>,
    remaining: u64,
}

impl BitSink {
    pub fn new(byte_len: u64) -> Self {
        Self {
            writer: BitWriter::endian(
                Vec::with_capacity(byte_len.min(MAX_PREALLOCATION) as usize),
                LittleEndian,
            ),
            remaining: byte_len * 8,
        }
    }

    pub fn remaining_bits(&self) -> u64 {
        self.remaining
    }

    pub fn is_full(&self) -> bool {
        self.remaining == 0
    }

    /// Appends a bit, bits beyond the expected length are dropped
    pub fn push_bit(&mut self, bit: bool) -> Result<()> {
        if self.is_full() {
            return Ok(());
        }
        self.writer.write_bit(bit)?;
        self.remaining -= 1;
        Ok(())
    }

    /// Appends the lowest `count` bits of `value`, lowest first
    pub fn push_value(&mut self, value: u8, count: u8) -> Result<()> {
        for i in 0..count {
            self.push_bit((value >> i) & 1 == 1)?;
        }
        Ok(())
    }

    /// The collected bytes, only complete once [`BitSink::is_full`]
    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_writer()
    }
}

/// Splits the lowest `bits` bits of `value` into groups of two, lowest group first
pub fn to_bit_pairs(value: u64, bits: u32) -> io::Result<Vec<u8>> {
    let mut writer = BitWriter::endian(Vec::new(), LittleEndian);
    writer.write(bits, value)?;
    writer.byte_align()?;
    let bytes = writer.into_writer();

    let mut reader = BitReader::endian(bytes.as_slice(), LittleEndian);
    (0..bits / 2).map(|_| reader.read::<u8>(2)).collect()
}

/// Joins two-bit groups, lowest group first, into a value
pub fn from_bit_pairs(pairs: &[u8]) -> io::Result<u64> {
    let mut writer = BitWriter::endian(Vec::new(), LittleEndian);
    for pair in pairs {
        writer.write(2, *pair & 0b11)?;
    }
    writer.byte_align()?;
    let bytes = writer.into_writer();

    let mut reader = BitReader::endian(bytes.as_slice(), LittleEndian);
    reader.read::<u64>(pairs.len() as u32 * 2)
}
