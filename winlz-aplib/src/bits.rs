//! Interleaved tag-bit I/O.
//!
//! aPLib mixes control bits and payload bytes in one stream. Control bits are
//! collected MSB-first into a tag byte whose slot is reserved in the output
//! the moment its first bit is written; payload bytes written afterwards land
//! behind that slot. Once eight bits have been collected the tag is patched
//! into its slot and the next control bit reserves a fresh one.
//!
//! ```text
//! [tag0] [byte] [byte] [tag1] [byte] ...
//!   ^ bits 7..0 describe the opcodes whose payload follows
//! ```

use winlz_core::buffer::ByteReader;
use winlz_core::error::{Result, WinlzError};

/// Writes control bits into reserved tag slots and payload bytes inline.
#[derive(Debug, Default)]
pub(crate) struct TagWriter {
    out: Vec<u8>,
    /// Bits collected for the tag at `tag_slot`.
    tag: u8,
    /// Output index reserved for the tag currently being filled.
    tag_slot: Option<usize>,
    /// Free bit positions left in `tag`.
    bits_left: u8,
}

impl TagWriter {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            out: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Append one control bit.
    #[inline]
    pub(crate) fn write_bit(&mut self, bit: bool) {
        if self.bits_left == 0 {
            self.flush_tag();
            self.tag_slot = Some(self.out.len());
            self.out.push(0);
            self.tag = 0;
            self.bits_left = 8;
        }

        self.bits_left -= 1;
        if bit {
            self.tag |= 1 << self.bits_left;
        }
    }

    /// Append control bits in order.
    pub(crate) fn write_bits(&mut self, bits: &[bool]) {
        for &bit in bits {
            self.write_bit(bit);
        }
    }

    /// Append the low `count` bits of `value`, most significant first.
    pub(crate) fn write_fixed(&mut self, value: u32, count: u8) {
        for i in (0..count).rev() {
            self.write_bit((value >> i) & 1 != 0);
        }
    }

    /// Append `value` as an Elias-gamma style code: the digits below the
    /// leading one, each but the last followed by a continuation `1`, and a
    /// terminating `0`.
    pub(crate) fn write_gamma(&mut self, value: u32) {
        debug_assert!(value >= 2, "gamma code cannot represent {}", value);

        let top = 31 - value.leading_zeros();
        self.write_bit(value & (1 << (top - 1)) != 0);
        for i in (0..top - 1).rev() {
            self.write_bit(true);
            self.write_bit(value & (1 << i) != 0);
        }
        self.write_bit(false);
    }

    /// Append a payload byte.
    #[inline]
    pub(crate) fn write_byte(&mut self, byte: u8) {
        self.out.push(byte);
    }

    fn flush_tag(&mut self) {
        if let Some(slot) = self.tag_slot {
            self.out[slot] = self.tag;
        }
    }

    /// Patch the partially filled tag (unused bits stay zero) and return the stream.
    pub(crate) fn finish(mut self) -> Vec<u8> {
        self.flush_tag();
        self.out
    }
}

/// Reads control bits from tag bytes and payload bytes inline.
#[derive(Debug)]
pub(crate) struct TagReader<'a> {
    reader: ByteReader<'a>,
    tag: u8,
    bits_left: u8,
}

impl<'a> TagReader<'a> {
    pub(crate) fn new(input: &'a [u8]) -> Self {
        Self {
            reader: ByteReader::new(input),
            tag: 0,
            bits_left: 0,
        }
    }

    /// Input offset of the next unread byte.
    pub(crate) fn position(&self) -> usize {
        self.reader.position()
    }

    #[inline]
    pub(crate) fn read_bit(&mut self) -> Result<bool> {
        if self.bits_left == 0 {
            self.tag = self.reader.read_u8()?;
            self.bits_left = 8;
        }

        self.bits_left -= 1;
        let bit = self.tag & 0x80 != 0;
        self.tag <<= 1;
        Ok(bit)
    }

    pub(crate) fn read_fixed(&mut self, count: u8) -> Result<u32> {
        let mut value = 0;
        for _ in 0..count {
            value = (value << 1) | self.read_bit()? as u32;
        }
        Ok(value)
    }

    /// Read a gamma code written by [`TagWriter::write_gamma`].
    pub(crate) fn read_gamma(&mut self) -> Result<u32> {
        let mut value = 1u32;
        loop {
            if value >= 1 << 31 {
                return Err(WinlzError::invalid_encoding(
                    self.position(),
                    "gamma code exceeds 32 bits",
                ));
            }
            value = (value << 1) | self.read_bit()? as u32;
            if !self.read_bit()? {
                return Ok(value);
            }
        }
    }

    #[inline]
    pub(crate) fn read_byte(&mut self) -> Result<u8> {
        self.reader.read_u8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_slot_reserved_before_payload() {
        let mut writer = TagWriter::default();
        writer.write_bit(false);
        writer.write_byte(0xAA);
        writer.write_bits(&[true, true, false]);
        writer.write_byte(0xBB);
        assert_eq!(writer.finish(), [0b0110_0000, 0xAA, 0xBB]);
    }

    #[test]
    fn test_ninth_bit_opens_new_tag() {
        let mut writer = TagWriter::default();
        writer.write_fixed(0xFF, 8);
        writer.write_byte(0x11);
        writer.write_bit(true);
        assert_eq!(writer.finish(), [0xFF, 0x11, 0x80]);
    }

    #[test]
    fn test_gamma_layout() {
        // 2 = 0b10: digit 0, stop
        let mut writer = TagWriter::default();
        writer.write_gamma(2);
        assert_eq!(writer.finish(), [0b0000_0000]);

        // 5 = 0b101: digit 0, more, digit 1, stop
        let mut writer = TagWriter::default();
        writer.write_gamma(5);
        assert_eq!(writer.finish(), [0b0110_0000]);

        // 7 = 0b111: digit 1, more, digit 1, stop
        let mut writer = TagWriter::default();
        writer.write_gamma(7);
        assert_eq!(writer.finish(), [0b1110_0000]);
    }

    #[test]
    fn test_gamma_roundtrip() {
        let values = [2u32, 3, 4, 5, 127, 128, 255, 256, 0x7D00, 0xFFFF, 1 << 20];
        let mut writer = TagWriter::default();
        for &v in &values {
            writer.write_gamma(v);
            writer.write_byte(v as u8);
        }
        let stream = writer.finish();

        let mut reader = TagReader::new(&stream);
        for &v in &values {
            assert_eq!(reader.read_gamma().unwrap(), v);
            assert_eq!(reader.read_byte().unwrap(), v as u8);
        }
    }

    #[test]
    fn test_gamma_overflow_rejected() {
        // An endless run of continuation bits never terminates the code.
        let stream = [0xFF; 16];
        let mut reader = TagReader::new(&stream);
        assert!(matches!(
            reader.read_gamma(),
            Err(WinlzError::InvalidEncoding { .. })
        ));
    }

    #[test]
    fn test_reader_truncated() {
        let mut reader = TagReader::new(&[0x80]);
        assert!(reader.read_bit().unwrap());
        for _ in 0..7 {
            assert!(!reader.read_bit().unwrap());
        }
        assert!(matches!(
            reader.read_bit(),
            Err(WinlzError::TruncatedInput { .. })
        ));
    }
}
