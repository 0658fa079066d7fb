//! aPLib stream decoder.

use crate::bits::TagReader;
use winlz_core::buffer::copy_match;
use winlz_core::error::{Result, WinlzError};

/// The stream produced for an empty input: a lone end marker.
pub const EMPTY_STREAM: [u8; 2] = [0xC0, 0x00];

/// Decode a bare aPLib stream (no `AP32` header).
pub fn decode(input: &[u8]) -> Result<Vec<u8>> {
    if input == EMPTY_STREAM {
        return Ok(Vec::new());
    }

    let mut decoder = AplibDecoder::new(input);
    decoder.run()?;
    log::debug!(
        "aplib: unpacked {} -> {} bytes",
        input.len(),
        decoder.output.len()
    );
    Ok(decoder.output)
}

/// Per-call decoder state.
struct AplibDecoder<'a> {
    bits: TagReader<'a>,
    output: Vec<u8>,
    /// Offset stored by the last block or short block.
    last_offset: Option<usize>,
    /// aPLib's "low watermark": set by blocks and short blocks, cleared by
    /// literals and single-byte references. While clear, a block high field
    /// of 2 means "repeat the last offset".
    after_match: bool,
}

impl<'a> AplibDecoder<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            bits: TagReader::new(input),
            output: Vec::with_capacity(input.len().saturating_mul(2)),
            last_offset: None,
            after_match: false,
        }
    }

    fn run(&mut self) -> Result<()> {
        let first = self.bits.read_byte()?;
        self.output.push(first);

        loop {
            if !self.bits.read_bit()? {
                let byte = self.bits.read_byte()?;
                self.output.push(byte);
                self.after_match = false;
            } else if !self.bits.read_bit()? {
                self.block()?;
                self.after_match = true;
            } else if !self.bits.read_bit()? {
                if !self.short_block()? {
                    return Ok(());
                }
                self.after_match = true;
            } else {
                self.single_byte()?;
                self.after_match = false;
            }
        }
    }

    fn single_byte(&mut self) -> Result<()> {
        let offset = self.bits.read_fixed(4)? as usize;
        if offset == 0 {
            self.output.push(0);
            Ok(())
        } else {
            copy_match(&mut self.output, offset, 1)
        }
    }

    /// Returns `false` on the end marker.
    fn short_block(&mut self) -> Result<bool> {
        let byte = self.bits.read_byte()?;
        let length = 2 + (byte & 1) as usize;
        let offset = (byte >> 1) as usize;
        if offset == 0 {
            return Ok(false);
        }

        copy_match(&mut self.output, offset, length)?;
        self.last_offset = Some(offset);
        Ok(true)
    }

    fn block(&mut self) -> Result<()> {
        let high = self.bits.read_gamma()? as usize;

        if !self.after_match && high == 2 {
            let offset = self.last_offset.ok_or_else(|| {
                WinlzError::invalid_encoding(self.bits.position(), "repeated offset before any match")
            })?;
            let length = self.bits.read_gamma()? as usize;
            return copy_match(&mut self.output, offset, length);
        }

        let high = high - if self.after_match { 2 } else { 3 };
        let offset = (high << 8) | self.bits.read_byte()? as usize;
        let mut length = self.bits.read_gamma()? as usize;

        if offset >= 32000 {
            length += 1;
        }
        if offset >= 1280 {
            length += 1;
        }
        if offset < 128 {
            length += 2;
        }

        copy_match(&mut self.output, offset, length)?;
        self.last_offset = Some(offset);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stream() {
        assert!(decode(&EMPTY_STREAM).unwrap().is_empty());
    }

    #[test]
    fn test_empty_input_is_truncated() {
        assert!(matches!(
            decode(&[]),
            Err(WinlzError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_literals_only() {
        // 'a', then tag 0 0 110: two literals and the end marker.
        let stream = [b'a', 0b0011_0000, b'b', b'c', 0x00];
        assert_eq!(decode(&stream).unwrap(), b"abc");
    }

    #[test]
    fn test_short_block_overlapping() {
        // "ab", short block offset 2 length 3 -> "ababa"
        let stream = [b'a', 0b0110_1100, b'b', (2 << 1) | 1, 0x00];
        assert_eq!(decode(&stream).unwrap(), b"ababa");
    }

    #[test]
    fn test_missing_end_marker() {
        let stream = [b'a', 0b0000_0000, b'b'];
        assert!(matches!(
            decode(&stream),
            Err(WinlzError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_single_byte_offset_out_of_range() {
        // 111 + offset 0101 with only one byte of output.
        let stream = [b'a', 0b1110_1010, 0x00];
        assert!(matches!(
            decode(&stream),
            Err(WinlzError::InvalidOffset {
                offset: 5,
                available: 1
            })
        ));
    }

    #[test]
    fn test_repeat_offset_without_history() {
        // 10 + gamma(2) right after the first literal.
        let stream = [b'a', 0b1000_0000, 0x00, 0x00];
        assert!(matches!(
            decode(&stream),
            Err(WinlzError::InvalidEncoding { .. })
        ));
    }

    #[test]
    fn test_block_offset_before_start() {
        // 10, gamma high 3 (offset high 0), low byte 0x40, gamma length 2.
        // Bits: 1 0 | 1 0 | 0 0 ...
        let stream = [b'a', 0b1010_0000, 0x40, 0x00];
        assert!(matches!(
            decode(&stream),
            Err(WinlzError::InvalidOffset { offset: 0x40, .. })
        ));
    }
}
