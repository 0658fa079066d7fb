//! Byte-buffer primitives shared by the codecs.
//!
//! - [`ByteReader`]: a bounds-checked little-endian cursor over compressed
//!   input. Every read that would run past the end returns
//!   [`WinlzError::TruncatedInput`] instead of panicking.
//! - [`copy_match`]: the LZ77 back-reference copy. Source and destination
//!   alias whenever `offset < length`, so the copy goes one byte at a time.
//! - [`patch_u32_le`]: writes a deferred value into a placeholder slot that
//!   was reserved earlier in an output buffer.

use crate::error::{Result, WinlzError};

/// Little-endian cursor over an input slice.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current read position.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// True when every byte has been consumed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Read one byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        match self.data.get(self.pos) {
            Some(&b) => {
                self.pos += 1;
                Ok(b)
            }
            None => Err(WinlzError::truncated(self.pos, 1)),
        }
    }

    /// Read a little-endian `u16`.
    #[inline]
    pub fn read_u16_le(&mut self) -> Result<u16> {
        let bytes = self.read_slice(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Read a little-endian `u32`.
    #[inline]
    pub fn read_u32_le(&mut self) -> Result<u32> {
        let bytes = self.read_slice(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Borrow the next `len` bytes and advance past them.
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(WinlzError::truncated(self.pos, len));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }
}

/// Append `length` bytes copied from `offset` bytes back in `output`.
///
/// Fails with [`WinlzError::InvalidOffset`] when `offset` is zero or reaches
/// before the start of `output`. The copy proceeds byte by byte so that a
/// short offset replicates the pattern it overlaps (offset 1 repeats the last
/// byte `length` times).
#[inline]
pub fn copy_match(output: &mut Vec<u8>, offset: usize, length: usize) -> Result<()> {
    if offset == 0 || offset > output.len() {
        return Err(WinlzError::invalid_offset(offset, output.len()));
    }

    output.reserve(length);
    let start = output.len() - offset;
    for i in 0..length {
        let byte = output[start + i];
        output.push(byte);
    }

    Ok(())
}

/// Overwrite four bytes at `at` with `value` in little-endian order.
///
/// `at + 4` must lie within `buf`; callers reserve the slot before patching it.
#[inline]
pub fn patch_u32_le(buf: &mut [u8], at: usize, value: u32) {
    buf[at..at + 4].copy_from_slice(&value.to_le_bytes());
}
