//! Chunk headers and the moving offset/length split of match symbols.
//!
//! ```text
//! chunk header (u16 LE):  C 0 1 1 | size - 1 (12 bits)
//!                         C = 1: compressed, C = 0: stored
//! ```
//!
//! A match symbol is a little-endian `u16` holding `offset - 1` in the high
//! bits and `length - 3` in the low bits. The boundary depends on how many
//! bytes of the chunk have been produced: with `pos` bytes behind the cursor
//! the offset field is just wide enough for `pos`, and the length field gets
//! the rest.
//!
//! | `pos`       | offset bits | length bits | max length |
//! |-------------|-------------|-------------|------------|
//! | 1..=16      | 4           | 12          | 4098       |
//! | 17..=32     | 5           | 11          | 2050       |
//! | ...         |             |             |            |
//! | 2049..=4096 | 12          | 4           | 18         |

use winlz_core::buffer::ByteReader;
use winlz_core::error::{Result, WinlzError};

/// Uncompressed size of every chunk except possibly the last.
pub const CHUNK_SIZE: usize = 4096;

/// Set on chunks holding LZ77 symbols.
pub const COMPRESSED_FLAG: u16 = 0x8000;

/// Fixed `011` signature bits below the compressed flag.
pub const SIGNATURE: u16 = 0x3000;

const SIZE_MASK: u16 = 0x0FFF;

/// Shortest match a symbol can express.
pub const MIN_MATCH: usize = 3;

/// A two-byte chunk header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader(u16);

impl ChunkHeader {
    /// Header for a compressed chunk with `len` bytes of body.
    pub fn compressed(len: usize) -> Self {
        debug_assert!((1..=CHUNK_SIZE).contains(&len));
        Self(COMPRESSED_FLAG | SIGNATURE | (len - 1) as u16)
    }

    /// Header for a stored chunk of `len` raw bytes.
    pub fn stored(len: usize) -> Self {
        debug_assert!((1..=CHUNK_SIZE).contains(&len));
        Self(SIGNATURE | (len - 1) as u16)
    }

    /// Wrap a raw header value.
    pub fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Raw header value.
    pub fn raw(self) -> u16 {
        self.0
    }

    /// True if the body holds LZ77 symbols rather than raw bytes.
    pub fn is_compressed(self) -> bool {
        self.0 & COMPRESSED_FLAG != 0
    }

    /// Length of the body following the header.
    pub fn body_len(self) -> usize {
        (self.0 & SIZE_MASK) as usize + 1
    }

    /// Little-endian encoding.
    pub fn to_le_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}

/// Location and header of one chunk inside a compressed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkInfo {
    /// Offset of the chunk header in the stream.
    pub offset: usize,
    /// The parsed header.
    pub header: ChunkHeader,
}

/// Walk the chunk headers of `input` without decoding any bodies.
///
/// Fails on a zero header or a body running past the end of `input`.
pub fn chunks(input: &[u8]) -> Result<Vec<ChunkInfo>> {
    let mut reader = ByteReader::new(input);
    let mut found = Vec::with_capacity(input.len() / CHUNK_SIZE + 1);

    while !reader.is_empty() {
        let (info, _) = next_chunk(&mut reader)?;
        found.push(info);
    }

    Ok(found)
}

/// Read one chunk header and borrow its body.
pub(crate) fn next_chunk<'a>(reader: &mut ByteReader<'a>) -> Result<(ChunkInfo, &'a [u8])> {
    let offset = reader.position();
    let raw = reader.read_u16_le()?;
    if raw == 0 {
        return Err(WinlzError::malformed_header(format!(
            "zero LZNT1 chunk header at offset {}",
            offset
        )));
    }

    let header = ChunkHeader::from_raw(raw);
    let body = reader.read_slice(header.body_len())?;
    Ok((ChunkInfo { offset, header }, body))
}

/// Offset/length field boundary for the symbol at chunk position `pos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolSplit {
    shift: u32,
    mask: u16,
}

impl SymbolSplit {
    /// Split in effect once `pos` bytes of the chunk have been produced.
    pub fn at(pos: usize) -> Self {
        let mut shift = 12;
        let mut mask = SIZE_MASK;
        let mut p = pos.saturating_sub(1);
        while p >= 0x10 {
            mask >>= 1;
            shift -= 1;
            p >>= 1;
        }
        Self { shift, mask }
    }

    /// Longest match this split can express.
    pub fn max_length(self) -> usize {
        self.mask as usize + MIN_MATCH
    }

    /// Farthest offset this split can express.
    pub fn max_offset(self) -> usize {
        1 << (16 - self.shift)
    }

    /// Pack a match into a symbol.
    pub fn pack(self, offset: usize, length: usize) -> u16 {
        debug_assert!((1..=self.max_offset()).contains(&offset));
        debug_assert!((MIN_MATCH..=self.max_length()).contains(&length));
        (((offset - 1) as u16) << self.shift) | (length - MIN_MATCH) as u16
    }

    /// Split a symbol into `(offset, length)`.
    pub fn unpack(self, symbol: u16) -> (usize, usize) {
        let offset = (symbol >> self.shift) as usize + 1;
        let length = (symbol & self.mask) as usize + MIN_MATCH;
        (offset, length)
    }
}
