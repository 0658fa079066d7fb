//! Pure Rust LZNT1 compression.
//!
//! LZNT1 is the chunked LZ77 format behind NTFS file compression and
//! `RtlCompressBuffer(COMPRESSION_FORMAT_LZNT1)`. Input is cut into 4096-byte
//! chunks, each compressed on its own or stored raw when compression would
//! not shrink it. Inside a compressed chunk, a flag byte precedes every group
//! of eight items; each flag bit (low to high) selects a literal byte or a
//! two-byte match symbol.
//!
//! # Example
//!
//! ```
//! use winlz_lznt1::{compress, decompress};
//!
//! let data = b"Hello, World! Hello, World! Hello, World!";
//! let compressed = compress(data);
//! assert!(compressed.len() < data.len());
//! assert_eq!(decompress(&compressed).unwrap(), data);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod chunk;
mod decode;
mod dictionary;
mod encode;

pub use chunk::{CHUNK_SIZE, ChunkHeader, ChunkInfo, SymbolSplit, chunks};
pub use decode::decode;
pub use encode::encode;

use winlz_core::error::Result;
use winlz_core::traits::BlockCodec;

/// Compress `data` into LZNT1 chunks. Empty input gives empty output.
pub fn compress(data: &[u8]) -> Vec<u8> {
    encode(data)
}

/// Decompress LZNT1 chunks.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decode(data)
}

/// [`BlockCodec`] adapter for LZNT1.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lznt1Codec;

impl BlockCodec for Lznt1Codec {
    fn name(&self) -> &'static str {
        "lznt1"
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        Ok(encode(input))
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        decode(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_empty() {
        assert!(compress(b"").is_empty());
        assert!(decompress(b"").unwrap().is_empty());
    }

    #[test]
    fn test_roundtrip_hello() {
        let data = b"Hello, World!";
        assert_eq!(decompress(&compress(data)).unwrap(), data);
    }

    #[test]
    fn test_codec() {
        let data = b"abcabcabcabcabcabcabcabc";
        let codec = Lznt1Codec;
        assert_eq!(codec.name(), "lznt1");
        let packed = codec.compress_verified(data).unwrap();
        assert_eq!(codec.decompress(&packed).unwrap(), data);
    }
}
