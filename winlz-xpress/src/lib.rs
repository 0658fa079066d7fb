//! Pure Rust XPRESS compression.
//!
//! This is the plain LZ77 variant of XPRESS
//! (`COMPRESSION_FORMAT_XPRESS`, no Huffman stage): literals and matches are
//! described by 32-bit flag words, matches reach back at most 8 KiB, and
//! long match lengths spill into nibble, byte, word and dword fields.
//!
//! # Example
//!
//! ```
//! use winlz_xpress::{XpressLevel, compress, compress_level, decompress};
//!
//! let data = b"Hello, World! Hello, World! Hello, World!";
//! let compressed = compress(data);
//! assert_eq!(decompress(&compressed).unwrap(), data);
//!
//! let fast = compress_level(data, XpressLevel::MIN);
//! assert_eq!(decompress(&fast).unwrap(), data);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod decode;
mod dictionary;
mod encode;
pub mod level;

pub use decode::{decode, set_bits_are_highest};
pub use dictionary::MAX_OFFSET;
pub use encode::encode;
pub use level::XpressLevel;

use winlz_core::error::Result;
use winlz_core::traits::BlockCodec;

/// Compress `data` at [`XpressLevel::DEFAULT`]. Empty input gives empty output.
pub fn compress(data: &[u8]) -> Vec<u8> {
    encode(data, XpressLevel::DEFAULT)
}

/// Compress `data` at `level`.
pub fn compress_level(data: &[u8], level: XpressLevel) -> Vec<u8> {
    encode(data, level)
}

/// Decompress an XPRESS stream.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decode(data)
}

/// [`BlockCodec`] adapter for XPRESS at a fixed level.
#[derive(Debug, Clone, Copy, Default)]
pub struct XpressCodec {
    level: XpressLevel,
}

impl XpressCodec {
    /// Codec compressing at `level`.
    pub fn new(level: XpressLevel) -> Self {
        Self { level }
    }

    /// Configured level.
    pub fn level(&self) -> XpressLevel {
        self.level
    }
}

impl BlockCodec for XpressCodec {
    fn name(&self) -> &'static str {
        "xpress"
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        Ok(encode(input, self.level))
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        decode(input)
    }
}
