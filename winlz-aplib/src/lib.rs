//! Pure Rust aPLib compression.
//!
//! aPLib is a small LZ77 format whose control bits are interleaved with the
//! payload in tag bytes. Streams may be wrapped in a 24-byte `AP32` header
//! carrying sizes and CRC-32s of both the packed and the original data.
//!
//! # Example
//!
//! ```
//! use winlz_aplib::{pack, pack_safe, unpack, unpack_strict};
//!
//! let data = b"Hello, World! Hello, World!";
//!
//! let packed = pack(data);
//! assert_eq!(unpack(&packed).unwrap(), data);
//!
//! let safe = pack_safe(data);
//! assert_eq!(&safe[..4], b"AP32");
//! assert_eq!(unpack_strict(&safe).unwrap(), data);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bits;
mod decode;
mod encode;
pub mod header;
pub mod matcher;

pub use decode::{EMPTY_STREAM, decode};
pub use encode::{AplibEncoder, length_delta};
pub use header::{AP32_HEADER_SIZE, AP32_MAGIC, Ap32Header};
pub use matcher::DEFAULT_WINDOW;

use winlz_core::error::Result;
use winlz_core::traits::BlockCodec;

/// Compress `data` into a bare aPLib stream.
pub fn pack(data: &[u8]) -> Vec<u8> {
    AplibEncoder::new().encode(data)
}

/// Compress `data` and prepend an `AP32` header.
pub fn pack_safe(data: &[u8]) -> Vec<u8> {
    with_header(data, AplibEncoder::new().encode(data))
}

/// Decompress a bare stream or an `AP32`-wrapped one.
///
/// A header, if present, only locates the payload; its sizes and CRCs are
/// not checked.
pub fn unpack(data: &[u8]) -> Result<Vec<u8>> {
    unpack_with(data, false)
}

/// Decompress like [`unpack`], verifying every non-zero header field.
///
/// Input without a header decodes exactly as with [`unpack`].
pub fn unpack_strict(data: &[u8]) -> Result<Vec<u8>> {
    unpack_with(data, true)
}

fn with_header(data: &[u8], packed: Vec<u8>) -> Vec<u8> {
    let header = Ap32Header::for_payload(data, &packed);
    let mut out = Vec::with_capacity(AP32_HEADER_SIZE + packed.len());
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(&packed);
    out
}

fn unpack_with(data: &[u8], strict: bool) -> Result<Vec<u8>> {
    let Some(header) = Ap32Header::parse(data)? else {
        return decode(data);
    };

    log::debug!(
        "aplib: AP32 header, packed {} bytes at {}, original {} bytes",
        header.packed_size,
        header.header_size,
        header.orig_size
    );

    let payload = header.payload(data)?;
    if strict {
        header.verify_packed(payload)?;
    }

    let output = decode(payload)?;
    if strict {
        header.verify_original(&output)?;
        log::debug!("aplib: AP32 checks passed");
    }

    Ok(output)
}

/// [`BlockCodec`] adapter with the header and strictness as settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct AplibCodec {
    encoder: AplibEncoder,
    safe: bool,
    strict: bool,
}

impl AplibCodec {
    /// Bare streams, non-strict decoding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend an `AP32` header when compressing.
    pub fn safe(mut self, safe: bool) -> Self {
        self.safe = safe;
        self
    }

    /// Verify header fields when decompressing.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Use a custom match window.
    pub fn window(mut self, window: usize) -> Self {
        self.encoder = AplibEncoder::with_window(window);
        self
    }
}

impl BlockCodec for AplibCodec {
    fn name(&self) -> &'static str {
        if self.safe { "aplib-safe" } else { "aplib" }
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let packed = self.encoder.encode(input);
        Ok(if self.safe {
            with_header(input, packed)
        } else {
            packed
        })
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        unpack_with(input, self.strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winlz_core::error::WinlzError;

    #[test]
    fn test_roundtrip_empty() {
        assert_eq!(pack(b""), EMPTY_STREAM);
        assert!(unpack(&pack(b"")).unwrap().is_empty());
        assert!(unpack_strict(&pack_safe(b"")).unwrap().is_empty());
    }

    #[test]
    fn test_roundtrip_hello() {
        let data = b"Hello, World!";
        assert_eq!(unpack(&pack(data)).unwrap(), data);
    }

    #[test]
    fn test_safe_header_fields() {
        let data = b"abcabcabcabcabcabc";
        let safe = pack_safe(data);
        let header = Ap32Header::parse(&safe).unwrap().unwrap();
        assert_eq!(header.header_size, 24);
        assert_eq!(header.packed_size as usize, safe.len() - 24);
        assert_eq!(header.orig_size as usize, data.len());
        assert_eq!(&safe[24..], pack(data).as_slice());
    }

    #[test]
    fn test_non_strict_ignores_crc() {
        let data = b"some text, some text, some text";
        let mut safe = pack_safe(data);
        // Corrupt the recorded original CRC only.
        safe[20] ^= 0xFF;
        assert_eq!(unpack(&safe).unwrap(), data);
        assert!(matches!(
            unpack_strict(&safe),
            Err(WinlzError::IntegrityMismatch {
                what: "original CRC-32",
                ..
            })
        ));
    }

    #[test]
    fn test_codec_settings() {
        let data = b"codec codec codec codec";
        let codec = AplibCodec::new().safe(true).strict(true).window(64);
        assert_eq!(codec.name(), "aplib-safe");
        let packed = codec.compress(data).unwrap();
        assert_eq!(&packed[..4], &AP32_MAGIC);
        assert_eq!(codec.decompress(&packed).unwrap(), data);
        assert_eq!(codec.compress_verified(data).unwrap(), packed);

        assert_eq!(AplibCodec::new().name(), "aplib");
    }
}
