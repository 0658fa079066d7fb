//! Core trait implemented by every codec.
//!
//! All winlz codecs are whole-buffer transforms: the complete input goes in,
//! the complete output comes out. Each call owns its own match-finder and
//! accumulator state, so a codec value carries configuration only and can be
//! reused for any number of independent calls.

use crate::crc::Crc32;
use crate::error::{Result, WinlzError};

/// A whole-buffer compressor/decompressor pair for one format.
pub trait BlockCodec {
    /// Short human-readable format name (used in logs and the CLI).
    fn name(&self) -> &'static str;

    /// Compress `input` into a freshly allocated buffer.
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Decompress `input` into a freshly allocated buffer.
    ///
    /// Fails on the first structural violation in `input`.
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Compress `input` and decode the result again, returning the compressed
    /// form only if it reproduces `input` exactly.
    fn compress_verified(&self, input: &[u8]) -> Result<Vec<u8>> {
        let packed = self.compress(input)?;
        let unpacked = self.decompress(&packed)?;
        if unpacked.len() != input.len() {
            return Err(WinlzError::integrity(
                "round-trip length",
                input.len() as u64,
                unpacked.len() as u64,
            ));
        }
        if unpacked != input {
            return Err(WinlzError::integrity(
                "round-trip content CRC-32",
                Crc32::compute(input) as u64,
                Crc32::compute(&unpacked) as u64,
            ));
        }
        Ok(packed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stores input verbatim; a lossy variant truncates on decode and a
    /// corrupting one flips the first byte.
    struct Stored {
        lossy: bool,
        corrupt: bool,
    }

    impl BlockCodec for Stored {
        fn name(&self) -> &'static str {
            "stored"
        }

        fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
            Ok(input.to_vec())
        }

        fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
            let keep = if self.lossy {
                input.len().saturating_sub(1)
            } else {
                input.len()
            };
            let mut out = input[..keep].to_vec();
            if self.corrupt {
                if let Some(first) = out.first_mut() {
                    *first ^= 0xFF;
                }
            }
            Ok(out)
        }
    }

    #[test]
    fn test_compress_verified() {
        let codec = Stored {
            lossy: false,
            corrupt: false,
        };
        assert_eq!(codec.compress_verified(b"abc").unwrap(), b"abc");

        let codec = Stored {
            lossy: true,
            corrupt: false,
        };
        assert!(matches!(
            codec.compress_verified(b"abc"),
            Err(WinlzError::IntegrityMismatch { .. })
        ));
    }

    #[test]
    fn test_compress_verified_same_length_content() {
        let codec = Stored {
            lossy: false,
            corrupt: true,
        };
        match codec.compress_verified(b"abcdefghijklmnop") {
            Err(WinlzError::IntegrityMismatch {
                what,
                expected,
                actual,
            }) => {
                assert_eq!(what, "round-trip content CRC-32");
                assert_eq!(expected, Crc32::compute(b"abcdefghijklmnop") as u64);
                assert_ne!(expected, actual);
            }
            other => panic!("expected content mismatch, got {:?}", other),
        }
    }
}
