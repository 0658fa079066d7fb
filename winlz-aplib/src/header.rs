//! `AP32` container header.
//!
//! ```text
//! offset 0  : 4 bytes magic "AP32"
//! offset 4  : u32 header_size   (= 24)
//! offset 8  : u32 packed_size
//! offset 12 : u32 packed_crc32
//! offset 16 : u32 orig_size
//! offset 20 : u32 orig_crc32
//! ```
//!
//! All fields are little-endian. A field holding zero is treated as
//! "unknown" and skipped by the strict checks.

use winlz_core::buffer::ByteReader;
use winlz_core::crc::Crc32;
use winlz_core::error::{Result, WinlzError};

/// `AP32` magic bytes.
pub const AP32_MAGIC: [u8; 4] = *b"AP32";

/// Size of the header written by [`Ap32Header::to_bytes`].
pub const AP32_HEADER_SIZE: usize = 24;

/// Parsed or freshly built `AP32` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ap32Header {
    /// Offset of the packed payload from the start of the header.
    pub header_size: u32,
    /// Length of the packed payload.
    pub packed_size: u32,
    /// CRC-32 of the packed payload.
    pub packed_crc: u32,
    /// Length of the original data.
    pub orig_size: u32,
    /// CRC-32 of the original data.
    pub orig_crc: u32,
}

impl Ap32Header {
    /// Header describing `packed`, the aPLib stream for `original`.
    pub fn for_payload(original: &[u8], packed: &[u8]) -> Self {
        Self {
            header_size: AP32_HEADER_SIZE as u32,
            packed_size: packed.len() as u32,
            packed_crc: Crc32::compute(packed),
            orig_size: original.len() as u32,
            orig_crc: Crc32::compute(original),
        }
    }

    /// Serialize to the 24-byte on-disk layout.
    pub fn to_bytes(&self) -> [u8; AP32_HEADER_SIZE] {
        let mut out = [0u8; AP32_HEADER_SIZE];
        out[0..4].copy_from_slice(&AP32_MAGIC);
        out[4..8].copy_from_slice(&self.header_size.to_le_bytes());
        out[8..12].copy_from_slice(&self.packed_size.to_le_bytes());
        out[12..16].copy_from_slice(&self.packed_crc.to_le_bytes());
        out[16..20].copy_from_slice(&self.orig_size.to_le_bytes());
        out[20..24].copy_from_slice(&self.orig_crc.to_le_bytes());
        out
    }

    /// Parse a header at the start of `input`.
    ///
    /// Returns `Ok(None)` when `input` does not start with the magic or is
    /// shorter than a header; such input is a bare stream.
    pub fn parse(input: &[u8]) -> Result<Option<Self>> {
        if input.len() < AP32_HEADER_SIZE || input[..4] != AP32_MAGIC {
            return Ok(None);
        }

        let mut reader = ByteReader::new(&input[4..]);
        let header = Self {
            header_size: reader.read_u32_le()?,
            packed_size: reader.read_u32_le()?,
            packed_crc: reader.read_u32_le()?,
            orig_size: reader.read_u32_le()?,
            orig_crc: reader.read_u32_le()?,
        };

        if (header.header_size as usize) < AP32_HEADER_SIZE {
            return Err(WinlzError::malformed_header(format!(
                "AP32 header size {} is smaller than {}",
                header.header_size, AP32_HEADER_SIZE
            )));
        }

        Ok(Some(header))
    }

    /// Slice the packed payload out of `input` (which starts with this header).
    pub fn payload<'a>(&self, input: &'a [u8]) -> Result<&'a [u8]> {
        let start = self.header_size as usize;
        let end = start
            .checked_add(self.packed_size as usize)
            .filter(|&end| end <= input.len())
            .ok_or_else(|| {
                WinlzError::malformed_header(format!(
                    "AP32 payload {}+{} exceeds input of {} bytes",
                    self.header_size,
                    self.packed_size,
                    input.len()
                ))
            })?;
        Ok(&input[start..end])
    }

    /// Check the packed size and CRC against `payload`.
    pub fn verify_packed(&self, payload: &[u8]) -> Result<()> {
        check("packed size", self.packed_size, payload.len() as u32)?;
        check("packed CRC-32", self.packed_crc, Crc32::compute(payload))
    }

    /// Check the original size and CRC against the decoded `output`.
    pub fn verify_original(&self, output: &[u8]) -> Result<()> {
        check("original size", self.orig_size, output.len() as u32)?;
        check("original CRC-32", self.orig_crc, Crc32::compute(output))
    }
}

/// Zero means the field was not recorded.
fn check(what: &'static str, expected: u32, actual: u32) -> Result<()> {
    if expected != 0 && expected != actual {
        return Err(WinlzError::integrity(what, expected as u64, actual as u64));
    }
    Ok(())
}
