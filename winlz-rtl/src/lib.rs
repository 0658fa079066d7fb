//! Native LZNT1 and XPRESS through `ntdll`.
//!
//! On Windows the calls go to `RtlCompressBuffer` and `RtlDecompressBuffer`.
//! Everywhere else every entry point fails with
//! [`UnsupportedPlatform`](winlz_core::error::WinlzError::UnsupportedPlatform),
//! so callers can tell a missing backend apart from damaged data.
//!
//! Compression uses `COMPRESSION_ENGINE_MAXIMUM` and an output buffer twice
//! the input size. Decompression allocates sixteen times the input size; a
//! stream that expands further fails with the native status.
//!
//! ```
//! use winlz_core::error::WinlzError;
//!
//! match winlz_rtl::lznt1_compress(b"abcabcabcabc") {
//!     Ok(packed) => assert_eq!(winlz_lznt1::decompress(&packed).unwrap(), b"abcabcabcabc"),
//!     Err(err) => assert!(matches!(err, WinlzError::UnsupportedPlatform { .. })),
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

#[cfg(windows)]
mod ntdll;

use std::fmt;

#[cfg(not(windows))]
use winlz_core::error::WinlzError;
use winlz_core::error::Result;
use winlz_core::traits::BlockCodec;

/// Backend name used in logs and in unsupported-platform errors.
pub const BACKEND_NAME: &str = "rtl";

/// Compression formats the native backend is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeFormat {
    /// `COMPRESSION_FORMAT_LZNT1`.
    Lznt1,
    /// `COMPRESSION_FORMAT_XPRESS`.
    Xpress,
}

impl NativeFormat {
    /// `COMPRESSION_FORMAT_*` value passed to `ntdll`.
    pub fn code(self) -> u16 {
        match self {
            Self::Lznt1 => 0x0002,
            Self::Xpress => 0x0003,
        }
    }
}

impl fmt::Display for NativeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lznt1 => f.write_str("lznt1"),
            Self::Xpress => f.write_str("xpress"),
        }
    }
}

/// True when this build can reach `ntdll`.
pub const fn is_available() -> bool {
    cfg!(windows)
}

/// Compress `data` in `format` with the native engine.
///
/// Empty input gives empty output without calling into `ntdll`.
pub fn compress(format: NativeFormat, data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return native_guard().map(|()| Vec::new());
    }
    let out = native_compress(format, data)?;
    log::debug!(
        "rtl: {} compressed {} -> {} bytes",
        format,
        data.len(),
        out.len()
    );
    Ok(out)
}

/// Decompress `data` in `format` with the native engine.
///
/// Empty input gives empty output without calling into `ntdll`.
pub fn decompress(format: NativeFormat, data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return native_guard().map(|()| Vec::new());
    }
    let out = native_decompress(format, data)?;
    log::debug!(
        "rtl: {} decompressed {} -> {} bytes",
        format,
        data.len(),
        out.len()
    );
    Ok(out)
}

/// Native LZNT1 compression.
pub fn lznt1_compress(data: &[u8]) -> Result<Vec<u8>> {
    compress(NativeFormat::Lznt1, data)
}

/// Native LZNT1 decompression.
pub fn lznt1_decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress(NativeFormat::Lznt1, data)
}

/// Native XPRESS compression.
pub fn xpress_compress(data: &[u8]) -> Result<Vec<u8>> {
    compress(NativeFormat::Xpress, data)
}

/// Native XPRESS decompression.
pub fn xpress_decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress(NativeFormat::Xpress, data)
}

#[cfg(windows)]
fn native_guard() -> Result<()> {
    Ok(())
}

#[cfg(not(windows))]
fn native_guard() -> Result<()> {
    Err(WinlzError::unsupported_platform(BACKEND_NAME))
}

#[cfg(windows)]
fn native_compress(format: NativeFormat, data: &[u8]) -> Result<Vec<u8>> {
    ntdll::compress(format, data)
}

#[cfg(not(windows))]
fn native_compress(_format: NativeFormat, _data: &[u8]) -> Result<Vec<u8>> {
    Err(WinlzError::unsupported_platform(BACKEND_NAME))
}

#[cfg(windows)]
fn native_decompress(format: NativeFormat, data: &[u8]) -> Result<Vec<u8>> {
    ntdll::decompress(format, data)
}

#[cfg(not(windows))]
fn native_decompress(_format: NativeFormat, _data: &[u8]) -> Result<Vec<u8>> {
    Err(WinlzError::unsupported_platform(BACKEND_NAME))
}

/// [`BlockCodec`] adapter for one native format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtlCodec {
    format: NativeFormat,
}

impl RtlCodec {
    /// Codec for `format`.
    pub fn new(format: NativeFormat) -> Self {
        Self { format }
    }

    /// Configured format.
    pub fn format(&self) -> NativeFormat {
        self.format
    }
}

impl BlockCodec for RtlCodec {
    fn name(&self) -> &'static str {
        match self.format {
            NativeFormat::Lznt1 => "rtl-lznt1",
            NativeFormat::Xpress => "rtl-xpress",
        }
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        compress(self.format, input)
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        decompress(self.format, input)
    }
}
