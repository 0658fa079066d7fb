//! # winlz
//!
//! Pure Rust implementations of three Windows LZ77 formats, with an optional
//! native backend:
//!
//! | Format | Crate | Native |
//! |--------|-------|--------|
//! | aPLib (bare or `AP32`-wrapped) | [`aplib`] | no |
//! | LZNT1 | [`lznt1`] | `RtlCompressBuffer` |
//! | XPRESS (plain LZ77) | [`xpress`] | `RtlCompressBuffer` |
//!
//! Pick a [`Format`] and a [`Backend`] and call [`compress`] or
//! [`decompress`], or use one of the per-mode functions such as
//! [`lznt1_compress`] or [`rtl_xpress_decompress`].
//!
//! ## Example
//!
//! ```rust
//! use winlz::{Backend, Format};
//!
//! let data = b"Hello, World! Hello, World! Hello, World!";
//! for format in Format::ALL {
//!     let packed = winlz::compress(data, format, Backend::Rust).unwrap();
//!     let unpacked = winlz::decompress(&packed, format, Backend::Rust).unwrap();
//!     assert_eq!(unpacked, data);
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod format;

pub use config::CodecConfig;
pub use format::{Backend, Format};

pub use winlz_aplib as aplib;
pub use winlz_lznt1 as lznt1;
pub use winlz_rtl as rtl;
pub use winlz_xpress as xpress;

pub use winlz_core::{BlockCodec, Result, WinlzError};

use winlz_aplib::AplibCodec;
use winlz_lznt1::Lznt1Codec;
use winlz_rtl::{NativeFormat, RtlCodec};
use winlz_xpress::XpressCodec;

/// Build the codec for `format` under `config`.
///
/// Fails with [`WinlzError::UnsupportedMethod`] when the backend does not
/// implement the format.
pub fn codec(format: Format, config: &CodecConfig) -> Result<Box<dyn BlockCodec>> {
    if !format.supports(config.backend) {
        return Err(WinlzError::unsupported_method(format!(
            "{} on the {} backend",
            format, config.backend
        )));
    }

    let codec: Box<dyn BlockCodec> = match (format, config.backend) {
        (Format::Aplib, _) => Box::new(AplibCodec::new().window(config.window)),
        (Format::AplibSafe, _) => Box::new(
            AplibCodec::new()
                .safe(true)
                .strict(true)
                .window(config.window),
        ),
        (Format::Lznt1, Backend::Rust) => Box::new(Lznt1Codec),
        (Format::Xpress, Backend::Rust) => Box::new(XpressCodec::new(config.level)),
        (Format::Lznt1, Backend::Native) => Box::new(RtlCodec::new(NativeFormat::Lznt1)),
        (Format::Xpress, Backend::Native) => Box::new(RtlCodec::new(NativeFormat::Xpress)),
    };
    Ok(codec)
}

/// Compress `data` with default settings.
pub fn compress(data: &[u8], format: Format, backend: Backend) -> Result<Vec<u8>> {
    compress_with(data, format, &CodecConfig::new(backend))
}

/// Decompress `data` with default settings.
pub fn decompress(data: &[u8], format: Format, backend: Backend) -> Result<Vec<u8>> {
    decompress_with(data, format, &CodecConfig::new(backend))
}

/// Compress `data` under `config`.
pub fn compress_with(data: &[u8], format: Format, config: &CodecConfig) -> Result<Vec<u8>> {
    let codec = codec(format, config)?;
    let out = codec.compress(data)?;
    log::debug!(
        "{} ({}): compressed {} -> {} bytes",
        codec.name(),
        config.backend,
        data.len(),
        out.len()
    );
    Ok(out)
}

/// Decompress `data` under `config`.
pub fn decompress_with(data: &[u8], format: Format, config: &CodecConfig) -> Result<Vec<u8>> {
    let codec = codec(format, config)?;
    let out = codec.decompress(data)?;
    log::debug!(
        "{} ({}): decompressed {} -> {} bytes",
        codec.name(),
        config.backend,
        data.len(),
        out.len()
    );
    Ok(out)
}

/// aPLib without a header.
pub fn aplib_compress(data: &[u8]) -> Result<Vec<u8>> {
    Ok(winlz_aplib::pack(data))
}

/// aPLib with an `AP32` header.
pub fn aplib_safe_compress(data: &[u8]) -> Result<Vec<u8>> {
    Ok(winlz_aplib::pack_safe(data))
}

/// aPLib, using any `AP32` header only to locate the payload.
pub fn aplib_decompress(data: &[u8]) -> Result<Vec<u8>> {
    winlz_aplib::unpack(data)
}

/// aPLib, verifying any `AP32` header.
pub fn aplib_strict_decompress(data: &[u8]) -> Result<Vec<u8>> {
    winlz_aplib::unpack_strict(data)
}

/// LZNT1 in pure Rust.
pub fn lznt1_compress(data: &[u8]) -> Result<Vec<u8>> {
    Ok(winlz_lznt1::compress(data))
}

/// LZNT1 in pure Rust.
pub fn lznt1_decompress(data: &[u8]) -> Result<Vec<u8>> {
    winlz_lznt1::decompress(data)
}

/// XPRESS in pure Rust at the default level.
pub fn xpress_compress(data: &[u8]) -> Result<Vec<u8>> {
    Ok(winlz_xpress::compress(data))
}

/// XPRESS in pure Rust.
pub fn xpress_decompress(data: &[u8]) -> Result<Vec<u8>> {
    winlz_xpress::decompress(data)
}

/// `RtlCompressBuffer(COMPRESSION_FORMAT_LZNT1 | COMPRESSION_ENGINE_MAXIMUM)`.
pub fn rtl_lznt1_compress(data: &[u8]) -> Result<Vec<u8>> {
    winlz_rtl::lznt1_compress(data)
}

/// `RtlDecompressBuffer(COMPRESSION_FORMAT_LZNT1)`.
pub fn rtl_lznt1_decompress(data: &[u8]) -> Result<Vec<u8>> {
    winlz_rtl::lznt1_decompress(data)
}

/// `RtlCompressBuffer(COMPRESSION_FORMAT_XPRESS | COMPRESSION_ENGINE_MAXIMUM)`.
pub fn rtl_xpress_compress(data: &[u8]) -> Result<Vec<u8>> {
    winlz_rtl::xpress_compress(data)
}

/// `RtlDecompressBuffer(COMPRESSION_FORMAT_XPRESS)`.
pub fn rtl_xpress_decompress(data: &[u8]) -> Result<Vec<u8>> {
    winlz_rtl::xpress_decompress(data)
}
