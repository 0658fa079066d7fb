//! # winlz core
//!
//! Shared building blocks for the winlz codecs:
//!
//! - [`buffer`]: bounds-checked input cursor, overlapping match copy,
//!   placeholder patching
//! - [`crc`]: CRC-32/IEEE for the `AP32` container header
//! - [`traits`]: the [`BlockCodec`] trait every format implements
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Front-end: winlz-cli                                    │
//! ├─────────────────────────────────────────────────────────┤
//! │ Facade: winlz (Format / Backend selection)              │
//! ├─────────────────────────────────────────────────────────┤
//! │ Codecs: winlz-aplib, winlz-lznt1, winlz-xpress,         │
//! │         winlz-rtl (native ntdll backend)                │
//! ├─────────────────────────────────────────────────────────┤
//! │ Primitives: winlz-core (this crate)                     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use winlz_core::buffer::{ByteReader, copy_match};
//! use winlz_core::crc::Crc32;
//!
//! let mut reader = ByteReader::new(&[0x34, 0x12]);
//! assert_eq!(reader.read_u16_le().unwrap(), 0x1234);
//!
//! let mut out = b"ab".to_vec();
//! copy_match(&mut out, 2, 4).unwrap();
//! assert_eq!(out, b"ababab");
//!
//! assert_eq!(Crc32::compute(b"Hello, World!"), 0xEC4AC3D0);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod crc;
pub mod error;
pub mod traits;

// Re-exports for convenience
pub use buffer::{ByteReader, copy_match, patch_u32_le};
pub use crc::Crc32;
pub use error::{Result, WinlzError};
pub use traits::BlockCodec;
