//! Format and backend selectors.

use std::fmt;
use std::str::FromStr;

use winlz_core::error::WinlzError;

/// Compressed data formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Bare aPLib stream. Decompression also accepts an `AP32` header but
    /// does not verify it.
    Aplib,
    /// aPLib stream behind an `AP32` header, verified on decompression.
    AplibSafe,
    /// LZNT1 chunks.
    Lznt1,
    /// Plain LZ77 XPRESS.
    Xpress,
}

impl Format {
    /// Every format, in display order.
    pub const ALL: [Self; 4] = [Self::Aplib, Self::AplibSafe, Self::Lznt1, Self::Xpress];

    /// Short name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Aplib => "aplib",
            Self::AplibSafe => "aplib-safe",
            Self::Lznt1 => "lznt1",
            Self::Xpress => "xpress",
        }
    }

    /// True if `backend` implements this format.
    pub fn supports(self, backend: Backend) -> bool {
        match backend {
            Backend::Rust => true,
            Backend::Native => matches!(self, Self::Lznt1 | Self::Xpress),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = WinlzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aplib" => Ok(Self::Aplib),
            "aplib-safe" | "ap32" => Ok(Self::AplibSafe),
            "lznt1" => Ok(Self::Lznt1),
            "xpress" => Ok(Self::Xpress),
            _ => Err(WinlzError::unsupported_method(s)),
        }
    }
}

/// Implementation used for a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    /// Pure Rust codecs.
    #[default]
    Rust,
    /// `ntdll` on Windows; LZNT1 and XPRESS only.
    Native,
}

impl Backend {
    /// Short name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Rust => "rust",
            Self::Native => "native",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = WinlzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rust" => Ok(Self::Rust),
            "native" | "rtl" => Ok(Self::Native),
            _ => Err(WinlzError::unsupported_method(s)),
        }
    }
}
