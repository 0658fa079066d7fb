//! Error types for winlz codecs.
//!
//! Every decoder fails fast on the first structural violation it meets and
//! reports it through one of the variants below. Compressors are total over
//! their input; the only compressor error in practice is
//! [`WinlzError::UnsupportedPlatform`] from the native backend.

use std::io;
use thiserror::Error;

/// The main error type for winlz operations.
#[derive(Debug, Error)]
pub enum WinlzError {
    /// I/O error from the file layer (CLI only; codecs never do I/O).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Container header is present but its magic/size fields are inconsistent.
    #[error("Malformed header: {message}")]
    MalformedHeader {
        /// Description of the header error.
        message: String,
    },

    /// A size or CRC recorded in the container header does not match the data.
    #[error("Integrity mismatch in {what}: expected {expected:#x}, found {actual:#x}")]
    IntegrityMismatch {
        /// Which field failed verification.
        what: &'static str,
        /// Value recorded in the header.
        expected: u64,
        /// Value computed from the data.
        actual: u64,
    },

    /// Attempted to read past the end of the compressed input.
    #[error("Truncated input at offset {offset}: need {needed} more byte(s)")]
    TruncatedInput {
        /// Input offset where the read was attempted.
        offset: usize,
        /// Number of bytes the read required.
        needed: usize,
    },

    /// Back-reference points before the start of the output.
    #[error("Invalid back-reference offset {offset}: only {available} byte(s) of output")]
    InvalidOffset {
        /// Decoded back-reference distance.
        offset: usize,
        /// Output bytes available at that point.
        available: usize,
    },

    /// A field combination the format grammar does not allow.
    #[error("Invalid encoding at offset {offset}: {message}")]
    InvalidEncoding {
        /// Input offset where the violation was detected.
        offset: usize,
        /// Description of the violation.
        message: String,
    },

    /// Format, backend, or level name that no codec provides.
    #[error("Unsupported compression method: {method}")]
    UnsupportedMethod {
        /// The requested method.
        method: String,
    },

    /// The native compression backend is not available on this platform.
    #[error("The {backend} backend is not supported on this operating system")]
    UnsupportedPlatform {
        /// Name of the unavailable backend.
        backend: &'static str,
    },

    /// The native compression backend returned a failure status.
    #[error("Native backend failed with NTSTATUS {status:#010x}")]
    NativeFailure {
        /// NTSTATUS value.
        status: u32,
    },
}

/// Result type alias for winlz operations.
pub type Result<T> = std::result::Result<T, WinlzError>;

impl WinlzError {
    /// Create a malformed header error.
    pub fn malformed_header(message: impl Into<String>) -> Self {
        Self::MalformedHeader {
            message: message.into(),
        }
    }

    /// Create an integrity mismatch error.
    pub fn integrity(what: &'static str, expected: u64, actual: u64) -> Self {
        Self::IntegrityMismatch {
            what,
            expected,
            actual,
        }
    }

    /// Create a truncated input error.
    pub fn truncated(offset: usize, needed: usize) -> Self {
        Self::TruncatedInput { offset, needed }
    }

    /// Create an invalid offset error.
    pub fn invalid_offset(offset: usize, available: usize) -> Self {
        Self::InvalidOffset { offset, available }
    }

    /// Create an invalid encoding error.
    pub fn invalid_encoding(offset: usize, message: impl Into<String>) -> Self {
        Self::InvalidEncoding {
            offset,
            message: message.into(),
        }
    }

    /// Create an unsupported method error.
    pub fn unsupported_method(method: impl Into<String>) -> Self {
        Self::UnsupportedMethod {
            method: method.into(),
        }
    }

    /// Create an unsupported platform error.
    pub fn unsupported_platform(backend: &'static str) -> Self {
        Self::UnsupportedPlatform { backend }
    }

    /// True for errors that indicate damaged or non-conforming compressed data.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedHeader { .. }
                | Self::IntegrityMismatch { .. }
                | Self::TruncatedInput { .. }
                | Self::InvalidOffset { .. }
                | Self::InvalidEncoding { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WinlzError::integrity("packed crc32", 0x12345678, 0xDEADBEEF);
        assert!(err.to_string().contains("packed crc32"));
        assert!(err.to_string().contains("0xdeadbeef"));

        let err = WinlzError::truncated(17, 2);
        assert!(err.to_string().contains("offset 17"));

        let err = WinlzError::unsupported_platform("RtlCompressBuffer");
        assert!(err.to_string().contains("RtlCompressBuffer"));
    }

    #[test]
    fn test_data_error_classification() {
        assert!(WinlzError::invalid_offset(5, 2).is_data_error());
        assert!(WinlzError::invalid_encoding(0, "bad").is_data_error());
        assert!(!WinlzError::unsupported_platform("native").is_data_error());
        assert!(!WinlzError::unsupported_method("lzx").is_data_error());
        assert!(!WinlzError::NativeFailure { status: 0xC0000242 }.is_data_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: WinlzError = io_err.into();
        assert!(matches!(err, WinlzError::Io(_)));
    }
}
