//! Native backend tests.
//!
//! On Windows the native and pure Rust codecs must read each other's
//! output. Elsewhere every call must report the missing backend.

use winlz_core::error::WinlzError;
use winlz_rtl::{
    NativeFormat, RtlCodec, lznt1_compress, lznt1_decompress, xpress_compress, xpress_decompress,
};

fn generate_text(size: usize) -> Vec<u8> {
    let text = b"The quick brown fox jumps over the lazy dog. ";
    text.iter().cycle().take(size).copied().collect()
}

#[cfg(windows)]
mod native {
    use super::*;
    use winlz_core::traits::BlockCodec;

    #[test]
    fn test_lznt1_native_to_rust() {
        let data = generate_text(20000);
        let packed = lznt1_compress(&data).unwrap();
        assert!(packed.len() < data.len());
        assert_eq!(winlz_lznt1::decompress(&packed).unwrap(), data);
    }

    #[test]
    fn test_lznt1_rust_to_native() {
        let data = generate_text(20000);
        let packed = winlz_lznt1::compress(&data);
        assert_eq!(lznt1_decompress(&packed).unwrap(), data);
    }

    #[test]
    fn test_xpress_native_to_rust() {
        let data = generate_text(20000);
        let packed = xpress_compress(&data).unwrap();
        assert_eq!(winlz_xpress::decompress(&packed).unwrap(), data);
    }

    #[test]
    fn test_xpress_rust_to_native() {
        let data = generate_text(5000);
        let packed = winlz_xpress::compress(&data);
        assert_eq!(xpress_decompress(&packed).unwrap(), data);
    }

    #[test]
    fn test_codec_verified() {
        let data = generate_text(3000);
        for format in [NativeFormat::Lznt1, NativeFormat::Xpress] {
            let codec = RtlCodec::new(format);
            codec.compress_verified(&data).unwrap();
        }
    }

    #[test]
    fn test_garbage_reports_status() {
        let result = lznt1_decompress(&[0xFF, 0xBF, 0x00]);
        assert!(matches!(result, Err(WinlzError::NativeFailure { .. })));
    }
}

#[cfg(not(windows))]
#[test]
fn test_every_entry_point_unsupported() {
    let data = generate_text(100);
    let calls: [fn(&[u8]) -> winlz_core::error::Result<Vec<u8>>; 4] = [
        lznt1_compress,
        lznt1_decompress,
        xpress_compress,
        xpress_decompress,
    ];
    for call in calls {
        assert!(matches!(
            call(&data),
            Err(WinlzError::UnsupportedPlatform { backend: "rtl" })
        ));
    }
}

#[cfg(not(windows))]
#[test]
fn test_codec_unsupported() {
    use winlz_core::traits::BlockCodec;

    let codec = RtlCodec::new(NativeFormat::Lznt1);
    assert!(matches!(
        codec.compress_verified(b"abc"),
        Err(WinlzError::UnsupportedPlatform { .. })
    ));
}
