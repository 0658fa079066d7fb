//! aPLib round-trip, header and corrupt-input tests.

use winlz_aplib::{
    AP32_HEADER_SIZE, AplibEncoder, DEFAULT_WINDOW, decode, pack, pack_safe, unpack,
    unpack_strict,
};
use winlz_core::error::WinlzError;

fn generate_random(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut seed: u64 = 0x123456789ABCDEF0;
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    data
}

fn generate_text(size: usize) -> Vec<u8> {
    let text = b"The quick brown fox jumps over the lazy dog. \
                 Pack my box with five dozen liquor jugs. \
                 How vexingly quick daft zebras jump! ";
    text.iter().copied().cycle().take(size).collect()
}

fn roundtrip(data: &[u8]) {
    let packed = pack(data);
    let unpacked = unpack(&packed).unwrap();
    assert_eq!(unpacked.len(), data.len());
    assert_eq!(unpacked, data);
}

#[test]
fn test_roundtrip_small_inputs() {
    roundtrip(b"");
    roundtrip(b"x");
    roundtrip(b"\0");
    roundtrip(b"\0\0");
    roundtrip(b"ab");
    roundtrip(b"aaa");
    roundtrip(b"abababababab");
    roundtrip(b"TOBEORNOTTOBEORTOBEORNOT");
}

#[test]
fn test_roundtrip_zeros_longer_than_window() {
    roundtrip(&vec![0u8; DEFAULT_WINDOW + 777]);
}

#[test]
fn test_roundtrip_identical_bytes_longer_than_window() {
    roundtrip(&vec![0xAAu8; DEFAULT_WINDOW * 2 + 3]);
}

#[test]
fn test_roundtrip_text() {
    roundtrip(&generate_text(20_000));
}

#[test]
fn test_roundtrip_random() {
    for size in [1, 15, 16, 17, 255, 4096] {
        roundtrip(&generate_random(size));
    }
}

#[test]
fn test_roundtrip_mixed() {
    let mut data = generate_random(3000);
    data.extend(generate_text(3000));
    data.extend(vec![0u8; 500]);
    data.extend(generate_random(1000));
    data.extend_from_slice(&data.clone()[..2000]);
    roundtrip(&data);
}

#[test]
fn test_compresses_repetitive_data() {
    let data = generate_text(10_000);
    let packed = pack(&data);
    assert!(packed.len() < data.len() / 10, "{} bytes", packed.len());
}

#[test]
fn test_small_window_roundtrip() {
    let data = generate_text(5000);
    for window in [1, 2, 16, 100, 1 << 16] {
        let packed = AplibEncoder::with_window(window).encode(&data);
        assert_eq!(decode(&packed).unwrap(), data, "window {}", window);
    }
}

#[test]
fn test_safe_strict_roundtrip() {
    for data in [generate_text(3000), generate_random(700), Vec::new()] {
        let safe = pack_safe(&data);
        assert_eq!(unpack_strict(&safe).unwrap(), data);
        assert_eq!(unpack(&safe).unwrap(), data);
    }
}

#[test]
fn test_strict_detects_every_payload_byte_flip() {
    let data = generate_text(600);
    let safe = pack_safe(&data);

    for i in AP32_HEADER_SIZE..safe.len() {
        let mut corrupt = safe.clone();
        corrupt[i] ^= 0x01;
        let result = unpack_strict(&corrupt);
        assert!(
            matches!(result, Err(WinlzError::IntegrityMismatch { .. })),
            "byte {}: {:?}",
            i,
            result.map(|v| v.len())
        );
    }
}

#[test]
fn test_strict_detects_size_field_changes() {
    let data = generate_text(600);
    let safe = pack_safe(&data);

    // Original size off by one.
    let mut corrupt = safe.clone();
    corrupt[16] = corrupt[16].wrapping_add(1);
    assert!(matches!(
        unpack_strict(&corrupt),
        Err(WinlzError::IntegrityMismatch {
            what: "original size",
            ..
        })
    ));

    // Declared packed size beyond the input.
    let mut corrupt = safe.clone();
    corrupt[8] = corrupt[8].wrapping_add(1);
    assert!(matches!(
        unpack_strict(&corrupt),
        Err(WinlzError::MalformedHeader { .. })
    ));
}

#[test]
fn test_strict_without_header_is_plain_decode() {
    let data = generate_text(300);
    assert_eq!(unpack_strict(&pack(&data)).unwrap(), data);
}

#[test]
fn test_truncated_stream_rejected() {
    for data in [generate_text(2000), generate_random(300), b"ab".to_vec()] {
        let packed = pack(&data);
        let result = unpack(&packed[..packed.len() - 1]);
        assert!(result.is_err(), "{} bytes", data.len());
        assert!(result.unwrap_err().is_data_error());
    }
}

#[test]
fn test_truncated_safe_stream_rejected() {
    let safe = pack_safe(&generate_text(1000));
    assert!(matches!(
        unpack(&safe[..safe.len() - 1]),
        Err(WinlzError::MalformedHeader { .. })
    ));
}

#[test]
fn test_empty_input_rejected() {
    assert!(matches!(
        unpack(&[]),
        Err(WinlzError::TruncatedInput { .. })
    ));
}
