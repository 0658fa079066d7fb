//! LZNT1 chunk encoder.

use crate::chunk::{CHUNK_SIZE, ChunkHeader, SymbolSplit};
use crate::dictionary::PrefixDictionary;

/// Compress `input` into a sequence of LZNT1 chunks.
///
/// Empty input produces an empty stream.
pub fn encode(input: &[u8]) -> Vec<u8> {
    let chunk_count = input.len().div_ceil(CHUNK_SIZE);
    let mut out = Vec::with_capacity(input.len() + 2 * chunk_count);
    let mut dict = PrefixDictionary::new();
    let mut stored = 0;
    let mut previous: &[u8] = &[];

    for chunk in input.chunks(CHUNK_SIZE) {
        dict.reset(previous);
        if !encode_chunk(chunk, &mut dict, &mut out) {
            stored += 1;
        }
        previous = chunk;
    }

    log::debug!(
        "lznt1: compressed {} -> {} bytes in {} chunks ({} stored)",
        input.len(),
        out.len(),
        chunk_count,
        stored
    );
    out
}

/// Append one chunk to `out`. Returns `false` if it had to be stored raw.
fn encode_chunk(chunk: &[u8], dict: &mut PrefixDictionary, out: &mut Vec<u8>) -> bool {
    let header_at = out.len();
    out.extend_from_slice(&[0, 0]);
    let body_start = out.len();
    let mut cursor = 0;

    'groups: while cursor < chunk.len() {
        let flags_at = out.len();
        out.push(0);
        let mut flags = 0u8;

        for bit in 0..8 {
            if cursor >= chunk.len() {
                break;
            }

            match dict.find(chunk, cursor) {
                Some(found) => {
                    let symbol = SymbolSplit::at(cursor).pack(found.offset, found.length);
                    out.extend_from_slice(&symbol.to_le_bytes());
                    flags |= 1 << bit;
                    cursor += found.length;
                }
                None => {
                    out.push(chunk[cursor]);
                    cursor += 1;
                }
            }

            if out.len() - body_start >= chunk.len() {
                break 'groups;
            }
        }

        out[flags_at] = flags;
    }

    let body_len = out.len() - body_start;
    if cursor < chunk.len() || body_len >= chunk.len() {
        out.truncate(header_at);
        out.extend_from_slice(&ChunkHeader::stored(chunk.len()).to_le_bytes());
        out.extend_from_slice(chunk);
        return false;
    }

    out[header_at..body_start].copy_from_slice(&ChunkHeader::compressed(body_len).to_le_bytes());
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode;

    #[test]
    fn test_empty() {
        assert!(encode(b"").is_empty());
    }

    #[test]
    fn test_short_input_stored() {
        // Nothing to match: the chunk is kept raw.
        assert_eq!(encode(b"abc"), [0x02, 0x30, b'a', b'b', b'c']);
    }

    #[test]
    fn test_run_layout() {
        // 'a' literal, then one symbol covering the other 19 bytes at
        // offset 1: split at pos 1 is 4/12 bits, symbol = 19 - 3 = 0x0010.
        // Body is four bytes, so the header size field holds 3.
        let out = encode(&[b'a'; 20]);
        assert_eq!(out, [0x03, 0xB0, 0b0000_0010, b'a', 0x10, 0x00]);
        assert_eq!(decode(&out).unwrap(), [b'a'; 20]);
    }

    #[test]
    fn test_flag_byte_groups_eight_symbols() {
        let data = b"abcdefghij";
        let mut input = data.to_vec();
        input.extend_from_slice(data);
        input.extend_from_slice(data);
        let out = encode(&input);
        // Ten literals need two flag bytes, then one match.
        assert_eq!(out[2], 0x00);
        assert_eq!(out[11], 0b0000_0100);
        assert_eq!(decode(&out).unwrap(), input);
    }
}
