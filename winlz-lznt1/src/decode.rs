//! LZNT1 chunk decoder.

use crate::chunk::{CHUNK_SIZE, SymbolSplit, next_chunk};
use winlz_core::buffer::{ByteReader, copy_match};
use winlz_core::error::{Result, WinlzError};

/// Decompress a sequence of LZNT1 chunks.
pub fn decode(input: &[u8]) -> Result<Vec<u8>> {
    let mut reader = ByteReader::new(input);
    let mut out = Vec::with_capacity(input.len().saturating_mul(2));
    let mut chunks = 0usize;

    while !reader.is_empty() {
        let (info, body) = next_chunk(&mut reader)?;
        if info.header.is_compressed() {
            let body_start = info.offset + 2;
            decode_chunk(&input[..body_start + body.len()], body_start, &mut out)?;
        } else {
            out.extend_from_slice(body);
        }
        chunks += 1;
    }

    log::debug!(
        "lznt1: decompressed {} -> {} bytes from {} chunks",
        input.len(),
        out.len(),
        chunks
    );
    Ok(out)
}

/// Decode the compressed chunk body `input[body_start..]` and append it.
///
/// Reading from the full prefix keeps error offsets relative to the stream.
fn decode_chunk(input: &[u8], body_start: usize, out: &mut Vec<u8>) -> Result<()> {
    let mut reader = ByteReader::new(input);
    reader.read_slice(body_start)?;
    let mut chunk = Vec::with_capacity(CHUNK_SIZE);

    'groups: while !reader.is_empty() {
        let flags = reader.read_u8()?;

        for bit in 0..8 {
            if (flags >> bit) & 1 == 0 {
                chunk.push(reader.read_u8()?);
            } else {
                let split = SymbolSplit::at(chunk.len());
                let (offset, length) = split.unpack(reader.read_u16_le()?);
                copy_match(&mut chunk, offset, length)?;
            }

            if chunk.len() > CHUNK_SIZE {
                return Err(WinlzError::invalid_encoding(
                    reader.position(),
                    format!("chunk decodes to more than {} bytes", CHUNK_SIZE),
                ));
            }
            if reader.is_empty() {
                break 'groups;
            }
        }
    }

    out.extend_from_slice(&chunk);
    Ok(())
}
