//! XPRESS decoder.

use winlz_core::buffer::{ByteReader, copy_match};
use winlz_core::error::{Result, WinlzError};

/// True if every set bit of `x` is above every clear bit (`1..10..0`,
/// including all ones and all zeros).
pub fn set_bits_are_highest(x: u32) -> bool {
    let inverted = !x;
    inverted.wrapping_add(1) & inverted == 0
}

/// Flags of the current word. `next` is the flag of the upcoming symbol;
/// `rest` holds the remaining flags at the top followed by a single marker
/// bit, so it reaches zero exactly when the word is used up.
struct FlagBits {
    next: bool,
    rest: u32,
}

impl FlagBits {
    fn load(word: u32) -> Self {
        Self {
            next: word & 0x8000_0000 != 0,
            rest: (word << 1) | 1,
        }
    }

    /// Move to the next flag. Returns `false` once the word is used up.
    fn advance(&mut self) -> bool {
        self.next = self.rest & 0x8000_0000 != 0;
        self.rest <<= 1;
        self.rest != 0
    }

    /// The flags not consumed when the input ran out must all be set.
    fn valid_tail(&self) -> bool {
        self.next && set_bits_are_highest(self.rest)
    }
}

/// Decompress an XPRESS stream. Empty input gives empty output.
pub fn decode(input: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(input.len().saturating_mul(3));
    if input.is_empty() {
        return Ok(out);
    }

    let mut reader = ByteReader::new(input);
    let mut half_byte: Option<u8> = None;

    loop {
        let word = reader.read_u32_le()?;
        if reader.is_empty() {
            // A stream whose symbol count is a multiple of 32 ends with a
            // flag word of unused, set bits.
            if word == u32::MAX {
                break;
            }
            return Err(WinlzError::invalid_encoding(
                reader.position() - 4,
                format!("final flag word {:#010x} has no symbols", word),
            ));
        }

        let mut flags = FlagBits::load(word);
        loop {
            if flags.next {
                let (offset, length) = read_match(&mut reader, &mut half_byte)?;
                copy_match(&mut out, offset, length)?;
            } else {
                out.push(reader.read_u8()?);
            }

            let more = flags.advance();
            if reader.is_empty() {
                if !flags.valid_tail() {
                    return Err(WinlzError::invalid_encoding(
                        reader.position(),
                        "input ends while flags expect a literal",
                    ));
                }
                log::debug!(
                    "xpress: decompressed {} -> {} bytes",
                    input.len(),
                    out.len()
                );
                return Ok(out);
            }
            if !more {
                break;
            }
        }
    }

    log::debug!(
        "xpress: decompressed {} -> {} bytes",
        input.len(),
        out.len()
    );
    Ok(out)
}

/// Read a match symbol and any extra length fields.
fn read_match(reader: &mut ByteReader<'_>, half_byte: &mut Option<u8>) -> Result<(usize, usize)> {
    let symbol = reader.read_u16_le()?;
    let offset = (symbol >> 3) as usize + 1;
    let mut length = (symbol & 0x7) as usize;

    if length == 0x7 {
        length = match half_byte.take() {
            Some(shared) => (shared >> 4) as usize,
            None => {
                let byte = reader.read_u8()?;
                *half_byte = Some(byte);
                (byte & 0xF) as usize
            }
        };

        if length == 0xF {
            length = reader.read_u8()? as usize;

            if length == 0xFF {
                let at = reader.position();
                length = reader.read_u16_le()? as usize;
                if length == 0 {
                    length = reader.read_u32_le()? as usize;
                }
                length = length.checked_sub(0xF + 0x7).ok_or_else(|| {
                    WinlzError::invalid_encoding(at, format!("extended length {} too small", length))
                })?;
            }
            length += 0xF;
        }
        length += 0x7;
    }

    Ok((offset, length + 0x3))
}
