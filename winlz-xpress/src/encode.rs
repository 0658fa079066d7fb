//! XPRESS encoder.
//!
//! ```text
//! [flags u32] sym sym ... sym [flags u32] sym ...
//! ```
//!
//! Each flag word describes the next 32 symbols, most significant bit
//! first: `0` is a literal byte, `1` a match. A match is a `u16`
//! `(offset - 1) << 3 | min(length - 3, 7)`, followed for long matches by
//! extra length fields of growing width:
//!
//! | Remaining length      | Extra field                                    |
//! |-----------------------|------------------------------------------------|
//! | `length - 3 >= 7`     | nibble, two matches share one byte (low first) |
//! | `... - 7 >= 15`       | one byte                                       |
//! | `... - 15 >= 255`     | `u16` total, or `0` then a `u32` total         |
//!
//! The unused low bits of the last flag word are set, so the decoder sees a
//! run of matches that ends with the input.

use crate::dictionary::HashChain;
use crate::level::XpressLevel;
use winlz_core::buffer::patch_u32_le;

/// Compress `input` at `level`. Empty input gives empty output.
pub fn encode(input: &[u8], level: XpressLevel) -> Vec<u8> {
    if input.is_empty() {
        return Vec::new();
    }

    let mut state = EncodeState::new(input.len());
    let mut chain = HashChain::new(level);
    let mut cursor = 0;

    state.literal(input[cursor]);
    cursor += 1;

    while cursor + 2 < input.len() {
        chain.fill_past(input, cursor);
        match chain.find(input, cursor) {
            Some(found) => {
                state.matched(found.offset, found.length);
                cursor += found.length;
            }
            None => {
                state.literal(input[cursor]);
                cursor += 1;
            }
        }
    }

    for &byte in &input[cursor..] {
        state.literal(byte);
    }

    let out = state.finish();
    log::debug!(
        "xpress: compressed {} -> {} bytes (level {})",
        input.len(),
        out.len(),
        level.level()
    );
    out
}

/// Output buffer with the pending flag word.
struct EncodeState {
    out: Vec<u8>,
    flags: u32,
    /// Symbols recorded in `flags`.
    count: u32,
    /// Output index reserved for `flags`.
    flags_at: usize,
    /// Byte whose high nibble is still free for the next long match.
    half_byte: Option<usize>,
}

impl EncodeState {
    fn new(input_len: usize) -> Self {
        let mut out = Vec::with_capacity(input_len + 4 + 4 * (input_len / 32));
        out.extend_from_slice(&[0; 4]);
        Self {
            out,
            flags: 0,
            count: 0,
            flags_at: 0,
            half_byte: None,
        }
    }

    fn push_flag(&mut self, matched: bool) {
        self.flags = (self.flags << 1) | matched as u32;
        self.count += 1;
        if self.count == 32 {
            patch_u32_le(&mut self.out, self.flags_at, self.flags);
            self.count = 0;
            self.flags_at = self.out.len();
            self.out.extend_from_slice(&[0; 4]);
        }
    }

    fn literal(&mut self, byte: u8) {
        self.out.push(byte);
        self.push_flag(false);
    }

    fn matched(&mut self, offset: usize, length: usize) {
        debug_assert!((1..=crate::MAX_OFFSET).contains(&offset) && length >= 3);

        let mut rest = length - 3;
        let symbol = ((offset - 1) << 3) as u16 | rest.min(7) as u16;
        self.out.extend_from_slice(&symbol.to_le_bytes());

        if rest >= 7 {
            rest -= 7;
            let nibble = rest.min(15) as u8;
            match self.half_byte.take() {
                Some(at) => self.out[at] |= nibble << 4,
                None => {
                    self.half_byte = Some(self.out.len());
                    self.out.push(nibble);
                }
            }

            if rest >= 15 {
                rest -= 15;
                self.out.push(rest.min(255) as u8);

                if rest >= 255 {
                    let total = rest + 15 + 7;
                    if total <= 0xFFFF {
                        self.out.extend_from_slice(&(total as u16).to_le_bytes());
                    } else {
                        self.out.extend_from_slice(&[0, 0]);
                        self.out.extend_from_slice(&(total as u32).to_le_bytes());
                    }
                }
            }
        }

        self.push_flag(true);
    }

    fn finish(mut self) -> Vec<u8> {
        let flags = if self.count == 0 {
            u32::MAX
        } else {
            let free = 32 - self.count;
            (self.flags << free) | ((1 << free) - 1)
        };
        patch_u32_le(&mut self.out, self.flags_at, flags);
        self.out
    }
}
