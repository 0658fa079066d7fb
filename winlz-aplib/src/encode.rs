//! aPLib stream encoder.
//!
//! Greedy: at every cursor position take the longest windowed match and
//! emit the cheapest opcode that can express it.
//!
//! | Bits   | Opcode      | Payload                                        |
//! |--------|-------------|------------------------------------------------|
//! | `0`    | literal     | 1 raw byte                                     |
//! | `111`  | single byte | 4-bit offset, 0 meaning a zero byte            |
//! | `110`  | short block | byte `offset << 1 \| (length - 2)`             |
//! | `10`   | block       | gamma high, offset low byte, gamma length      |
//! | `110`  | end marker  | byte `0`                                       |
//!
//! The first input byte is copied verbatim before any tag byte.

use crate::bits::TagWriter;
use crate::matcher::{DEFAULT_WINDOW, Match, find_longest};

/// Amount subtracted from a block length before it is gamma coded.
///
/// The decoder adds the same amount back from the offset alone: short offsets
/// are covered by the short-block opcode for lengths 2..=3, long offsets never
/// pay off for the shortest lengths.
pub fn length_delta(offset: usize) -> u32 {
    if !(0x80..0x7D00).contains(&offset) {
        2
    } else if offset >= 0x500 {
        1
    } else {
        0
    }
}

/// aPLib compressor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AplibEncoder {
    window: usize,
}

impl AplibEncoder {
    /// Encoder with the default 8 KiB window.
    pub fn new() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }

    /// Encoder searching `window` bytes back (at least 1).
    pub fn with_window(window: usize) -> Self {
        Self {
            window: window.max(1),
        }
    }

    /// Match window in bytes.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Encode `input` into a bare aPLib stream.
    ///
    /// An empty input yields the lone end marker `[0xC0, 0x00]`.
    pub fn encode(&self, input: &[u8]) -> Vec<u8> {
        let mut state = EncodeState::new(input);

        if !input.is_empty() {
            state.literal(false);
        }

        while state.cursor < input.len() {
            let found = find_longest(input, state.cursor, self.window);
            match found {
                None if input[state.cursor] == 0 => state.single_byte(0),
                None => state.literal(true),
                Some(Match { offset, length: 1 }) if offset < 16 => state.single_byte(offset),
                Some(Match { offset, length }) if (2..=3).contains(&length) && offset <= 127 => {
                    state.short_block(offset, length)
                }
                Some(Match { offset, length }) if length > 3 && offset >= 2 => {
                    state.block(offset, length)
                }
                Some(_) => state.literal(true),
            }
        }

        let out = state.end();
        log::debug!(
            "aplib: packed {} -> {} bytes (window {})",
            input.len(),
            out.len(),
            self.window
        );
        out
    }
}

impl Default for AplibEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-call encoder state.
struct EncodeState<'a> {
    input: &'a [u8],
    cursor: usize,
    bits: TagWriter,
    /// Offset of the most recent block or short block.
    last_offset: usize,
    /// True until a block or short block is emitted after the latest literal.
    /// Mirrors the decoder's low-watermark flag being clear.
    after_literal: bool,
}

impl<'a> EncodeState<'a> {
    fn new(input: &'a [u8]) -> Self {
        // Worst case is nine bits per byte plus tags and the end marker.
        let capacity = input.len() + input.len() / 8 + 4;
        Self {
            input,
            cursor: 0,
            bits: TagWriter::with_capacity(capacity),
            last_offset: 0,
            after_literal: true,
        }
    }

    fn literal(&mut self, marker: bool) {
        if marker {
            self.bits.write_bit(false);
        }
        self.bits.write_byte(self.input[self.cursor]);
        self.cursor += 1;
        self.after_literal = true;
    }

    fn single_byte(&mut self, offset: usize) {
        debug_assert!(offset < 16, "single byte offset {}", offset);

        self.bits.write_bits(&[true, true, true]);
        self.bits.write_fixed(offset as u32, 4);
        self.cursor += 1;
        self.after_literal = true;
    }

    fn short_block(&mut self, offset: usize, length: usize) {
        debug_assert!((1..=127).contains(&offset) && (2..=3).contains(&length));

        self.bits.write_bits(&[true, true, false]);
        self.bits.write_byte(((offset << 1) | (length - 2)) as u8);
        self.cursor += length;
        self.last_offset = offset;
        self.after_literal = false;
    }

    fn block(&mut self, offset: usize, length: usize) {
        debug_assert!(offset >= 2 && length >= 4);

        self.bits.write_bits(&[true, false]);

        if self.after_literal && self.last_offset == offset {
            self.bits.write_gamma(2);
            self.bits.write_gamma(length as u32);
        } else {
            let high = (offset >> 8) as u32 + 2 + self.after_literal as u32;
            self.bits.write_gamma(high);
            self.bits.write_byte(offset as u8);
            self.bits.write_gamma(length as u32 - length_delta(offset));
        }

        self.cursor += length;
        self.last_offset = offset;
        self.after_literal = false;
    }

    fn end(mut self) -> Vec<u8> {
        self.bits.write_bits(&[true, true, false]);
        self.bits.write_byte(0);
        self.bits.finish()
    }
}
