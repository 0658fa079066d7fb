//! Hash-chain match finder.
//!
//! `table` maps a rolling hash of three bytes to the latest position with
//! that hash; `window` links each position (modulo the window size) to the
//! previous position sharing its hash. Positions are hashed in blocks of
//! [`FILL_BLOCK`] bytes, always kept at most one block ahead of the cursor,
//! so the window slots for the searchable history are never overwritten.

use crate::level::XpressLevel;

/// Farthest back-reference the format allows.
pub const MAX_OFFSET: usize = 0x2000;

/// Positions hashed per fill.
pub(crate) const FILL_BLOCK: usize = 0x2000;

const WINDOW_SIZE: usize = FILL_BLOCK << 1;
const WINDOW_MASK: usize = WINDOW_SIZE - 1;

const HASH_BITS: u32 = 15;
const HASH_SIZE: usize = 1 << HASH_BITS;
const HASH_MASK: u16 = (HASH_SIZE - 1) as u16;
const HASH_SHIFT: u32 = (HASH_BITS + 2) / 3;

/// Longest match the 32-bit length field can carry.
pub(crate) const MAX_MATCH: usize = (u32::MAX as usize).saturating_add(3);

const NIL: usize = usize::MAX;

#[inline]
fn hash_update(hash: u16, byte: u8) -> u16 {
    ((hash << HASH_SHIFT) ^ byte as u16) & HASH_MASK
}

/// A match found by [`HashChain::find`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Match {
    pub(crate) offset: usize,
    pub(crate) length: usize,
}

/// Per-call hash chains over one input.
pub(crate) struct HashChain {
    level: XpressLevel,
    table: Vec<usize>,
    window: Vec<usize>,
    /// Every position below this one has been hashed.
    filled: usize,
}

impl HashChain {
    pub(crate) fn new(level: XpressLevel) -> Self {
        Self {
            level,
            table: vec![NIL; HASH_SIZE],
            window: vec![NIL; WINDOW_SIZE],
            filled: 0,
        }
    }

    /// Hash positions until `cursor` is covered, one block at a time.
    pub(crate) fn fill_past(&mut self, data: &[u8], cursor: usize) {
        let last = data.len().saturating_sub(2);
        while self.filled <= cursor && self.filled < last {
            self.fill_block(data, last);
        }
    }

    fn fill_block(&mut self, data: &[u8], last: usize) {
        let start = self.filled;
        let end = (start + FILL_BLOCK).min(last);
        let mut hash = hash_update(data[start] as u16, data[start + 1]);

        for pos in start..end {
            hash = hash_update(hash, data[pos + 2]);
            let slot = &mut self.table[hash as usize];
            self.window[pos & WINDOW_MASK] = *slot;
            *slot = pos;
        }

        self.filled = end;
    }

    /// Longest match for `data[cursor..]` along the hash chain.
    ///
    /// `cursor` must be hashed already and have at least three bytes ahead.
    pub(crate) fn find(&self, data: &[u8], cursor: usize) -> Option<Match> {
        debug_assert!(cursor < self.filled && cursor + 2 < data.len());

        let limit = (data.len() - cursor).min(MAX_MATCH);
        let oldest = cursor.saturating_sub(MAX_OFFSET);
        let nice = self.level.nice_length();
        let mut chain = self.level.max_chain();
        let mut best = Match {
            offset: 0,
            length: 0,
        };
        let mut position = self.window[cursor & WINDOW_MASK];

        while chain != 0 && position != NIL && position >= oldest {
            // Equal hashes and equal first two bytes imply an equal third.
            if data[position..position + 2] == data[cursor..cursor + 2] {
                let mut length = 3;
                while length < limit && data[cursor + length] == data[position + length] {
                    length += 1;
                }

                if length > best.length {
                    best = Match {
                        offset: cursor - position,
                        length,
                    };
                    if length >= nice {
                        break;
                    }
                }
            }

            position = self.window[position & WINDOW_MASK];
            chain -= 1;
        }

        (best.length >= 3).then_some(best)
    }
}
