//! Per-chunk prefix dictionary.
//!
//! Positions are bucketed by the 16-bit value of the two bytes starting
//! there. `head` holds the most recent position of each bucket and `prev`
//! links every position to the previous one in its bucket, so walking a
//! bucket visits candidates nearest first. Positions are inserted as the
//! encoder's cursor passes them, which keeps every candidate behind the
//! cursor.

use crate::chunk::{CHUNK_SIZE, MIN_MATCH, SymbolSplit};

const NIL: u16 = u16::MAX;

/// Bucketed position table, reused chunk after chunk within one call.
pub(crate) struct PrefixDictionary {
    head: Vec<u16>,
    prev: Vec<u16>,
    /// Next chunk position to insert.
    filled: usize,
}

/// Longest match found at a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Match {
    pub(crate) offset: usize,
    pub(crate) length: usize,
}

#[inline]
fn prefix(chunk: &[u8], pos: usize) -> usize {
    chunk[pos] as usize | (chunk[pos + 1] as usize) << 8
}

impl PrefixDictionary {
    pub(crate) fn new() -> Self {
        Self {
            head: vec![NIL; 1 << 16],
            prev: vec![NIL; CHUNK_SIZE],
            filled: 0,
        }
    }

    /// Forget the previous chunk. Only the buckets it touched are cleared.
    pub(crate) fn reset(&mut self, previous: &[u8]) {
        for pos in 0..self.filled.min(previous.len().saturating_sub(1)) {
            self.head[prefix(previous, pos)] = NIL;
        }
        self.filled = 0;
    }

    /// Insert every position before `cursor` not yet in the table.
    fn fill_to(&mut self, chunk: &[u8], cursor: usize) {
        let end = cursor.min(chunk.len().saturating_sub(1));
        while self.filled < end {
            let key = prefix(chunk, self.filled);
            self.prev[self.filled] = self.head[key];
            self.head[key] = self.filled as u16;
            self.filled += 1;
        }
    }

    /// Longest match of at least three bytes for `chunk[cursor..]`.
    ///
    /// Candidates are scanned nearest first; a farther candidate replaces
    /// the best so far only if strictly longer. Matches may run past the
    /// cursor (the decoder copies byte by byte).
    pub(crate) fn find(&mut self, chunk: &[u8], cursor: usize) -> Option<Match> {
        self.fill_to(chunk, cursor);

        let split = SymbolSplit::at(cursor);
        let max_length = split.max_length().min(chunk.len() - cursor);
        if cursor == 0 || max_length < MIN_MATCH {
            return None;
        }

        let ahead = &chunk[cursor..cursor + max_length];
        let mut best = Match {
            offset: 0,
            length: 0,
        };
        let mut candidate = self.head[prefix(chunk, cursor)];

        while candidate != NIL {
            let start = candidate as usize;
            let length = ahead
                .iter()
                .enumerate()
                .take_while(|&(i, &b)| chunk[start + i] == b)
                .count();

            if length > best.length {
                best = Match {
                    offset: cursor - start,
                    length,
                };
                if length == max_length {
                    break;
                }
            }
            candidate = self.prev[start];
        }

        (best.length >= MIN_MATCH).then_some(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_at_start() {
        let mut dict = PrefixDictionary::new();
        assert_eq!(dict.find(b"aaaaaa", 0), None);
    }

    #[test]
    fn test_overlapping_run() {
        let mut dict = PrefixDictionary::new();
        let chunk = [7u8; 100];
        assert_eq!(
            dict.find(&chunk, 1),
            Some(Match {
                offset: 1,
                length: 99
            })
        );
    }

    #[test]
    fn test_nearest_of_equal_length() {
        let mut dict = PrefixDictionary::new();
        let chunk = b"abcXabcYabcZ";
        assert_eq!(dict.find(chunk, 8), Some(Match { offset: 4, length: 3 }));
    }

    #[test]
    fn test_longer_farther_match_wins() {
        let mut dict = PrefixDictionary::new();
        let chunk = b"abcdeXabcYabcde";
        assert_eq!(dict.find(chunk, 10), Some(Match { offset: 10, length: 5 }));
    }

    #[test]
    fn test_two_byte_match_rejected() {
        let mut dict = PrefixDictionary::new();
        assert_eq!(dict.find(b"abXab", 3), None);
    }

    #[test]
    fn test_length_capped_by_split() {
        // Past position 2048 the length field has four bits.
        let mut dict = PrefixDictionary::new();
        let chunk = vec![0u8; 3000];
        let found = dict.find(&chunk, 2500).unwrap();
        assert_eq!(found.length, 18);
        assert_eq!(found.offset, 1);
    }

    #[test]
    fn test_reset_clears_buckets() {
        let mut dict = PrefixDictionary::new();
        let first = b"xyzxyz";
        assert!(dict.find(first, 3).is_some());
        dict.reset(first);
        // Same prefix in the next chunk must not see stale positions.
        let second = b"xyQ";
        assert_eq!(dict.find(second, 2), None);
        assert!(dict.head.iter().filter(|&&h| h != NIL).count() <= 2);
    }
}
