//! Windowed exhaustive match finder.
//!
//! For the bytes at `cursor`, find the longest prefix that occurs entirely
//! inside the preceding window, preferring for every prefix length the
//! occurrence nearest to the cursor. The search grows the prefix one byte at
//! a time and stops at the first length that no longer occurs.
//!
//! Since the nearest occurrence of an `n + 1` byte prefix is also an
//! occurrence of the `n` byte prefix, each step resumes scanning downward
//! from the previous hit instead of from the window end. Worst case is still
//! O(window × match length) per call; long runs of one byte value are the
//! expensive input.

/// Default window: the 8 KiB preceding the cursor.
pub const DEFAULT_WINDOW: usize = 8 * 1024;

/// A back-reference candidate. `offset` counts back from the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Distance from the cursor to the start of the earlier occurrence.
    pub offset: usize,
    /// Number of matching bytes.
    pub length: usize,
}

/// Find the longest match for `input[cursor..]` within the `window` bytes
/// before `cursor`. Returns `None` when even the first byte does not occur.
///
/// Matches never overlap the cursor, so `offset >= length` always holds.
pub fn find_longest(input: &[u8], cursor: usize, window: usize) -> Option<Match> {
    let start = cursor.saturating_sub(window);
    let history = &input[start..cursor];
    let ahead = &input[cursor..];

    let mut best = None;
    let mut last_hit = history.len();

    for length in 1..=ahead.len().min(history.len()) {
        let top = last_hit.min(history.len() - length);
        let needle = &ahead[..length];

        match (0..=top).rev().find(|&p| &history[p..p + length] == needle) {
            Some(p) => {
                last_hit = p;
                best = Some(Match {
                    offset: history.len() - p,
                    length,
                });
            }
            None => break,
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_history() {
        assert_eq!(find_longest(b"abc", 0, DEFAULT_WINDOW), None);
    }

    #[test]
    fn test_byte_not_seen() {
        assert_eq!(find_longest(b"abcd", 3, DEFAULT_WINDOW), None);
    }

    #[test]
    fn test_nearest_single_byte() {
        // 'a' occurs at 0 and 2; the nearest wins.
        let m = find_longest(b"axaz", 3, DEFAULT_WINDOW);
        assert_eq!(m, None);
        let m = find_longest(b"axay", 2, DEFAULT_WINDOW).unwrap();
        assert_eq!(m, Match { offset: 2, length: 1 });
    }

    #[test]
    fn test_longer_match_further_back() {
        // "ab" nearest at 4 ("abx"), but "abc" only at 0.
        let data = b"abcxabxabc";
        let m = find_longest(data, 7, DEFAULT_WINDOW).unwrap();
        assert_eq!(m, Match { offset: 7, length: 3 });
    }

    #[test]
    fn test_match_stays_inside_history() {
        // A run can only reference bytes before the cursor.
        let data = [0u8; 16];
        let m = find_longest(&data, 1, DEFAULT_WINDOW).unwrap();
        assert_eq!(m, Match { offset: 1, length: 1 });
        let m = find_longest(&data, 4, DEFAULT_WINDOW).unwrap();
        assert_eq!(m, Match { offset: 4, length: 4 });
        // Six zeros remain ahead; their nearest full occurrence starts at 4.
        let m = find_longest(&data, 10, DEFAULT_WINDOW).unwrap();
        assert_eq!(m, Match { offset: 6, length: 6 });
    }

    #[test]
    fn test_window_limit() {
        let mut data = b"needle".to_vec();
        data.extend(std::iter::repeat_n(b'.', 20));
        data.extend_from_slice(b"needle");
        let cursor = data.len() - 6;

        let m = find_longest(&data, cursor, 64).unwrap();
        assert_eq!(m, Match { offset: 26, length: 6 });

        // Window too short to reach the first "needle".
        assert_eq!(find_longest(&data, cursor, 16), None);
    }

    #[test]
    fn test_agrees_with_naive_search() {
        let mut seed = 0x2545F4914F6CDD1Du64;
        let data: Vec<u8> = (0..600)
            .map(|_| {
                seed ^= seed << 13;
                seed ^= seed >> 7;
                seed ^= seed << 17;
                b"abcab"[(seed % 5) as usize]
            })
            .collect();

        for cursor in (0..data.len()).step_by(7) {
            let expected = naive(&data, cursor, 128);
            assert_eq!(find_longest(&data, cursor, 128), expected, "cursor {}", cursor);
        }
    }

    /// Restart the nearest-occurrence scan from the window end for every length.
    fn naive(input: &[u8], cursor: usize, window: usize) -> Option<Match> {
        let start = cursor.saturating_sub(window);
        let history = &input[start..cursor];
        let mut best = None;
        for length in 1..=input.len() - cursor {
            if length > history.len() {
                break;
            }
            let word = &input[cursor..cursor + length];
            match (0..=history.len() - length)
                .rev()
                .find(|&p| &history[p..p + length] == word)
            {
                Some(p) => {
                    best = Some(Match {
                        offset: history.len() - p,
                        length,
                    })
                }
                None => break,
            }
        }
        best
    }
}
