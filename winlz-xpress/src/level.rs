//! XPRESS compression levels.

/// Match-finder effort (1-8).
///
/// Each level pairs a "nice length", at which the search accepts a match
/// without looking further, with a cap on the number of hash-chain links
/// followed per position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct XpressLevel(u8);

impl XpressLevel {
    /// Fastest level.
    pub const MIN: Self = Self(1);
    /// Default level.
    pub const DEFAULT: Self = Self(7);
    /// Exhaustive search.
    pub const MAX: Self = Self(8);

    /// Create a level. Returns `None` outside 1-8.
    pub fn new(level: u8) -> Option<Self> {
        if (Self::MIN.0..=Self::MAX.0).contains(&level) {
            Some(Self(level))
        } else {
            None
        }
    }

    /// Get the level value.
    pub fn level(self) -> u8 {
        self.0
    }

    /// Match length at which the search stops.
    pub fn nice_length(self) -> usize {
        match self.0 {
            1 => 16,
            2 => 32,
            3 => 48,
            4 => 64,
            5 => 128,
            6 => 256,
            7 => 512,
            _ => usize::MAX,
        }
    }

    /// Maximum hash-chain links followed per position.
    pub fn max_chain(self) -> usize {
        match self.0 {
            1 => 4,
            2 => 8,
            3 => 11,
            4 => 16,
            5 => 32,
            6 => 64,
            7 => 128,
            _ => usize::MAX,
        }
    }
}

impl Default for XpressLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}
