//! Least Recently Used (LRU) bookkeeping.
//!
//! Each line carries a relative recency counter: the line touched last has
//! recency 0, and every other valid line in the set is one older than it was
//! before the touch. The victim in a full set is the line with the largest
//! counter.
//!
//! # Performance
//!
//! - `touch()`: O(E) where E is the number of lines per set
//! - `select_victim()`: O(E)
//! - No per-set state beyond the lines themselves, so sets stay independent.

use super::CacheLine;

/// Line chosen to receive an incoming block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Victim {
    /// First invalid line in the set; nothing is evicted.
    Empty(usize),
    /// Least recently used valid line; its block is evicted.
    Lru(usize),
}

impl Victim {
    /// Index of the chosen line within its set.
    pub const fn way(self) -> usize {
        match self {
            Self::Empty(way) | Self::Lru(way) => way,
        }
    }

    /// Whether installing into this line evicts a valid block.
    pub const fn evicts(self) -> bool {
        matches!(self, Self::Lru(_))
    }
}

/// Chooses the line that will receive a missing block.
///
/// The first invalid line wins if there is one. Otherwise the line with the
/// strictly largest recency is chosen, and among equal recencies the lowest
/// index is kept.
///
/// # Panics
///
/// Panics if `set` is empty; a [`CacheStore`](super::CacheStore) never has
/// empty sets.
pub fn select_victim(set: &[CacheLine]) -> Victim {
    if let Some(way) = set.iter().position(|line| !line.valid) {
        return Victim::Empty(way);
    }

    let mut victim = 0;
    for (way, line) in set.iter().enumerate().skip(1) {
        if line.recency > set[victim].recency {
            victim = way;
        }
    }
    Victim::Lru(victim)
}

/// Marks `way` as most recently used and ages every other valid line by one.
pub fn touch(set: &mut [CacheLine], way: usize) {
    for (i, line) in set.iter_mut().enumerate() {
        if i == way {
            line.recency = 0;
        } else if line.valid {
            line.recency = line.recency.saturating_add(1);
        }
    }
}
