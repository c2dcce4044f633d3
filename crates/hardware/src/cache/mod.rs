//! Set-Associative Cache Store.
//!
//! This module owns the storage of a set-associative cache: `2^s` sets of `E`
//! lines each, laid out in a single contiguous allocation. It provides:
//! 1. **Address Mapping:** Splitting an address into set index and tag.
//! 2. **Storage:** Holding per-line validity, tag and relative recency.
//! 3. **Replacement:** LRU victim selection and recency aging (see [`lru`]).
//!
//! The store itself applies no policy; hits, fills and evictions are driven by
//! [`access`](crate::sim::access()) in the simulator.

/// LRU recency bookkeeping and victim selection.
pub mod lru;

use crate::common::ConfigError;
use crate::config::CacheConfig;

/// One storage slot in a cache set.
///
/// `recency` is relative within the set: 0 is the most recently used line and
/// larger values are older.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheLine {
    valid: bool,
    tag: u64,
    recency: u64,
}

impl CacheLine {
    /// An empty (invalid) line.
    pub const EMPTY: Self = Self {
        valid: false,
        tag: 0,
        recency: 0,
    };

    /// Creates a line with explicit state.
    ///
    /// Mainly useful for building sets by hand when exercising
    /// [`lru::select_victim`].
    pub const fn new(valid: bool, tag: u64, recency: u64) -> Self {
        Self {
            valid,
            tag,
            recency,
        }
    }

    /// Whether the line currently holds a block.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Tag of the block held by this line. Meaningless if the line is invalid.
    #[inline]
    pub const fn tag(&self) -> u64 {
        self.tag
    }

    /// Relative recency; 0 is most recently used.
    #[inline]
    pub const fn recency(&self) -> u64 {
        self.recency
    }

    /// Whether this line holds the block identified by `tag`.
    #[inline]
    pub const fn matches(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }
}

/// Result of a single physical cache access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessOutcome {
    /// The block was already present.
    pub hit: bool,
    /// A valid line was replaced to make room for the block.
    pub evicted: bool,
}

impl AccessOutcome {
    /// A hit.
    pub const HIT: Self = Self {
        hit: true,
        evicted: false,
    };

    /// A miss that filled an empty line.
    pub const MISS: Self = Self {
        hit: false,
        evicted: false,
    };

    /// A miss that replaced a valid line.
    pub const MISS_EVICTION: Self = Self {
        hit: false,
        evicted: true,
    };
}

/// Storage for a set-associative cache.
///
/// Lines for set `i` occupy `lines[i * E .. (i + 1) * E]`.
#[derive(Debug, Clone)]
pub struct CacheStore {
    geometry: CacheConfig,
    set_mask: u64,
    tag_shift: u32,
    lines: Vec<CacheLine>,
}

impl CacheStore {
    /// Allocates a cache with `2^s` sets of `E` empty lines.
    ///
    /// Every line is allocated and initialized up front, so the store occupies
    /// [`storage_bytes`](Self::storage_bytes) bytes (24 per line on 64-bit
    /// hosts). Validation only rejects sizes that cannot be addressed; a large
    /// `s` such as 30 passes it and needs tens of gigabytes.
    ///
    /// # Arguments
    ///
    /// * `config` - Cache geometry `(s, E, b)`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`CacheConfig::validate`]; no storage is
    /// allocated in that case.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let overflow = ConfigError::CapacityOverflow {
            set_bits: config.set_bits,
            lines_per_set: config.lines_per_set,
        };
        let total = config.total_lines().ok_or(overflow)?;
        let mut lines = Vec::<CacheLine>::new();
        lines.try_reserve_exact(total).map_err(|_| overflow)?;
        lines.resize(total, CacheLine::EMPTY);

        let set_mask = 1u64
            .checked_shl(config.set_bits)
            .map_or(u64::MAX, |sets| sets - 1);

        tracing::debug!(
            sets = config.num_sets(),
            bytes = total * size_of::<CacheLine>(),
            lines_per_set = config.lines_per_set,
            block_bytes = config.block_bytes(),
            "allocated cache store"
        );

        Ok(Self {
            geometry: *config,
            set_mask,
            tag_shift: config.set_bits + config.block_bits,
            lines,
        })
    }

    /// Bytes of line storage a store with this geometry allocates, or `None`
    /// if the size overflows `usize`.
    pub fn storage_bytes(config: &CacheConfig) -> Option<usize> {
        config.total_lines()?.checked_mul(size_of::<CacheLine>())
    }

    /// The geometry this store was built from.
    pub const fn geometry(&self) -> &CacheConfig {
        &self.geometry
    }

    /// Number of sets (`2^s`).
    pub const fn num_sets(&self) -> usize {
        self.lines.len() / self.geometry.lines_per_set
    }

    /// Lines per set (`E`).
    pub const fn lines_per_set(&self) -> usize {
        self.geometry.lines_per_set
    }

    /// Set that `addr` maps to: `(addr >> b) & (2^s - 1)`.
    #[inline]
    pub fn set_index(&self, addr: u64) -> usize {
        // A 64-bit block offset leaves a single set.
        let block = addr.checked_shr(self.geometry.block_bits).unwrap_or(0);
        (block & self.set_mask) as usize
    }

    /// Tag for `addr`: `addr >> (s + b)`, or 0 when `s + b` is 64.
    #[inline]
    pub fn tag(&self, addr: u64) -> u64 {
        addr.checked_shr(self.tag_shift).unwrap_or(0)
    }

    /// Read-only view of one set.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.num_sets()`.
    pub fn set(&self, index: usize) -> &[CacheLine] {
        let ways = self.geometry.lines_per_set;
        &self.lines[index * ways..(index + 1) * ways]
    }

    /// Every line in the cache, set by set.
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// Iterates over the sets in index order.
    pub fn sets(&self) -> impl Iterator<Item = &[CacheLine]> + '_ {
        self.lines.chunks_exact(self.geometry.lines_per_set)
    }

    /// Whether the block containing `addr` is currently cached. Does not touch recency.
    pub fn contains(&self, addr: u64) -> bool {
        let tag = self.tag(addr);
        self.set(self.set_index(addr))
            .iter()
            .any(|line| line.matches(tag))
    }

    /// Number of valid lines across all sets.
    pub fn occupancy(&self) -> usize {
        self.lines.iter().filter(|line| line.valid).count()
    }

    /// Mutable view of one set, for the access path.
    pub(crate) fn set_mut(&mut self, index: usize) -> &mut [CacheLine] {
        let ways = self.geometry.lines_per_set;
        &mut self.lines[index * ways..(index + 1) * ways]
    }
}
