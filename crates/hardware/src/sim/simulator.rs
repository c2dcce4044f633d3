//! Simulator: owns the cache store and the running totals side-by-side.
//!
//! The simulator is the single writer to its [`CacheStore`]. Operations are
//! applied strictly in the order they are supplied, which is the only ordering
//! LRU depends on.

use tracing::debug;

use super::access::{OperationOutcome, apply_operation};
use crate::cache::CacheStore;
use crate::common::{ConfigError, TraceError};
use crate::config::CacheConfig;
use crate::stats::SimStats;
use crate::trace::{TraceEntry, TraceOperation};

/// Top-level simulator: cache state plus accumulated statistics.
#[derive(Debug, Clone)]
pub struct Simulator {
    store: CacheStore,
    stats: SimStats,
    skipped: u64,
}

impl Simulator {
    /// Creates a simulator with an empty cache of the given geometry.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry is rejected; no cache is built.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            store: CacheStore::new(config)?,
            stats: SimStats::default(),
            skipped: 0,
        })
    }

    /// The cache state.
    pub const fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Totals so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Instruction fetches skipped so far.
    pub const fn skipped_instructions(&self) -> u64 {
        self.skipped
    }

    /// Consumes the simulator, returning the final totals.
    pub fn into_stats(self) -> SimStats {
        self.stats
    }

    /// Applies one data operation and records its outcome.
    pub fn apply(&mut self, op: TraceOperation) -> OperationOutcome {
        let outcome = apply_operation(&mut self.store, op);
        self.stats.record(&outcome);
        outcome
    }

    /// Applies one trace entry. Instruction fetches are skipped and yield `None`.
    pub fn step(&mut self, entry: TraceEntry) -> Option<OperationOutcome> {
        match entry {
            TraceEntry::Data(op) => Some(self.apply(op)),
            TraceEntry::InstructionFetch { .. } => {
                self.skipped += 1;
                None
            }
        }
    }

    /// Replays a trace, calling `observer` after every applied data operation.
    ///
    /// # Arguments
    ///
    /// * `entries` - Parsed trace entries, in trace order.
    /// * `observer` - Receives each operation's outcome (used for verbose output).
    ///
    /// # Returns
    ///
    /// The totals after the last entry.
    ///
    /// # Errors
    ///
    /// Stops at the first entry that failed to read or parse and returns that
    /// error. Operations before it have already been applied.
    pub fn run<I, F>(&mut self, entries: I, mut observer: F) -> Result<SimStats, TraceError>
    where
        I: IntoIterator<Item = Result<TraceEntry, TraceError>>,
        F: FnMut(&OperationOutcome),
    {
        for entry in entries {
            if let Some(outcome) = self.step(entry?) {
                observer(&outcome);
            }
        }
        debug!(
            operations = self.stats.operations,
            skipped = self.skipped,
            hits = self.stats.hits,
            misses = self.stats.misses,
            evictions = self.stats.evictions,
            "trace replay finished"
        );
        Ok(self.stats)
    }
}
