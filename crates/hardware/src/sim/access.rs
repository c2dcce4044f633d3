//! Physical accesses and their expansion from trace operations.
//!
//! A load or store is exactly one physical access. A modify is a load followed
//! by a store to the same address, so it is exactly two, and the second one
//! always hits because the first has just installed or refreshed the block.

use std::fmt;

use tracing::trace;

use crate::cache::lru::{self, Victim};
use crate::cache::{AccessOutcome, CacheLine, CacheStore};
use crate::trace::{Operation, TraceOperation};

/// Performs one physical access to `addr`.
///
/// On a hit the matching line becomes most recently used. On a miss the first
/// empty line is filled, or, when the set is full, the least recently used line
/// is replaced (lowest index on ties). Every other valid line in the set ages
/// by one.
///
/// This never fails: masking guarantees every address maps to a set.
pub fn access(store: &mut CacheStore, addr: u64) -> AccessOutcome {
    let set_index = store.set_index(addr);
    let tag = store.tag(addr);
    let set = store.set_mut(set_index);

    if let Some(way) = set.iter().position(|line| line.matches(tag)) {
        lru::touch(set, way);
        trace!(addr, set = set_index, tag, way, "hit");
        return AccessOutcome::HIT;
    }

    let victim = lru::select_victim(set);
    let way = victim.way();
    if let Victim::Lru(_) = victim {
        trace!(addr, set = set_index, way, old_tag = set[way].tag(), "evict");
    }
    set[way] = CacheLine::new(true, tag, 0);
    lru::touch(set, way);

    trace!(addr, set = set_index, tag, way, "miss");
    AccessOutcome {
        hit: false,
        evicted: victim.evicts(),
    }
}

/// Performs the physical accesses for one trace operation.
pub fn apply_operation(store: &mut CacheStore, op: TraceOperation) -> OperationOutcome {
    let first = access(store, op.address);
    let second = match op.op {
        Operation::Load | Operation::Store => None,
        Operation::Modify => Some(access(store, op.address)),
    };
    OperationOutcome {
        operation: op,
        first,
        second,
    }
}

/// What happened to the cache while applying one trace operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationOutcome {
    /// The operation that was applied.
    pub operation: TraceOperation,
    /// Outcome of the first (for modify: load) access.
    pub first: AccessOutcome,
    /// Outcome of the store half of a modify; `None` for loads and stores.
    pub second: Option<AccessOutcome>,
}

impl OperationOutcome {
    /// Outcomes of the physical accesses, in order.
    pub fn accesses(&self) -> impl Iterator<Item = AccessOutcome> + '_ {
        std::iter::once(self.first).chain(self.second)
    }

    /// Number of accesses that hit.
    pub fn hits(&self) -> u64 {
        self.accesses().filter(|a| a.hit).count() as u64
    }

    /// Number of accesses that missed.
    pub fn misses(&self) -> u64 {
        self.accesses().filter(|a| !a.hit).count() as u64
    }

    /// Number of accesses that evicted a valid line.
    pub fn evictions(&self) -> u64 {
        self.accesses().filter(|a| a.evicted).count() as u64
    }
}

impl fmt::Display for OperationOutcome {
    /// Formats the outcome as a verbose trace line, e.g. `M 20,1 miss eviction hit`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operation)?;
        for outcome in self.accesses() {
            if outcome.hit {
                write!(f, " hit")?;
            } else {
                write!(f, " miss")?;
                if outcome.evicted {
                    write!(f, " eviction")?;
                }
            }
        }
        Ok(())
    }
}
