//! Trace-driven simulation.
//!
//! This module turns trace operations into cache accesses. It provides:
//! 1. **Access:** One physical access with hit/miss/eviction bookkeeping.
//! 2. **Operations:** Mapping loads, stores and modifies to physical accesses.
//! 3. **Driver:** A [`Simulator`] that replays a whole trace and accumulates totals.

/// Single accesses and per-operation expansion.
pub mod access;

/// Trace driver owning the cache and the running totals.
pub mod simulator;

pub use access::{OperationOutcome, access, apply_operation};
pub use simulator::Simulator;
