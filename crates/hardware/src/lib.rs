//! Trace-driven set-associative cache simulator library.
//!
//! This crate models a single set-associative cache with LRU replacement and
//! replays memory-access traces against it:
//! 1. **Cache:** Contiguous set/line storage, address mapping, and LRU victim selection.
//! 2. **Simulation:** Physical accesses, load/store/modify expansion, and a trace driver.
//! 3. **Trace:** Typed operations and a lazy reader for the textual trace format.
//! 4. **Configuration and statistics:** Validated geometry, totals, and reports.
//!
//! # Examples
//!
//! ```
//! use csim_core::{CacheConfig, Simulator, TraceReader};
//!
//! let trace = "L 0,1\nL 4,1\nL 0,1\n";
//! let mut sim = Simulator::new(&CacheConfig::new(2, 1, 2)).unwrap();
//! let stats = sim.run(TraceReader::new(trace.as_bytes()), |_| {}).unwrap();
//! assert_eq!(stats.summary(), "hits:1 misses:2 evictions:0");
//! ```

/// Cache storage, geometry mapping and LRU replacement.
pub mod cache;
/// Error types.
pub mod common;
/// Simulator configuration (defaults, geometry, validation).
pub mod config;
/// Physical accesses, operation expansion and the trace driver.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;
/// Trace operations, entries and the textual trace reader.
pub mod trace;

/// Cache geometry `(s, E, b)`.
pub use crate::config::{CacheConfig, Config};
/// Trace driver; construct with `Simulator::new`.
pub use crate::sim::Simulator;
/// Accumulated hit/miss/eviction totals.
pub use crate::stats::SimStats;
/// Lazy reader over a textual trace.
pub use crate::trace::TraceReader;
