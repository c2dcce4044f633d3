//! Simulation statistics collection and reporting.
//!
//! This module tracks the totals of a trace replay. It provides:
//! 1. **Counters:** Hits, misses and evictions across all physical accesses.
//! 2. **Derived metrics:** Access count, hit rate and miss rate.
//! 3. **Reporting:** The one-line summary, a detailed block, and JSON via serde.

use std::fmt;

use serde::Serialize;

use crate::sim::OperationOutcome;

/// Totals accumulated over a simulation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Physical accesses that found their block cached.
    pub hits: u64,
    /// Physical accesses that had to install their block.
    pub misses: u64,
    /// Misses that replaced a valid line.
    pub evictions: u64,
    /// Data operations (loads, stores, modifies) applied.
    pub operations: u64,
}

impl SimStats {
    /// Folds one operation's outcome into the totals.
    pub fn record(&mut self, outcome: &OperationOutcome) {
        self.hits += outcome.hits();
        self.misses += outcome.misses();
        self.evictions += outcome.evictions();
        self.operations += 1;
    }

    /// Total physical accesses (`hits + misses`).
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, in `[0, 1]`; 0 when nothing was accessed.
    pub fn hit_rate(&self) -> f64 {
        match self.accesses() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    /// Fraction of accesses that missed, in `[0, 1]`; 0 when nothing was accessed.
    pub fn miss_rate(&self) -> f64 {
        match self.accesses() {
            0 => 0.0,
            total => self.misses as f64 / total as f64,
        }
    }

    /// The canonical one-line summary: `hits:<h> misses:<m> evictions:<e>`.
    pub fn summary(&self) -> String {
        self.to_string()
    }

    /// Renders the detailed report block.
    pub fn report(&self) -> String {
        Report(self).to_string()
    }

    /// Prints the detailed report to stdout.
    pub fn print(&self) {
        print!("{}", self.report());
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits:{} misses:{} evictions:{}",
            self.hits, self.misses, self.evictions
        )
    }
}

/// Display adapter for the detailed report block.
struct Report<'a>(&'a SimStats);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.0;
        writeln!(f, "==========================================================")?;
        writeln!(f, "CACHE SIMULATION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "sim_operations           {}", stats.operations)?;
        writeln!(f, "sim_accesses             {}", stats.accesses())?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "  cache.hits             {}", stats.hits)?;
        writeln!(f, "  cache.misses           {}", stats.misses)?;
        writeln!(f, "  cache.evictions        {}", stats.evictions)?;
        writeln!(f, "  cache.hit_rate         {:.2}%", stats.hit_rate() * 100.0)?;
        writeln!(f, "  cache.miss_rate        {:.2}%", stats.miss_rate() * 100.0)?;
        writeln!(f, "==========================================================")
    }
}
