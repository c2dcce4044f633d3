//! Error definitions for the cache simulator.
//!
//! This module defines every failure the simulator can report. It provides:
//! 1. **Configuration Errors:** Rejected cache geometries, raised before any storage exists.
//! 2. **Trace Errors:** I/O failures and malformed lines encountered while reading a trace.
//! 3. **Umbrella Error:** A crate-level error that front ends can propagate with `?`.
//!
//! The access path itself is infallible: once a [`CacheStore`](crate::cache::CacheStore)
//! exists, every address maps to a valid set.

use std::io;

use thiserror::Error;

/// Reasons a cache geometry `(s, E, b)` is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `E` was zero; every set needs at least one line.
    #[error("lines per set (E) must be at least 1")]
    ZeroLinesPerSet,

    /// Set-index bits plus block-offset bits exceed the 64-bit address width.
    #[error("set bits ({set_bits}) + block bits ({block_bits}) exceed the 64-bit address width")]
    AddressBitsExceeded {
        /// Configured set-index bits (`s`).
        set_bits: u32,
        /// Configured block-offset bits (`b`).
        block_bits: u32,
    },

    /// `2^s * E` lines cannot be addressed on this host.
    #[error("cache with 2^{set_bits} sets of {lines_per_set} lines does not fit in memory")]
    CapacityOverflow {
        /// Configured set-index bits (`s`).
        set_bits: u32,
        /// Configured lines per set (`E`).
        lines_per_set: usize,
    },
}

/// Why a single trace line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseLineError {
    /// The operation letter is not one of `I`, `L`, `S`, `M`.
    #[error("unknown operation '{0}'")]
    UnknownOperation(char),

    /// No address followed the operation letter.
    #[error("missing address")]
    MissingAddress,

    /// The address is not valid hexadecimal.
    #[error("invalid hexadecimal address '{0}'")]
    InvalidAddress(String),

    /// The access size is not a valid decimal integer.
    #[error("invalid access size '{0}'")]
    InvalidSize(String),
}

/// Failures while reading a memory-access trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The underlying reader failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] io::Error),

    /// A line could not be parsed.
    #[error("malformed trace entry at line {line} ('{content}'): {reason}")]
    Malformed {
        /// 1-based line number within the trace.
        line: usize,
        /// The offending line, trimmed.
        content: String,
        /// The parse failure.
        reason: ParseLineError,
    },
}

/// Crate-level error for front ends that drive a whole simulation.
#[derive(Debug, Error)]
pub enum Error {
    /// The cache geometry was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The trace could not be read or parsed.
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// Reading a configuration file or writing a report failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A JSON configuration could not be deserialized, or totals could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
