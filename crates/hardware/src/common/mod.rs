//! Common types shared across the cache simulator.
//!
//! This module collects the building blocks used by every other component:
//! 1. **Error Handling:** Configuration, trace and umbrella error types.

/// Error types for configuration, trace reading and whole-run failures.
pub mod error;

pub use error::{ConfigError, Error, ParseLineError, TraceError};
