//! Configuration system for the cache simulator.
//!
//! This module defines the structures used to parameterize a simulation run. It provides:
//! 1. **Defaults:** Baseline geometry used when a field is omitted.
//! 2. **Structures:** A root [`Config`] with general and cache sections.
//! 3. **Validation:** Geometry checks performed before any cache storage is allocated.
//!
//! Configuration is supplied on the command line or deserialized from JSON.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::{ConfigError, Error};

/// Default configuration constants for the simulator.
///
/// These values describe a small direct-mapped cache and are used when a
/// field is omitted from a JSON configuration file.
mod defaults {
    /// Default set-index bits (16 sets).
    pub const SET_BITS: u32 = 4;

    /// Default associativity (1 line per set = direct-mapped).
    pub const LINES_PER_SET: usize = 1;

    /// Default block-offset bits (16-byte blocks).
    pub const BLOCK_BITS: u32 = 4;
}

/// Width of a trace address in bits.
pub const ADDRESS_BITS: u32 = u64::BITS;

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use csim_core::config::Config;
///
/// let json = r#"{ "cache": { "s": 2, "E": 1, "b": 2 } }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.cache.num_sets(), 4);
/// assert!(!config.general.verbose);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Run-wide settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Cache geometry.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Parses a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns the deserialization error if the JSON is malformed or a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Json`] if its contents are not a valid configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_json(&text)?)
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Report the outcome of every physical access, one line per operation.
    #[serde(default)]
    pub verbose: bool,
}

/// Cache geometry: `2^s` sets of `E` lines holding `2^b`-byte blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Set-index bits (`s`).
    #[serde(alias = "s", default = "CacheConfig::default_set_bits")]
    pub set_bits: u32,

    /// Lines per set (`E`), i.e. the associativity.
    #[serde(alias = "E", default = "CacheConfig::default_lines_per_set")]
    pub lines_per_set: usize,

    /// Block-offset bits (`b`).
    #[serde(alias = "b", default = "CacheConfig::default_block_bits")]
    pub block_bits: u32,
}

impl CacheConfig {
    /// Creates a geometry from raw `(s, E, b)` values without validating it.
    pub const fn new(set_bits: u32, lines_per_set: usize, block_bits: u32) -> Self {
        Self {
            set_bits,
            lines_per_set,
            block_bits,
        }
    }

    /// Returns the default set-index bits.
    const fn default_set_bits() -> u32 {
        defaults::SET_BITS
    }

    /// Returns the default associativity.
    const fn default_lines_per_set() -> usize {
        defaults::LINES_PER_SET
    }

    /// Returns the default block-offset bits.
    const fn default_block_bits() -> u32 {
        defaults::BLOCK_BITS
    }

    /// Checks that the geometry describes a cache that can be built.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::ZeroLinesPerSet`] if `E` is zero.
    /// * [`ConfigError::AddressBitsExceeded`] if `s + b` is wider than an address.
    /// * [`ConfigError::CapacityOverflow`] if `2^s * E` lines cannot be indexed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lines_per_set == 0 {
            return Err(ConfigError::ZeroLinesPerSet);
        }
        if self.set_bits.saturating_add(self.block_bits) > ADDRESS_BITS {
            return Err(ConfigError::AddressBitsExceeded {
                set_bits: self.set_bits,
                block_bits: self.block_bits,
            });
        }
        if self.total_lines().is_none() {
            return Err(ConfigError::CapacityOverflow {
                set_bits: self.set_bits,
                lines_per_set: self.lines_per_set,
            });
        }
        Ok(())
    }

    /// Number of sets (`2^s`), or `None` if it does not fit in a `usize`.
    pub const fn checked_num_sets(&self) -> Option<usize> {
        1usize.checked_shl(self.set_bits)
    }

    /// Number of sets (`2^s`).
    ///
    /// Saturates at `usize::MAX` for geometries that [`validate`](Self::validate) rejects.
    pub const fn num_sets(&self) -> usize {
        match self.checked_num_sets() {
            Some(sets) => sets,
            None => usize::MAX,
        }
    }

    /// Total number of lines (`2^s * E`), or `None` on overflow.
    pub fn total_lines(&self) -> Option<usize> {
        self.checked_num_sets()?.checked_mul(self.lines_per_set)
    }

    /// Block size in bytes (`2^b`), saturating at `u64::MAX`.
    pub fn block_bytes(&self) -> u64 {
        1u64.checked_shl(self.block_bits).unwrap_or(u64::MAX)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(
            defaults::SET_BITS,
            defaults::LINES_PER_SET,
            defaults::BLOCK_BITS,
        )
    }
}
