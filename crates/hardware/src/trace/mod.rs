//! Memory-Access Traces.
//!
//! This module defines the operations replayed against the cache and the
//! textual trace format they are read from. It provides:
//! 1. **Operations:** Data accesses (load, store, modify) as typed values.
//! 2. **Entries:** Everything a trace line can describe, including instruction
//!    fetches that the simulator ignores.
//! 3. **Parsing:** A per-line parser and a lazy, line-numbered reader.
//!
//! # Format
//!
//! One operation per line: `[space]<op> <hex-address>[,<size>]`, where `op` is
//! `I` (instruction fetch), `L` (load), `S` (store) or `M` (modify). Blank lines
//! are skipped. The size defaults to 1 when omitted.

/// Lazy trace reader over any buffered source.
pub mod reader;

use std::fmt;

pub use reader::TraceReader;

use crate::common::ParseLineError;

/// Size assumed when a trace line omits one.
pub const DEFAULT_ACCESS_SIZE: u32 = 1;

/// Kind of data access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Data load: one access.
    Load,
    /// Data store: one access.
    Store,
    /// Load followed by a store to the same address: two accesses.
    Modify,
}

impl Operation {
    /// Trace letter for this operation.
    pub const fn letter(self) -> char {
        match self {
            Self::Load => 'L',
            Self::Store => 'S',
            Self::Modify => 'M',
        }
    }

    /// Number of physical cache accesses this operation performs.
    pub const fn accesses(self) -> usize {
        match self {
            Self::Load | Self::Store => 1,
            Self::Modify => 2,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A data access replayed against the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceOperation {
    /// What kind of access.
    pub op: Operation,
    /// Byte address.
    pub address: u64,
    /// Access size in bytes. Recorded for reporting only; the model works at block granularity.
    pub size: u32,
}

impl TraceOperation {
    /// Creates an operation with the default access size.
    pub const fn new(op: Operation, address: u64) -> Self {
        Self {
            op,
            address,
            size: DEFAULT_ACCESS_SIZE,
        }
    }

    /// Load from `address`.
    pub const fn load(address: u64) -> Self {
        Self::new(Operation::Load, address)
    }

    /// Store to `address`.
    pub const fn store(address: u64) -> Self {
        Self::new(Operation::Store, address)
    }

    /// Modify (load then store) at `address`.
    pub const fn modify(address: u64) -> Self {
        Self::new(Operation::Modify, address)
    }
}

impl fmt::Display for TraceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:x},{}", self.op, self.address, self.size)
    }
}

/// One parsed trace line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEntry {
    /// Instruction fetch; never reaches the data cache.
    InstructionFetch {
        /// Byte address.
        address: u64,
        /// Access size in bytes.
        size: u32,
    },
    /// Data access.
    Data(TraceOperation),
}

impl TraceEntry {
    /// The data access, or `None` for an instruction fetch.
    pub const fn data(self) -> Option<TraceOperation> {
        match self {
            Self::Data(op) => Some(op),
            Self::InstructionFetch { .. } => None,
        }
    }
}

/// Parses one trace line.
///
/// Returns `Ok(None)` for blank lines.
///
/// # Errors
///
/// Returns a [`ParseLineError`] describing the first problem found.
///
/// # Examples
///
/// ```
/// use csim_core::trace::{parse_line, Operation, TraceEntry};
///
/// let entry = parse_line(" M 0421c7f0,4").unwrap().unwrap();
/// let op = entry.data().unwrap();
/// assert_eq!(op.op, Operation::Modify);
/// assert_eq!(op.address, 0x0421_c7f0);
/// assert_eq!(op.size, 4);
/// ```
pub fn parse_line(line: &str) -> Result<Option<TraceEntry>, ParseLineError> {
    let line = line.trim();
    let mut chars = line.chars();
    let Some(letter) = chars.next() else {
        return Ok(None);
    };

    // `None` marks an instruction fetch.
    let op = match letter {
        'I' => None,
        'L' => Some(Operation::Load),
        'S' => Some(Operation::Store),
        'M' => Some(Operation::Modify),
        other => return Err(ParseLineError::UnknownOperation(other)),
    };

    let operand = chars.as_str().trim();
    let (addr_text, size_text) = match operand.split_once(',') {
        Some((addr, size)) => (addr.trim(), Some(size.trim())),
        None => (operand, None),
    };
    let address = parse_address(addr_text)?;
    let size = size_text.map_or(Ok(DEFAULT_ACCESS_SIZE), |text| {
        text.parse::<u32>()
            .map_err(|_| ParseLineError::InvalidSize(text.to_string()))
    })?;

    Ok(Some(match op {
        Some(op) => TraceEntry::Data(TraceOperation { op, address, size }),
        None => TraceEntry::InstructionFetch { address, size },
    }))
}

/// Parses a hexadecimal address with an optional `0x` prefix.
fn parse_address(text: &str) -> Result<u64, ParseLineError> {
    if text.is_empty() {
        return Err(ParseLineError::MissingAddress);
    }
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u64::from_str_radix(digits, 16).map_err(|_| ParseLineError::InvalidAddress(text.to_string()))
}
