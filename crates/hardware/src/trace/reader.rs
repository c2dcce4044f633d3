//! Lazy trace reader.
//!
//! Wraps any [`BufRead`] source and yields one [`TraceEntry`] per non-blank
//! line, attaching 1-based line numbers to parse failures.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{TraceEntry, parse_line};
use crate::common::TraceError;

/// Iterator over the entries of a textual trace.
///
/// Reading stops after the first error is yielded.
#[derive(Debug)]
pub struct TraceReader<R> {
    source: R,
    buf: String,
    line: usize,
    failed: bool,
}

impl<R: BufRead> TraceReader<R> {
    /// Creates a reader over `source`.
    pub const fn new(source: R) -> Self {
        Self {
            source,
            buf: String::new(),
            line: 0,
            failed: false,
        }
    }

    /// Number of lines consumed so far.
    pub const fn line_number(&self) -> usize {
        self.line
    }
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Io`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceEntry, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            self.buf.clear();
            match self.source.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    self.failed = true;
                    return Some(Err(TraceError::Io(e)));
                }
            }
            self.line += 1;

            match parse_line(&self.buf) {
                Ok(Some(entry)) => return Some(Ok(entry)),
                Ok(None) => {}
                Err(reason) => {
                    self.failed = true;
                    return Some(Err(TraceError::Malformed {
                        line: self.line,
                        content: self.buf.trim().to_string(),
                        reason,
                    }));
                }
            }
        }
    }
}
