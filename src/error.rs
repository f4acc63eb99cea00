//! Error types for TS transcoding operations.
//!
//! This module defines the [`Error`] enum which represents every failure that
//! can halt a decode, render, build, reconcile or serialize pass. A block
//! whose declared length overruns its buffer is not an error; it is reported
//! as a [`crate::Warning`] instead.
//!
//! # Example
//!
//! ```no_run
//! use codar_ts::{Error, Result, TsFile};
//!
//! fn dump(path: &str) -> Result<String> {
//!     match TsFile::from_file(path) {
//!         Ok(file) => file.to_text(Default::default()),
//!         Err(Error::BadSignature(found)) => {
//!             eprintln!("Not a TS file (first block is {found})");
//!             Err(Error::BadSignature(found))
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//! ```

use core::fmt;

use crate::blocks::FourCC;

/// Where in the input a fault was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Absolute byte offset into the binary buffer.
    Offset(usize),
    /// One-based line number in the text input.
    Line(usize),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Offset(offset) => write!(f, "byte offset {offset:#x}"),
            Location::Line(line) => write!(f, "line {line}"),
        }
    }
}

/// Errors that can occur while transcoding a TS stream.
#[derive(Debug)]
pub enum Error {
    /// A tag outside the fourteen known block types was encountered.
    ///
    /// A zero tag is always reported this way.
    UnknownBlockType {
        /// The offending tag
        tag: FourCC,
        /// Where the tag was found
        location: Location,
    },

    /// A block payload is shorter than its type's fixed layout.
    TruncatedBlock {
        /// Tag of the short block
        tag: FourCC,
        /// Number of payload bytes available
        actual: usize,
        /// Minimum payload size for this block type
        expected: usize,
        /// Offset of the block header
        offset: usize,
    },

    /// Fewer than eight bytes remain where a block header should start.
    TruncatedHeader {
        /// Number of bytes left in the enclosing range
        actual: usize,
        /// Offset where the header was expected
        offset: usize,
    },

    /// A sample block was processed before the format or scale blocks that
    /// describe it.
    MissingContext {
        /// Which piece of context was unavailable
        missing: &'static str,
        /// The sample format selector in effect, if any
        selector: Option<FourCC>,
        /// The most recent sweep index, if one has been seen
        index: Option<u32>,
    },

    /// A text line did not match the pattern its block type expects.
    MalformedParameter {
        /// Tag of the block being built
        tag: FourCC,
        /// The expected `key:value` pattern
        expected: String,
        /// One-based line number of the offending (or opening) line
        line: usize,
    },

    /// A sample stanza held an odd number of `i:`/`q:` lines.
    OddSampleCount {
        /// Number of sample lines found
        count: usize,
        /// Line number of the stanza opener
        line: usize,
    },

    /// Size reconciliation could not find one of the container blocks.
    MissingContainer(FourCC),

    /// The buffer does not start with the outer `AQLV` container.
    BadSignature(FourCC),

    /// A computed block length does not fit the 32-bit length field.
    SizeOverflow {
        /// Tag of the block whose length overflowed
        tag: FourCC,
        /// The computed size
        size: u64,
    },

    /// A summary could not be converted to or from JSON.
    SerializationError(String),

    /// An I/O error occurred while reading or writing a file.
    IOError(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownBlockType { tag, location } => {
                write!(f, "Unknown block type '{tag}' ({:#010x}) at {location}", tag.to_u32())
            }
            Error::TruncatedBlock {
                tag,
                actual,
                expected,
                offset,
            } => write!(
                f,
                "Block '{tag}' at byte offset {offset:#x} is truncated: need at least {expected} bytes, got {actual}"
            ),
            Error::TruncatedHeader { actual, offset } => write!(
                f,
                "Block header at byte offset {offset:#x} is truncated: need 8 bytes, got {actual}"
            ),
            Error::MissingContext {
                missing,
                selector,
                index,
            } => {
                write!(f, "Missing {missing} for sample block")?;
                match selector {
                    Some(selector) => write!(f, " (format selector '{selector}')")?,
                    None => write!(f, " (no format selector)")?,
                }
                if let Some(index) = index {
                    write!(f, " at sweep index {index}")?;
                }
                Ok(())
            }
            Error::MalformedParameter {
                tag,
                expected,
                line,
            } => write!(
                f,
                "Malformed parameter in '{tag}' block at line {line}: expected {expected:?}"
            ),
            Error::OddSampleCount { count, line } => write!(
                f,
                "Sample block starting at line {line} has an odd number of lines ({count})"
            ),
            Error::MissingContainer(tag) => {
                write!(f, "Cannot reconcile sizes: no '{tag}' container block")
            }
            Error::BadSignature(tag) => {
                write!(f, r#"Bad header key: Expected "AQLV", found '{tag}'"#)
            }
            Error::SizeOverflow { tag, size } => {
                write!(f, "Block '{tag}' size {size} exceeds the 32-bit length field")
            }
            Error::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Error::IOError(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IOError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IOError(err)
    }
}

/// A specialized Result type for TS operations.
pub type Result<T> = core::result::Result<T, Error>;
