//! Line-oriented text form of a TS stream.
//!
//! Each block is one stanza: a line holding the four character tag, the
//! block's `key:value` lines, and a blank line. Sample blocks hold
//! alternating `i:`/`q:` lines instead of named keys.
//!
//! ```text
//! fbin
//! format:cviq
//! type:fix2
//!
//! scal
//! scalar_one:1.00000000000000000000
//! scalar_two:1.00000000000000000000
//!
//! alvl
//! i:0.00305185094759971922
//! q:-0.00610370189519943844
//!
//! ```
//!
//! [`render`] produces this form from a [`BlockSequence`](crate::BlockSequence)
//! and [`build`] parses it back. Both thread a
//! [`TranscodeContext`](crate::TranscodeContext) from block to block so the
//! sample blocks can be scaled.

mod builder;
mod renderer;

pub use builder::build;
pub use renderer::{RenderOptions, render};

use core::fmt::{self, Write as _};
use core::str::FromStr;

use crate::{
    Error, Result,
    blocks::{FourCC, fixed_field_from_text},
};

/// Append a `key:value` line.
pub fn push_param(out: &mut String, key: &str, value: impl fmt::Display) {
    let _ = writeln!(out, "{key}:{value}");
}

/// Append a `key:value` line with twenty fractional digits.
pub fn push_float(out: &mut String, key: &str, value: f64) {
    let _ = writeln!(out, "{key}:{value:.20}");
}

/// The lines of one block in the text form.
///
/// Holds the tag from the opening line and every following line up to (not
/// including) the blank separator, each paired with its one-based line
/// number.
#[derive(Debug, Clone)]
pub struct Stanza<'a> {
    tag: FourCC,
    line: usize,
    lines: Vec<(usize, &'a str)>,
}

impl<'a> Stanza<'a> {
    pub fn new(tag: FourCC, line: usize, lines: Vec<(usize, &'a str)>) -> Self {
        Self { tag, line, lines }
    }

    pub fn tag(&self) -> FourCC {
        self.tag
    }

    /// Line number of the tag line.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn lines(&self) -> &[(usize, &'a str)] {
        &self.lines
    }

    /// A [`Error::MalformedParameter`] for this block.
    pub fn malformed(&self, expected: impl Into<String>, line: usize) -> Error {
        Error::MalformedParameter {
            tag: self.tag,
            expected: expected.into(),
            line,
        }
    }

    /// The value of the first line whose key is `key`, with its line number.
    pub fn find(&self, key: &str) -> Option<(usize, &'a str)> {
        self.lines
            .iter()
            .find_map(|&(number, line)| match line.split_once(':') {
                Some((k, v)) if k == key => Some((number, v)),
                _ => None,
            })
    }

    /// Like [`find`](Self::find), but a missing key is an error reported
    /// against the tag line.
    pub fn value(&self, key: &str, pattern: &str) -> Result<(usize, &'a str)> {
        self.find(key).ok_or_else(|| self.malformed(pattern, self.line))
    }

    fn parsed<T>(&self, key: &str, kind: &str, parse: impl FnOnce(&str) -> Option<T>) -> Result<T> {
        let pattern = format!("{key}:<{kind}>");
        let (line, value) = self.value(key, &pattern)?;
        parse(value).ok_or_else(|| self.malformed(pattern, line))
    }

    /// A decimal integer value.
    pub fn int<T: FromStr>(&self, key: &str) -> Result<T> {
        self.parsed(key, "integer", |v| v.trim().parse().ok())
    }

    /// A floating point value.
    pub fn float(&self, key: &str) -> Result<f64> {
        self.parsed(key, "float", |v| v.trim().parse().ok())
    }

    /// A hexadecimal value, with or without a `0x` prefix.
    pub fn hex_u32(&self, key: &str) -> Result<u32> {
        self.parsed(key, "hex integer", |v| {
            let v = v.trim();
            let digits = v
                .strip_prefix("0x")
                .or_else(|| v.strip_prefix("0X"))
                .unwrap_or(v);
            u32::from_str_radix(digits, 16).ok()
        })
    }

    /// Exactly four characters.
    pub fn fourcc(&self, key: &str) -> Result<FourCC> {
        self.parsed(key, "4 characters", FourCC::from_text)
    }

    /// Free text for an `N`-byte field; longer text is cut at `N` bytes.
    pub fn text_field<const N: usize>(&self, key: &str) -> Result<[u8; N]> {
        self.parsed(key, "text", fixed_field_from_text::<N>)
    }
}
