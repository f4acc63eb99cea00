//! Shared types used across the library.
//!
//! The [`TranscodeContext`] is the only state that crosses block boundaries:
//! the format block sets the sample format selector, the scale block sets the
//! two channel scale factors, and the sample blocks that follow consume them.

use core::fmt;

use crate::{
    Error, Result,
    blocks::{FourCC, tags},
};

/// Binary representation of the samples in `alvl` blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    /// `flt4`: samples are already in physical units.
    Float,
    /// `fix2`: 16-bit fixed point.
    Fixed16,
    /// `fix3`: 24-bit fixed point.
    Fixed24,
    /// `fix4`: 32-bit fixed point.
    Fixed32,
}

impl SampleFormat {
    /// Look up the format named by an `fbin` type code.
    pub fn from_selector(selector: FourCC) -> Option<Self> {
        match selector {
            tags::FORMAT_FLT4 => Some(SampleFormat::Float),
            tags::FORMAT_FIX2 => Some(SampleFormat::Fixed16),
            tags::FORMAT_FIX3 => Some(SampleFormat::Fixed24),
            tags::FORMAT_FIX4 => Some(SampleFormat::Fixed32),
            _ => None,
        }
    }

    pub fn selector(&self) -> FourCC {
        match self {
            SampleFormat::Float => tags::FORMAT_FLT4,
            SampleFormat::Fixed16 => tags::FORMAT_FIX2,
            SampleFormat::Fixed24 => tags::FORMAT_FIX3,
            SampleFormat::Fixed32 => tags::FORMAT_FIX4,
        }
    }

    /// The stored integer that represents a full-scale physical value.
    pub fn full_scale(&self) -> f64 {
        match self {
            SampleFormat::Float => 1.0,
            SampleFormat::Fixed16 => f64::from(0x7FFF),
            SampleFormat::Fixed24 => f64::from(0x7F_FFFF),
            SampleFormat::Fixed32 => f64::from(0x7FFF_FFFF),
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.selector())
    }
}

/// Cross-block state threaded through rendering and building.
///
/// A fresh context has every field unset; reading an unset field for a sample
/// block is [`Error::MissingContext`], never an implicit zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscodeContext {
    /// Sample format selector from the most recent `fbin` block.
    pub selector: Option<FourCC>,
    /// Scale factor for the I channel from the most recent `scal` block.
    pub scale_i: Option<f64>,
    /// Scale factor for the Q channel from the most recent `scal` block.
    pub scale_q: Option<f64>,
    /// Sweep index from the most recent `indx` block, for diagnostics.
    pub index: Option<u32>,
}

impl TranscodeContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sample format selected by the last format block.
    pub fn sample_format(&self) -> Result<SampleFormat> {
        let missing = match self.selector {
            Some(selector) => match SampleFormat::from_selector(selector) {
                Some(format) => return Ok(format),
                None => "a recognized sample format",
            },
            None => "a sample format",
        };
        Err(Error::MissingContext {
            missing,
            selector: self.selector,
            index: self.index,
        })
    }

    /// The `(I, Q)` scale factors set by the last scale block.
    pub fn scales(&self) -> Result<(f64, f64)> {
        match (self.scale_i, self.scale_q) {
            (Some(i), Some(q)) => Ok((i, q)),
            _ => Err(Error::MissingContext {
                missing: "scale factors",
                selector: self.selector,
                index: self.index,
            }),
        }
    }
}

/// A recoverable condition reported while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A block's declared length ran past the end of its enclosing range and
    /// was shortened to the bytes that remain.
    ClampedBlock {
        tag: FourCC,
        declared: u32,
        available: u32,
        offset: usize,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::ClampedBlock {
                tag,
                declared,
                available,
                offset,
            } => write!(
                f,
                "Block '{tag}' at byte offset {offset:#x} size truncated from {declared} to {available} bytes"
            ),
        }
    }
}
