// blocks/common.rs
//! Common types, traits, and helper functions for TS block handling.
//!
//! This module provides:
//! - [`FourCC`]: the 4-byte codes used for tags and enumerated fields
//! - [`BlockHeader`]: the 8-byte header present in front of every block
//! - [`BlockCodec`]: the four per-type operations every payload implements
//! - Latin-1 helpers for the fixed-width text fields

use core::fmt;

use crate::{
    Error, Result, endian,
    text::Stanza,
    types::TranscodeContext,
};

/// Size of the tag + length header in front of every block.
pub const HEADER_SIZE: usize = 8;

// ============================================================================
// Four character codes
// ============================================================================

/// A four character code, stored in stream byte order.
///
/// Tags and enumerated fields such as the file version or the sample format
/// are 32-bit identifiers that are conventionally printable ASCII.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub const fn new(bytes: &[u8; 4]) -> Self {
        FourCC(*bytes)
    }

    /// Interpret a host integer as a code (`0x48454144` is `"HEAD"`).
    pub const fn from_u32(value: u32) -> Self {
        FourCC(value.to_be_bytes())
    }

    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Read a code stored in stream order at `offset`.
    pub fn read(bytes: &[u8], offset: usize) -> Self {
        FourCC::from_u32(endian::read_u32(bytes, offset))
    }

    /// Append the code in stream order.
    pub fn write(&self, out: &mut Vec<u8>) {
        endian::write_u32(out, self.to_u32());
    }

    /// Parse exactly four Latin-1 characters.
    pub fn from_text(text: &str) -> Option<Self> {
        let bytes = latin1_encode(text)?;
        let code: [u8; 4] = bytes.try_into().ok()?;
        Some(FourCC(code))
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&latin1_decode(&self.0))
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCC({:?})", latin1_decode(&self.0))
    }
}

// ============================================================================
// Block header
// ============================================================================

/// The 8-byte header in front of every block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    /// Block type code (e.g. `"HEAD"`).
    pub tag: FourCC,
    /// Payload length in bytes, excluding this header.
    pub length: u32,
}

impl BlockHeader {
    /// Parse a header from the first 8 bytes of `bytes`.
    ///
    /// # Arguments
    /// * `bytes` - Remaining bytes of the enclosing range.
    /// * `offset` - Absolute offset of `bytes[0]`, for error reporting.
    pub fn from_bytes(bytes: &[u8], offset: usize) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::TruncatedHeader {
                actual: bytes.len(),
                offset,
            });
        }
        Ok(Self {
            tag: FourCC::read(bytes, 0),
            length: endian::read_u32(bytes, 4),
        })
    }

    /// Append the header in stream order.
    pub fn write(&self, out: &mut Vec<u8>) {
        self.tag.write(out);
        endian::write_u32(out, self.length);
    }
}

// ============================================================================
// Per-type operations
// ============================================================================

/// The operations every non-container payload type provides.
///
/// `parse` and `write_payload` convert between stream-order bytes and host
/// values, `render` emits the type's `key:value` lines, and `build` reads
/// them back. Both text directions may read or update the shared
/// [`TranscodeContext`].
pub trait BlockCodec: Sized {
    const TAG: FourCC;
    /// Minimum payload size; the fixed layout size for fixed blocks.
    const SIZE: usize;

    /// Decode a payload that is known to hold at least [`Self::SIZE`] bytes.
    fn from_payload(payload: &[u8]) -> Self;

    /// Append the payload fields in stream order.
    fn write_payload(&self, out: &mut Vec<u8>);

    /// Write this block's `key:value` lines.
    fn render(&self, ctx: &mut TranscodeContext, out: &mut String) -> Result<()>;

    /// Build the payload from a text stanza.
    fn build(stanza: &Stanza<'_>, ctx: &mut TranscodeContext) -> Result<Self>;

    /// Number of payload bytes the decoded value occupies.
    fn encoded_len(&self) -> usize {
        Self::SIZE
    }

    /// Check the minimum size and decode.
    ///
    /// # Arguments
    /// * `payload` - The block's payload bytes.
    /// * `offset` - Absolute offset of the block header, for error reporting.
    fn parse(payload: &[u8], offset: usize) -> Result<Self> {
        if payload.len() < Self::SIZE {
            return Err(Error::TruncatedBlock {
                tag: Self::TAG,
                actual: payload.len(),
                expected: Self::SIZE,
                offset,
            });
        }
        Ok(Self::from_payload(payload))
    }
}

// ============================================================================
// Text field helpers
// ============================================================================

/// Map each byte to the Unicode code point of the same value.
pub fn latin1_decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Inverse of [`latin1_decode`]; `None` if a character is above U+00FF.
pub fn latin1_encode(text: &str) -> Option<Vec<u8>> {
    text.chars().map(|c| u8::try_from(u32::from(c)).ok()).collect()
}

/// Render a fixed-width text field up to its first NUL byte.
pub fn fixed_field_text(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    latin1_decode(&field[..end])
}

/// Copy at most `N` bytes of `text` into a NUL-padded field.
pub fn fixed_field_from_text<const N: usize>(text: &str) -> Option<[u8; N]> {
    let bytes = latin1_encode(text)?;
    let mut field = [0u8; N];
    let len = core::cmp::min(bytes.len(), N);
    field[..len].copy_from_slice(&bytes[..len]);
    Some(field)
}
