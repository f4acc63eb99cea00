//! Binary stream decoder.

use log::{debug, warn};

use crate::{
    BlockSequence, Result,
    blocks::{Block, BlockHeader, HEADER_SIZE},
    types::Warning,
};

/// Result of decoding a binary buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decoded {
    pub sequence: BlockSequence,
    /// Blocks whose declared length overran their enclosing range.
    pub warnings: Vec<Warning>,
}

/// Decode a buffer into a flat block sequence.
///
/// Container blocks are followed directly by the blocks decoded from their
/// own payload range, so nesting is expressed by order alone. A block whose
/// declared length runs past the end of its enclosing range is shortened to
/// the bytes that remain, reported as a [`Warning::ClampedBlock`], and kept.
///
/// Nesting is tracked with an explicit stack of range ends rather than
/// recursion, so a hostile buffer cannot exhaust the call stack.
///
/// # Errors
/// - [`crate::Error::TruncatedHeader`] if fewer than 8 bytes remain where a
///   header should start
/// - [`crate::Error::UnknownBlockType`] for a tag outside the known set
/// - [`crate::Error::TruncatedBlock`] for a payload shorter than its layout
pub fn decode(buffer: &[u8]) -> Result<Decoded> {
    let mut decoded = Decoded::default();
    // End offset of every open range, innermost last.
    let mut ranges: Vec<usize> = vec![buffer.len()];
    let mut pos = 0usize;

    while let Some(&end) = ranges.last() {
        if pos >= end {
            ranges.pop();
            continue;
        }

        let mut header = BlockHeader::from_bytes(&buffer[pos..end], pos)?;
        let start = pos + HEADER_SIZE;
        let available = end - start;
        if header.length as usize > available {
            // available < header.length, so it fits in u32
            let available = available as u32;
            let warning = Warning::ClampedBlock {
                tag: header.tag,
                declared: header.length,
                available,
                offset: pos,
            };
            warn!("{warning}");
            decoded.warnings.push(warning);
            header.length = available;
        }

        let payload_end = start + header.length as usize;
        let block = Block::decode(header, &buffer[start..payload_end], pos)?;
        if block.is_container() {
            ranges.push(payload_end);
            pos = start;
        } else {
            pos = payload_end;
        }
        decoded.sequence.push(block);
    }

    debug!(
        "Decoded {} blocks from {} bytes ({} clamped)",
        decoded.sequence.len(),
        buffer.len(),
        decoded.warnings.len()
    );
    Ok(decoded)
}
