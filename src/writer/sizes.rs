//! Container size reconciliation.

use log::debug;

use crate::{
    BlockSequence, Error, Result,
    blocks::{BlockKind, FourCC, HEADER_SIZE, tags},
};

/// Container lengths computed by [`reconcile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerSizes {
    pub outer: u32,
    pub header: u32,
    pub body: u32,
}

fn fit(tag: FourCC, size: u64) -> Result<u32> {
    u32::try_from(size).map_err(|_| Error::SizeOverflow { tag, size })
}

/// Recompute the `AQLV`, `HEAD` and `BODY` lengths from the blocks they
/// enclose and patch them in place.
///
/// Payload block lengths are first reset to their encoded size. The scan
/// then tracks two region flags: `HEAD` opens the header region, `BODY`
/// closes it and opens the body region, `END ` closes both. Every block seen
/// while a flag is set adds its payload length plus its 8-byte header to
/// that region. The outer length is `header + 8 + body + 8`. The first block
/// of each container kind is patched.
///
/// # Errors
/// - [`Error::MissingContainer`] if any of the three containers is absent
/// - [`Error::SizeOverflow`] if a total does not fit a 32-bit length
pub fn reconcile(sequence: &mut BlockSequence) -> Result<ContainerSizes> {
    let mut in_header = false;
    let mut in_body = false;
    let mut header_total = 0u64;
    let mut body_total = 0u64;

    for block in sequence.blocks_mut() {
        if !block.is_container() {
            block.length = fit(block.tag(), block.payload_len() as u64)?;
        }
        match block.kind() {
            BlockKind::End => {
                in_header = false;
                in_body = false;
            }
            BlockKind::Body => in_header = false,
            _ => {}
        }

        let size = u64::from(block.length) + HEADER_SIZE as u64;
        if in_header {
            header_total += size;
        }
        if in_body {
            body_total += size;
        }

        match block.kind() {
            BlockKind::Header => in_header = true,
            BlockKind::Body => in_body = true,
            _ => {}
        }
    }

    let header = fit(tags::HEAD, header_total)?;
    let body = fit(tags::BODY, body_total)?;
    let outer = fit(tags::AQLV, header_total + body_total + 2 * HEADER_SIZE as u64)?;

    let index = |kind: BlockKind| {
        sequence
            .position(kind)
            .ok_or(Error::MissingContainer(kind.tag()))
    };
    let (outer_at, header_at, body_at) = (
        index(BlockKind::Outer)?,
        index(BlockKind::Header)?,
        index(BlockKind::Body)?,
    );
    let blocks = sequence.blocks_mut();
    blocks[outer_at].length = outer;
    blocks[header_at].length = header;
    blocks[body_at].length = body;

    debug!("Reconciled container sizes: AQLV {outer}, HEAD {header}, BODY {body}");
    Ok(ContainerSizes {
        outer,
        header,
        body,
    })
}
