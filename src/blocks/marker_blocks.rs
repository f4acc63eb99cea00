// marker_blocks.rs
//! Single-integer body blocks: `gtag`, `atag` and `indx`.

use super::{MARKER_BLOCK_SIZE, tags};
use crate::{
    Result, endian,
    blocks::common::{BlockCodec, FourCC},
    text::{Stanza, push_param},
    types::TranscodeContext,
};

/// Group Tag Block (`gtag`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupTagBlock {
    pub gtag: u32,
}

/// Antenna Tag Block (`atag`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AntennaTagBlock {
    pub atag: u32,
}

/// Sweep Index Block (`indx`).
///
/// The most recent index is kept in the context so errors in the sample
/// blocks that follow can say which sweep they belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexBlock {
    pub index: u32,
}

impl BlockCodec for GroupTagBlock {
    const TAG: FourCC = tags::GTAG;
    const SIZE: usize = MARKER_BLOCK_SIZE;

    fn from_payload(bytes: &[u8]) -> Self {
        Self {
            gtag: endian::read_u32(bytes, 0),
        }
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        endian::write_u32(out, self.gtag);
    }

    fn render(&self, _ctx: &mut TranscodeContext, out: &mut String) -> Result<()> {
        push_param(out, "gtag", self.gtag);
        Ok(())
    }

    fn build(stanza: &Stanza<'_>, _ctx: &mut TranscodeContext) -> Result<Self> {
        Ok(Self {
            gtag: stanza.int("gtag")?,
        })
    }
}

impl BlockCodec for AntennaTagBlock {
    const TAG: FourCC = tags::ATAG;
    const SIZE: usize = MARKER_BLOCK_SIZE;

    fn from_payload(bytes: &[u8]) -> Self {
        Self {
            atag: endian::read_u32(bytes, 0),
        }
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        endian::write_u32(out, self.atag);
    }

    fn render(&self, _ctx: &mut TranscodeContext, out: &mut String) -> Result<()> {
        push_param(out, "atag", self.atag);
        Ok(())
    }

    fn build(stanza: &Stanza<'_>, _ctx: &mut TranscodeContext) -> Result<Self> {
        Ok(Self {
            atag: stanza.int("atag")?,
        })
    }
}

impl BlockCodec for IndexBlock {
    const TAG: FourCC = tags::INDX;
    const SIZE: usize = MARKER_BLOCK_SIZE;

    fn from_payload(bytes: &[u8]) -> Self {
        Self {
            index: endian::read_u32(bytes, 0),
        }
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        endian::write_u32(out, self.index);
    }

    fn render(&self, ctx: &mut TranscodeContext, out: &mut String) -> Result<()> {
        ctx.index = Some(self.index);
        push_param(out, "index", self.index);
        Ok(())
    }

    fn build(stanza: &Stanza<'_>, ctx: &mut TranscodeContext) -> Result<Self> {
        let index = stanza.int("index")?;
        ctx.index = Some(index);
        Ok(Self { index })
    }
}
