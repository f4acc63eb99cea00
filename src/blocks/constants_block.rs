// constants_block.rs
use super::{CNST_BLOCK_SIZE, tags};
use crate::{
    Result, endian,
    blocks::common::{BlockCodec, FourCC},
    text::{Stanza, push_param},
    types::TranscodeContext,
};

/// Constants Block (`cnst`) - acquisition dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantsBlock {
    pub nchannels: i32,   // bytes[0..4], normally 3 antennas
    pub nsweeps: i32,     // bytes[4..8], normally 32
    pub nsamples: i32,    // bytes[8..12], normally 2048
    pub iqindicator: i32, // bytes[12..16], 2 = IQ
}

impl BlockCodec for ConstantsBlock {
    const TAG: FourCC = tags::CNST;
    const SIZE: usize = CNST_BLOCK_SIZE;

    fn from_payload(bytes: &[u8]) -> Self {
        Self {
            nchannels: endian::read_i32(bytes, 0),
            nsweeps: endian::read_i32(bytes, 4),
            nsamples: endian::read_i32(bytes, 8),
            iqindicator: endian::read_i32(bytes, 12),
        }
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        endian::write_i32(out, self.nchannels);
        endian::write_i32(out, self.nsweeps);
        endian::write_i32(out, self.nsamples);
        endian::write_i32(out, self.iqindicator);
    }

    fn render(&self, _ctx: &mut TranscodeContext, out: &mut String) -> Result<()> {
        push_param(out, "nchannels", self.nchannels);
        push_param(out, "nsweeps", self.nsweeps);
        push_param(out, "nsamples", self.nsamples);
        push_param(out, "iqindicator", self.iqindicator);
        Ok(())
    }

    fn build(stanza: &Stanza<'_>, _ctx: &mut TranscodeContext) -> Result<Self> {
        Ok(Self {
            nchannels: stanza.int("nchannels")?,
            nsweeps: stanza.int("nsweeps")?,
            nsamples: stanza.int("nsamples")?,
            iqindicator: stanza.int("iqindicator")?,
        })
    }
}
