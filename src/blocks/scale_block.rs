// scale_block.rs
use super::{SCAL_BLOCK_SIZE, tags};
use crate::{
    Result, endian,
    blocks::common::{BlockCodec, FourCC},
    text::{Stanza, push_float},
    types::TranscodeContext,
};

/// Scale Block (`scal`) - physical scale of the I and Q sample channels.
///
/// Rendering or building this block stores both factors in the context for
/// the sample blocks that follow.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaleBlock {
    /// Scale factor for I samples.
    pub scalar_one: f64,
    /// Scale factor for Q samples.
    pub scalar_two: f64,
}

impl BlockCodec for ScaleBlock {
    const TAG: FourCC = tags::SCAL;
    const SIZE: usize = SCAL_BLOCK_SIZE;

    fn from_payload(bytes: &[u8]) -> Self {
        Self {
            scalar_one: endian::read_f64(bytes, 0),
            scalar_two: endian::read_f64(bytes, 8),
        }
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        endian::write_f64(out, self.scalar_one);
        endian::write_f64(out, self.scalar_two);
    }

    fn render(&self, ctx: &mut TranscodeContext, out: &mut String) -> Result<()> {
        ctx.scale_i = Some(self.scalar_one);
        ctx.scale_q = Some(self.scalar_two);
        push_float(out, "scalar_one", self.scalar_one);
        push_float(out, "scalar_two", self.scalar_two);
        Ok(())
    }

    fn build(stanza: &Stanza<'_>, ctx: &mut TranscodeContext) -> Result<Self> {
        let block = Self {
            scalar_one: stanza.float("scalar_one")?,
            scalar_two: stanza.float("scalar_two")?,
        };
        ctx.scale_i = Some(block.scalar_one);
        ctx.scale_q = Some(block.scalar_two);
        Ok(block)
    }
}
