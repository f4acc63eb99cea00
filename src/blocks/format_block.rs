// format_block.rs
use super::{FBIN_BLOCK_SIZE, tags};
use crate::{
    Result,
    blocks::common::{BlockCodec, FourCC},
    text::{Stanza, push_param},
    types::{SampleFormat, TranscodeContext},
};

/// Format Block (`fbin`) - layout of the sample blocks that follow.
///
/// Rendering or building this block records `sample_type` in the context as
/// the selector for later `alvl` blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatBlock {
    /// Sample arrangement, normally `"cviq"`.
    pub format: FourCC,
    /// Sample type: `"flt4"`, `"fix2"`, `"fix3"` or `"fix4"`.
    pub sample_type: FourCC,
}

impl Default for FormatBlock {
    fn default() -> Self {
        Self {
            format: tags::FORMAT_CVIQ,
            sample_type: tags::FORMAT_FIX2,
        }
    }
}

impl FormatBlock {
    /// The decoded sample format, if the type code is recognized.
    pub fn sample_format(&self) -> Option<SampleFormat> {
        SampleFormat::from_selector(self.sample_type)
    }
}

impl BlockCodec for FormatBlock {
    const TAG: FourCC = tags::FBIN;
    const SIZE: usize = FBIN_BLOCK_SIZE;

    fn from_payload(bytes: &[u8]) -> Self {
        Self {
            format: FourCC::read(bytes, 0),
            sample_type: FourCC::read(bytes, 4),
        }
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        self.format.write(out);
        self.sample_type.write(out);
    }

    fn render(&self, ctx: &mut TranscodeContext, out: &mut String) -> Result<()> {
        ctx.selector = Some(self.sample_type);
        push_param(out, "format", self.format);
        push_param(out, "type", self.sample_type);
        Ok(())
    }

    fn build(stanza: &Stanza<'_>, ctx: &mut TranscodeContext) -> Result<Self> {
        let block = Self {
            format: stanza.fourcc("format")?,
            sample_type: stanza.fourcc("type")?,
        };
        ctx.selector = Some(block.sample_type);
        Ok(block)
    }
}
