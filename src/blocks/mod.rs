// src/blocks/mod.rs

// ============================================================================
// Block Size Constants (internal use only)
// ============================================================================
// Fixed payload sizes for TS block structures. The sample block (alvl) has no
// fixed size; its length is a whole number of I/Q pairs.

/// Signature block size (208 bytes) - 3 codes, flags and three text fields.
pub(crate) const SIGN_BLOCK_SIZE: usize = 208;

/// Width of each fixed text field in the signature block.
pub(crate) const SIGN_TEXT_SIZE: usize = 64;

/// Timestamp block size (4 bytes).
pub(crate) const MCDA_BLOCK_SIZE: usize = 4;

/// Constants block size (16 bytes) - four 32-bit integers.
pub(crate) const CNST_BLOCK_SIZE: usize = 16;

/// Sweep block size (32 bytes, packed) - int, three doubles, int.
pub(crate) const SWEP_BLOCK_SIZE: usize = 32;

/// Format block size (8 bytes) - two codes.
pub(crate) const FBIN_BLOCK_SIZE: usize = 8;

/// Group tag, antenna tag and index block size (4 bytes).
pub(crate) const MARKER_BLOCK_SIZE: usize = 4;

/// Scale block size (16 bytes) - two doubles.
pub(crate) const SCAL_BLOCK_SIZE: usize = 16;

/// One I/Q pair in a sample block (two 16-bit integers).
pub(crate) const SAMPLE_PAIR_SIZE: usize = 4;

// ============================================================================
// Submodules
// ============================================================================

mod common;
mod constants_block;
mod format_block;
mod marker_blocks;
mod sample_block;
mod scale_block;
mod signature_block;
mod sweep_block;
mod timestamp_block;

pub use common::{
    BlockCodec, BlockHeader, FourCC, HEADER_SIZE, fixed_field_from_text, fixed_field_text,
    latin1_decode, latin1_encode,
};

pub use constants_block::ConstantsBlock;
pub use format_block::FormatBlock;
pub use marker_blocks::{AntennaTagBlock, GroupTagBlock, IndexBlock};
pub use sample_block::{IqSample, SampleBlock, dequantize, quantize};
pub use scale_block::ScaleBlock;
pub use signature_block::SignatureBlock;
pub use sweep_block::SweepBlock;
pub use timestamp_block::{MAC_EPOCH_OFFSET, TimestampBlock};

use crate::{
    Error, Result,
    error::Location,
    text::Stanza,
    types::TranscodeContext,
};

/// Tag values of the fourteen known block types and the sample format codes.
pub mod tags {
    use super::FourCC;

    /// Outer container; wraps the whole record.
    pub const AQLV: FourCC = FourCC::new(b"AQLV");
    /// Header container; closed by `BODY` or `END `.
    pub const HEAD: FourCC = FourCC::new(b"HEAD");
    pub const SIGN: FourCC = FourCC::new(b"sign");
    pub const MCDA: FourCC = FourCC::new(b"mcda");
    pub const CNST: FourCC = FourCC::new(b"cnst");
    pub const SWEP: FourCC = FourCC::new(b"swep");
    pub const FBIN: FourCC = FourCC::new(b"fbin");
    /// Body container; closed by `END `.
    pub const BODY: FourCC = FourCC::new(b"BODY");
    pub const GTAG: FourCC = FourCC::new(b"gtag");
    pub const ATAG: FourCC = FourCC::new(b"atag");
    pub const INDX: FourCC = FourCC::new(b"indx");
    pub const SCAL: FourCC = FourCC::new(b"scal");
    pub const ALVL: FourCC = FourCC::new(b"alvl");
    /// End marker; closes every open region.
    pub const END: FourCC = FourCC::new(b"END ");

    pub const FORMAT_CVIQ: FourCC = FourCC::new(b"cviq");
    pub const FORMAT_FLT4: FourCC = FourCC::new(b"flt4");
    pub const FORMAT_FIX2: FourCC = FourCC::new(b"fix2");
    pub const FORMAT_FIX3: FourCC = FourCC::new(b"fix3");
    pub const FORMAT_FIX4: FourCC = FourCC::new(b"fix4");
}

// ============================================================================
// Block registry
// ============================================================================

/// The fourteen known block types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockKind {
    Outer,
    Header,
    Signature,
    Timestamp,
    Constants,
    Sweep,
    Format,
    Body,
    GroupTag,
    AntennaTag,
    Index,
    Scale,
    Samples,
    End,
}

impl BlockKind {
    /// Every kind, in the order they appear in a well-formed record.
    pub const ALL: [BlockKind; 14] = [
        BlockKind::Outer,
        BlockKind::Header,
        BlockKind::Signature,
        BlockKind::Timestamp,
        BlockKind::Constants,
        BlockKind::Sweep,
        BlockKind::Format,
        BlockKind::Body,
        BlockKind::GroupTag,
        BlockKind::AntennaTag,
        BlockKind::Index,
        BlockKind::Scale,
        BlockKind::Samples,
        BlockKind::End,
    ];

    /// Look up the kind for a tag. A zero tag is never a known kind.
    pub fn from_tag(tag: FourCC) -> Option<Self> {
        Some(match tag {
            tags::AQLV => BlockKind::Outer,
            tags::HEAD => BlockKind::Header,
            tags::SIGN => BlockKind::Signature,
            tags::MCDA => BlockKind::Timestamp,
            tags::CNST => BlockKind::Constants,
            tags::SWEP => BlockKind::Sweep,
            tags::FBIN => BlockKind::Format,
            tags::BODY => BlockKind::Body,
            tags::GTAG => BlockKind::GroupTag,
            tags::ATAG => BlockKind::AntennaTag,
            tags::INDX => BlockKind::Index,
            tags::SCAL => BlockKind::Scale,
            tags::ALVL => BlockKind::Samples,
            tags::END => BlockKind::End,
            _ => return None,
        })
    }

    pub fn tag(self) -> FourCC {
        match self {
            BlockKind::Outer => tags::AQLV,
            BlockKind::Header => tags::HEAD,
            BlockKind::Signature => SignatureBlock::TAG,
            BlockKind::Timestamp => TimestampBlock::TAG,
            BlockKind::Constants => ConstantsBlock::TAG,
            BlockKind::Sweep => SweepBlock::TAG,
            BlockKind::Format => FormatBlock::TAG,
            BlockKind::Body => tags::BODY,
            BlockKind::GroupTag => GroupTagBlock::TAG,
            BlockKind::AntennaTag => AntennaTagBlock::TAG,
            BlockKind::Index => IndexBlock::TAG,
            BlockKind::Scale => ScaleBlock::TAG,
            BlockKind::Samples => SampleBlock::TAG,
            BlockKind::End => tags::END,
        }
    }

    /// Containers carry no payload of their own; their length spans the
    /// blocks that follow them.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            BlockKind::Outer | BlockKind::Header | BlockKind::Body | BlockKind::End
        )
    }

    /// Minimum payload size of the kind (zero for containers and samples).
    pub fn min_size(self) -> usize {
        match self {
            BlockKind::Signature => SIGN_BLOCK_SIZE,
            BlockKind::Timestamp => MCDA_BLOCK_SIZE,
            BlockKind::Constants => CNST_BLOCK_SIZE,
            BlockKind::Sweep => SWEP_BLOCK_SIZE,
            BlockKind::Format => FBIN_BLOCK_SIZE,
            BlockKind::GroupTag | BlockKind::AntennaTag | BlockKind::Index => MARKER_BLOCK_SIZE,
            BlockKind::Scale => SCAL_BLOCK_SIZE,
            _ => 0,
        }
    }
}

/// Decoded contents of a block.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockData {
    Outer,
    Header,
    Signature(SignatureBlock),
    Timestamp(TimestampBlock),
    Constants(ConstantsBlock),
    Sweep(SweepBlock),
    Format(FormatBlock),
    Body,
    GroupTag(GroupTagBlock),
    AntennaTag(AntennaTagBlock),
    Index(IndexBlock),
    Scale(ScaleBlock),
    Samples(SampleBlock),
    End,
}

// One arm per payload kind; `$b` is bound to the payload and `$e` is
// evaluated with it. Containers fall through to `$container`.
macro_rules! dispatch {
    ($data:expr, $b:ident => $e:expr, $container:expr) => {
        match $data {
            BlockData::Signature($b) => $e,
            BlockData::Timestamp($b) => $e,
            BlockData::Constants($b) => $e,
            BlockData::Sweep($b) => $e,
            BlockData::Format($b) => $e,
            BlockData::GroupTag($b) => $e,
            BlockData::AntennaTag($b) => $e,
            BlockData::Index($b) => $e,
            BlockData::Scale($b) => $e,
            BlockData::Samples($b) => $e,
            BlockData::Outer | BlockData::Header | BlockData::Body | BlockData::End => $container,
        }
    };
}

impl BlockData {
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockData::Outer => BlockKind::Outer,
            BlockData::Header => BlockKind::Header,
            BlockData::Signature(_) => BlockKind::Signature,
            BlockData::Timestamp(_) => BlockKind::Timestamp,
            BlockData::Constants(_) => BlockKind::Constants,
            BlockData::Sweep(_) => BlockKind::Sweep,
            BlockData::Format(_) => BlockKind::Format,
            BlockData::Body => BlockKind::Body,
            BlockData::GroupTag(_) => BlockKind::GroupTag,
            BlockData::AntennaTag(_) => BlockKind::AntennaTag,
            BlockData::Index(_) => BlockKind::Index,
            BlockData::Scale(_) => BlockKind::Scale,
            BlockData::Samples(_) => BlockKind::Samples,
            BlockData::End => BlockKind::End,
        }
    }

    /// An empty container of the given kind, or `None` for payload kinds.
    pub fn container(kind: BlockKind) -> Option<Self> {
        match kind {
            BlockKind::Outer => Some(BlockData::Outer),
            BlockKind::Header => Some(BlockData::Header),
            BlockKind::Body => Some(BlockData::Body),
            BlockKind::End => Some(BlockData::End),
            _ => None,
        }
    }

    /// Decode the payload of a non-container block.
    fn parse(kind: BlockKind, payload: &[u8], offset: usize) -> Result<Self> {
        Ok(match kind {
            BlockKind::Signature => BlockData::Signature(SignatureBlock::parse(payload, offset)?),
            BlockKind::Timestamp => BlockData::Timestamp(TimestampBlock::parse(payload, offset)?),
            BlockKind::Constants => BlockData::Constants(ConstantsBlock::parse(payload, offset)?),
            BlockKind::Sweep => BlockData::Sweep(SweepBlock::parse(payload, offset)?),
            BlockKind::Format => BlockData::Format(FormatBlock::parse(payload, offset)?),
            BlockKind::GroupTag => BlockData::GroupTag(GroupTagBlock::parse(payload, offset)?),
            BlockKind::AntennaTag => BlockData::AntennaTag(AntennaTagBlock::parse(payload, offset)?),
            BlockKind::Index => BlockData::Index(IndexBlock::parse(payload, offset)?),
            BlockKind::Scale => BlockData::Scale(ScaleBlock::parse(payload, offset)?),
            BlockKind::Samples => BlockData::Samples(SampleBlock::parse(payload, offset)?),
            BlockKind::Outer => BlockData::Outer,
            BlockKind::Header => BlockData::Header,
            BlockKind::Body => BlockData::Body,
            BlockKind::End => BlockData::End,
        })
    }

    fn build(kind: BlockKind, stanza: &Stanza<'_>, ctx: &mut TranscodeContext) -> Result<Self> {
        Ok(match kind {
            BlockKind::Signature => BlockData::Signature(SignatureBlock::build(stanza, ctx)?),
            BlockKind::Timestamp => BlockData::Timestamp(TimestampBlock::build(stanza, ctx)?),
            BlockKind::Constants => BlockData::Constants(ConstantsBlock::build(stanza, ctx)?),
            BlockKind::Sweep => BlockData::Sweep(SweepBlock::build(stanza, ctx)?),
            BlockKind::Format => BlockData::Format(FormatBlock::build(stanza, ctx)?),
            BlockKind::GroupTag => BlockData::GroupTag(GroupTagBlock::build(stanza, ctx)?),
            BlockKind::AntennaTag => BlockData::AntennaTag(AntennaTagBlock::build(stanza, ctx)?),
            BlockKind::Index => BlockData::Index(IndexBlock::build(stanza, ctx)?),
            BlockKind::Scale => BlockData::Scale(ScaleBlock::build(stanza, ctx)?),
            BlockKind::Samples => BlockData::Samples(SampleBlock::build(stanza, ctx)?),
            BlockKind::Outer => BlockData::Outer,
            BlockKind::Header => BlockData::Header,
            BlockKind::Body => BlockData::Body,
            BlockKind::End => BlockData::End,
        })
    }

    /// Number of bytes [`Self::write_payload`] appends.
    pub fn encoded_len(&self) -> usize {
        dispatch!(self, b => b.encoded_len(), 0)
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        dispatch!(self, b => b.write_payload(out), ())
    }

    fn render(&self, ctx: &mut TranscodeContext, out: &mut String) -> Result<()> {
        dispatch!(self, b => b.render(ctx, out), Ok(()))
    }
}

/// One block of the stream: header fields plus decoded payload.
///
/// Containers are bracket markers in the flat sequence; their `length` spans
/// the blocks that follow up to the matching close marker. For payload
/// blocks `length` is the payload size, which always equals
/// [`Block::payload_len`] for blocks produced by the decoder or the builder.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    /// Declared payload length, excluding the 8-byte header.
    pub length: u32,
    pub data: BlockData,
    /// Payload bytes beyond the type's fixed layout, kept verbatim.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub trailing: Vec<u8>,
}

impl Block {
    /// Wrap decoded contents. The length is taken from the encoded payload;
    /// containers start at zero until reconciled.
    ///
    /// # Errors
    /// [`Error::SizeOverflow`] if the payload does not fit a 32-bit length.
    pub fn new(data: BlockData) -> Result<Self> {
        let size = data.encoded_len();
        let length = u32::try_from(size).map_err(|_| Error::SizeOverflow {
            tag: data.kind().tag(),
            size: size as u64,
        })?;
        Ok(Self {
            length,
            data,
            trailing: Vec::new(),
        })
    }

    /// An empty container block of the given kind.
    pub fn container(kind: BlockKind) -> Option<Self> {
        BlockData::container(kind).map(|data| Self {
            length: 0,
            data,
            trailing: Vec::new(),
        })
    }

    pub fn kind(&self) -> BlockKind {
        self.data.kind()
    }

    pub fn tag(&self) -> FourCC {
        self.kind().tag()
    }

    pub fn is_container(&self) -> bool {
        self.kind().is_container()
    }

    /// Bytes this block contributes after its header: the declared length for
    /// containers, the encoded payload for everything else.
    pub fn payload_len(&self) -> usize {
        if self.is_container() {
            self.length as usize
        } else {
            self.data.encoded_len() + self.trailing.len()
        }
    }

    /// Decode a non-container block from its (already clamped) payload.
    ///
    /// # Arguments
    /// * `header` - The block header, with `length` equal to `payload.len()`.
    /// * `payload` - Payload bytes in stream order.
    /// * `offset` - Absolute offset of the header, for error reporting.
    pub fn decode(header: BlockHeader, payload: &[u8], offset: usize) -> Result<Self> {
        let kind = BlockKind::from_tag(header.tag).ok_or(Error::UnknownBlockType {
            tag: header.tag,
            location: Location::Offset(offset),
        })?;
        let data = BlockData::parse(kind, payload, offset)?;
        let used = data.encoded_len().min(payload.len());
        let trailing = if kind.is_container() {
            Vec::new()
        } else {
            payload[used..].to_vec()
        };
        Ok(Self {
            length: header.length,
            data,
            trailing,
        })
    }

    /// Build a block from its text stanza.
    ///
    /// The stanza's tag selects the block type; containers ignore any lines
    /// and start with a zero length for the size reconciler to fill in.
    pub fn build(stanza: &Stanza<'_>, ctx: &mut TranscodeContext) -> Result<Self> {
        let kind = BlockKind::from_tag(stanza.tag()).ok_or(Error::UnknownBlockType {
            tag: stanza.tag(),
            location: Location::Line(stanza.line()),
        })?;
        Block::new(BlockData::build(kind, stanza, ctx)?)
    }

    /// Render the stanza for this block: tag line, `key:value` lines and a
    /// blank separator.
    pub fn render(&self, ctx: &mut TranscodeContext, out: &mut String) -> Result<()> {
        out.push_str(&self.tag().to_string());
        out.push('\n');
        self.data.render(ctx, out)?;
        out.push('\n');
        Ok(())
    }

    /// Append header and payload in stream order.
    ///
    /// # Errors
    /// [`Error::SizeOverflow`] if a payload no longer fits the length field.
    pub fn write(&self, out: &mut Vec<u8>) -> Result<()> {
        let size = self.payload_len();
        let length = if self.is_container() {
            self.length
        } else {
            u32::try_from(size).map_err(|_| Error::SizeOverflow {
                tag: self.tag(),
                size: size as u64,
            })?
        };
        BlockHeader {
            tag: self.tag(),
            length,
        }
        .write(out);
        self.data.write_payload(out);
        out.extend_from_slice(&self.trailing);
        Ok(())
    }

    /// Total bytes [`Block::write`] appends.
    pub fn encoded_size(&self) -> usize {
        HEADER_SIZE
            + if self.is_container() {
                0
            } else {
                self.payload_len()
            }
    }
}
