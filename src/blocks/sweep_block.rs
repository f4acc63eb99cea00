// sweep_block.rs
use super::{SWEP_BLOCK_SIZE, tags};
use crate::{
    Result, endian,
    blocks::common::{BlockCodec, FourCC},
    text::{Stanza, push_float, push_param},
    types::TranscodeContext,
};

/// Sweep Block (`swep`) - chirp parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepBlock {
    /// Samples per sweep per channel (normally 2048).
    pub samplespersweep: i32,
    /// Sweep start frequency in Hz.
    pub sweepstart: f64,
    /// Sweep bandwidth in Hz.
    pub sweepbandwidth: f64,
    /// Sweep rate in Hz.
    pub sweeprate: f64,
    /// Range offset (unused by the acquisition software).
    pub rangeoffset: i32,
}

impl BlockCodec for SweepBlock {
    const TAG: FourCC = tags::SWEP;
    const SIZE: usize = SWEP_BLOCK_SIZE;

    /// # Structure (32 bytes, packed):
    /// - samplespersweep: i32 at 0
    /// - sweepstart, sweepbandwidth, sweeprate: f64 at 4, 12, 20
    /// - rangeoffset: i32 at 28
    fn from_payload(bytes: &[u8]) -> Self {
        Self {
            samplespersweep: endian::read_i32(bytes, 0),
            sweepstart: endian::read_f64(bytes, 4),
            sweepbandwidth: endian::read_f64(bytes, 12),
            sweeprate: endian::read_f64(bytes, 20),
            rangeoffset: endian::read_i32(bytes, 28),
        }
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        endian::write_i32(out, self.samplespersweep);
        endian::write_f64(out, self.sweepstart);
        endian::write_f64(out, self.sweepbandwidth);
        endian::write_f64(out, self.sweeprate);
        endian::write_i32(out, self.rangeoffset);
    }

    fn render(&self, _ctx: &mut TranscodeContext, out: &mut String) -> Result<()> {
        push_param(out, "samplespersweep", self.samplespersweep);
        push_float(out, "sweepstart", self.sweepstart);
        push_float(out, "sweepbandwidth", self.sweepbandwidth);
        push_float(out, "sweeprate", self.sweeprate);
        push_param(out, "rangeoffset", self.rangeoffset);
        Ok(())
    }

    fn build(stanza: &Stanza<'_>, _ctx: &mut TranscodeContext) -> Result<Self> {
        Ok(Self {
            samplespersweep: stanza.int("samplespersweep")?,
            sweepstart: stanza.float("sweepstart")?,
            sweepbandwidth: stanza.float("sweepbandwidth")?,
            sweeprate: stanza.float("sweeprate")?,
            rangeoffset: stanza.int("rangeoffset")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_layout() -> Result<()> {
        let swep = SweepBlock {
            samplespersweep: 2048,
            sweepstart: 4_537_000.0,
            sweepbandwidth: -25_733.913_043_478_26,
            sweeprate: 2.0,
            rangeoffset: 0,
        };
        let mut bytes = Vec::new();
        swep.write_payload(&mut bytes);
        assert_eq!(bytes.len(), SWEP_BLOCK_SIZE);
        assert_eq!(&bytes[0..4], &2048i32.to_be_bytes());
        assert_eq!(&bytes[4..12], &4_537_000.0f64.to_be_bytes());
        assert_eq!(SweepBlock::parse(&bytes, 0)?, swep);
        Ok(())
    }

    #[test]
    fn float_text_round_trips() -> Result<()> {
        let swep = SweepBlock {
            samplespersweep: 2048,
            sweepstart: 13_450_000.0,
            sweepbandwidth: 100_250.5,
            sweeprate: 1.9999999999999,
            rangeoffset: -3,
        };
        let mut out = String::new();
        swep.render(&mut TranscodeContext::new(), &mut out)?;
        assert!(out.contains("sweepstart:13450000.00000000000000000000\n"));

        let lines: Vec<(usize, &str)> = out.lines().enumerate().map(|(i, l)| (i + 2, l)).collect();
        let stanza = Stanza::new(SweepBlock::TAG, 1, lines);
        assert_eq!(SweepBlock::build(&stanza, &mut TranscodeContext::new())?, swep);
        Ok(())
    }
}
