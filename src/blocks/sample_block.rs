// sample_block.rs
use super::{SAMPLE_PAIR_SIZE, tags};
use crate::{
    Error, Result, endian,
    blocks::common::{BlockCodec, FourCC},
    text::{Stanza, push_float},
    types::{SampleFormat, TranscodeContext},
};

/// One stored I/Q sample pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IqSample {
    pub i: i16,
    pub q: i16,
}

/// Convert a stored sample to physical units.
#[inline]
pub fn dequantize(raw: i16, scale: f64, format: SampleFormat) -> f64 {
    f64::from(raw) / format.full_scale() * scale
}

/// Convert a physical value to the nearest stored sample.
///
/// Returns `None` when the result does not fit the 16-bit storage (this
/// includes a zero scale factor and non-finite input).
#[inline]
pub fn quantize(value: f64, scale: f64, format: SampleFormat) -> Option<i16> {
    let rounded = (value / scale * format.full_scale()).round();
    if rounded >= f64::from(i16::MIN) && rounded <= f64::from(i16::MAX) {
        Some(rounded as i16)
    } else {
        None
    }
}

/// Sample Block (`alvl`) - the scaled I/Q sample array of one sweep.
///
/// Samples are stored as fixed-point integers. Their physical value depends
/// on the sample format of the preceding `fbin` block and the scale factors
/// of the preceding `scal` block, both read from the [`TranscodeContext`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleBlock {
    pub samples: Vec<IqSample>,
}

impl SampleBlock {
    pub fn new(samples: Vec<IqSample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Physical `(i, q)` values for each stored pair.
    pub fn physical_values(&self, format: SampleFormat, scales: (f64, f64)) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .map(|s| {
                (
                    dequantize(s.i, scales.0, format),
                    dequantize(s.q, scales.1, format),
                )
            })
            .collect()
    }
}

impl BlockCodec for SampleBlock {
    const TAG: FourCC = tags::ALVL;
    // Variable length: any whole number of pairs, including none.
    const SIZE: usize = 0;

    fn from_payload(bytes: &[u8]) -> Self {
        let samples = bytes
            .chunks_exact(SAMPLE_PAIR_SIZE)
            .map(|pair| IqSample {
                i: endian::read_i16(pair, 0),
                q: endian::read_i16(pair, 2),
            })
            .collect();
        Self { samples }
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        out.reserve(self.samples.len() * SAMPLE_PAIR_SIZE);
        for sample in &self.samples {
            endian::write_i16(out, sample.i);
            endian::write_i16(out, sample.q);
        }
    }

    fn encoded_len(&self) -> usize {
        self.samples.len() * SAMPLE_PAIR_SIZE
    }

    fn render(&self, ctx: &mut TranscodeContext, out: &mut String) -> Result<()> {
        let format = ctx.sample_format()?;
        let (scale_i, scale_q) = ctx.scales()?;
        // "i:" + sign + digits + ".": roughly 32 bytes per line
        out.reserve(self.samples.len() * 64);
        for sample in &self.samples {
            push_float(out, "i", dequantize(sample.i, scale_i, format));
            push_float(out, "q", dequantize(sample.q, scale_q, format));
        }
        Ok(())
    }

    fn build(stanza: &Stanza<'_>, ctx: &mut TranscodeContext) -> Result<Self> {
        let lines = stanza.lines();
        if lines.len() % 2 == 1 {
            return Err(Error::OddSampleCount {
                count: lines.len(),
                line: stanza.line(),
            });
        }
        let format = ctx.sample_format()?;
        let (scale_i, scale_q) = ctx.scales()?;

        let mut samples = Vec::with_capacity(lines.len() / 2);
        for pair in lines.chunks_exact(2) {
            let i = sample_value(stanza, pair[0], "i", scale_i, format)?;
            let q = sample_value(stanza, pair[1], "q", scale_q, format)?;
            samples.push(IqSample { i, q });
        }
        Ok(Self { samples })
    }
}

fn sample_value(
    stanza: &Stanza<'_>,
    (line, text): (usize, &str),
    key: &'static str,
    scale: f64,
    format: SampleFormat,
) -> Result<i16> {
    let pattern = || format!("{key}:<float within 16-bit full scale>");
    let value = match text.split_once(':') {
        Some((k, v)) if k == key => v.trim().parse::<f64>().ok(),
        _ => None,
    };
    value
        .and_then(|v| quantize(v, scale, format))
        .ok_or_else(|| stanza.malformed(pattern(), line))
}
