// timestamp_block.rs
use super::{MCDA_BLOCK_SIZE, tags};
use crate::{
    Result, endian,
    blocks::common::{BlockCodec, FourCC},
    text::{Stanza, push_param},
    types::TranscodeContext,
};
use chrono::DateTime;

/// Seconds between 1904-01-01 (the Mac epoch) and 1970-01-01.
pub const MAC_EPOCH_OFFSET: i64 = 2_082_844_800;

/// Timestamp Block (`mcda`) - time of the first sweep.
///
/// The binary form counts seconds from the Mac epoch; the text form counts
/// seconds from the Unix epoch. A stored zero means "unset": it renders as a
/// stanza with no `timestamp` line, and a stanza without one builds back to
/// zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimestampBlock {
    /// Seconds since 1904-01-01 00:00:00, as stored.
    pub mac_seconds: u32,
}

impl TimestampBlock {
    /// Create a block from Unix seconds. Returns `None` if the time is not
    /// representable in the stored 32-bit field.
    pub fn from_unix(seconds: i64) -> Option<Self> {
        let mac = seconds.checked_add(MAC_EPOCH_OFFSET)?;
        u32::try_from(mac).ok().map(|mac_seconds| Self { mac_seconds })
    }

    /// Seconds since the Unix epoch, or `None` when unset.
    pub fn unix_seconds(&self) -> Option<i64> {
        match self.mac_seconds {
            0 => None,
            mac => Some(i64::from(mac) - MAC_EPOCH_OFFSET),
        }
    }
}

impl BlockCodec for TimestampBlock {
    const TAG: FourCC = tags::MCDA;
    const SIZE: usize = MCDA_BLOCK_SIZE;

    fn from_payload(bytes: &[u8]) -> Self {
        Self {
            mac_seconds: endian::read_u32(bytes, 0),
        }
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        endian::write_u32(out, self.mac_seconds);
    }

    fn render(&self, _ctx: &mut TranscodeContext, out: &mut String) -> Result<()> {
        let Some(seconds) = self.unix_seconds() else {
            return Ok(());
        };
        match DateTime::from_timestamp(seconds, 0) {
            Some(utc) => push_param(
                out,
                "timestamp",
                format_args!(
                    "{seconds} (NB: seconds since 1970) ({})",
                    utc.format("%a %b %e %H:%M:%S %Y")
                ),
            ),
            None => push_param(out, "timestamp", format_args!("{seconds} (NB: seconds since 1970)")),
        }
        Ok(())
    }

    fn build(stanza: &Stanza<'_>, _ctx: &mut TranscodeContext) -> Result<Self> {
        const PATTERN: &str = "timestamp:<seconds since 1970>";
        let Some((line, value)) = stanza.find("timestamp") else {
            return Ok(Self::default());
        };
        // Only the leading integer matters; the rest is a human annotation.
        let value = value.trim_start();
        let digits = value
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && c == '-')))
            .map_or(value, |(i, _)| &value[..i]);
        digits
            .parse::<i64>()
            .ok()
            .and_then(Self::from_unix)
            .ok_or_else(|| stanza.malformed(PATTERN, line))
    }
}
