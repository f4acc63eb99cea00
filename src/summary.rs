//! Block statistics for a decoded or built stream.

use std::collections::BTreeMap;

use crate::{
    BlockSequence,
    blocks::{BlockKind, FourCC},
};

#[cfg(feature = "serde")]
use crate::{Error, Result};

/// Counts of what a stream holds.
///
/// Mirrors the tallies a dump of the stream reports: how many blocks of each
/// kind were seen, how many I/Q sample pairs they carry, and which site the
/// signature names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamSummary {
    /// Total number of blocks.
    pub blocks: usize,
    /// Number of blocks of each kind, keyed by tag text.
    pub counts: BTreeMap<String, usize>,
    /// Total I/Q pairs across all sample blocks.
    pub sample_pairs: usize,
    /// Site code from the first signature block.
    pub site_code: Option<String>,
    /// File version from the first signature block.
    pub version: Option<String>,
    /// Number of blocks whose length was clamped while decoding.
    pub clamped_blocks: usize,
}

impl StreamSummary {
    /// Tally the blocks of `sequence`.
    pub fn from_sequence(sequence: &BlockSequence) -> Self {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for block in sequence {
            *counts.entry(block.tag().to_string()).or_default() += 1;
        }
        let signature = sequence.signature();
        Self {
            blocks: sequence.len(),
            counts,
            sample_pairs: sequence.sample_blocks().map(|s| s.len()).sum(),
            site_code: signature.map(|s| s.sitecode.to_string()),
            version: signature.map(|s| s.version.to_string()),
            clamped_blocks: 0,
        }
    }

    /// Number of blocks of `kind`.
    pub fn count(&self, kind: BlockKind) -> usize {
        self.count_tag(kind.tag())
    }

    pub fn count_tag(&self, tag: FourCC) -> usize {
        self.counts.get(&tag.to_string()).copied().unwrap_or(0)
    }

    /// Pretty-printed JSON.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Error::SerializationError(format!("JSON serialization failed: {}", e))
        })
    }

    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            Error::SerializationError(format!("JSON deserialization failed: {}", e))
        })
    }
}
