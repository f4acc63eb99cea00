//! The flat, ordered list of blocks passed between every stage.

use crate::blocks::{Block, BlockData, BlockKind, SampleBlock, SignatureBlock};

/// Blocks in file order.
///
/// Containers are not nested structurally: each container block is a bracket
/// marker followed by the blocks it encloses, so every stage can walk the
/// sequence linearly.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BlockSequence {
    blocks: Vec<Block>,
}

impl BlockSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            blocks: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    /// Index of the first block of `kind`.
    pub fn position(&self, kind: BlockKind) -> Option<usize> {
        self.blocks.iter().position(|b| b.kind() == kind)
    }

    /// The first block of `kind`.
    pub fn find(&self, kind: BlockKind) -> Option<&Block> {
        self.blocks.iter().find(|b| b.kind() == kind)
    }

    /// The first signature block, if any.
    pub fn signature(&self) -> Option<&SignatureBlock> {
        self.blocks.iter().find_map(|b| match &b.data {
            BlockData::Signature(sign) => Some(sign),
            _ => None,
        })
    }

    /// Every sample block, in order.
    pub fn sample_blocks(&self) -> impl Iterator<Item = &SampleBlock> {
        self.blocks.iter().filter_map(|b| match &b.data {
            BlockData::Samples(samples) => Some(samples),
            _ => None,
        })
    }

    /// Bytes the serializer will produce for this sequence.
    pub fn encoded_size(&self) -> usize {
        self.blocks.iter().map(Block::encoded_size).sum()
    }
}

impl From<Vec<Block>> for BlockSequence {
    fn from(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
}

impl FromIterator<Block> for BlockSequence {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self {
            blocks: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a BlockSequence {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

impl IntoIterator for BlockSequence {
    type Item = Block;
    type IntoIter = std::vec::IntoIter<Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}
