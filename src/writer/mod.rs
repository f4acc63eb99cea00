//! TS stream writer module.
//!
//! Turning a block sequence back into bytes takes two steps:
//!
//! 1. [`reconcile`] recomputes the container lengths from the blocks they
//!    enclose. Sequences built from text need this; decoded sequences
//!    already carry consistent lengths.
//! 2. [`TsWriter`] (or the [`serialize`] shorthand) writes every block header
//!    and payload in big-endian stream order.
//!
//! # Example
//!
//! ```no_run
//! use codar_ts::{Result, text, writer};
//!
//! fn text_to_binary(text: &str) -> Result<Vec<u8>> {
//!     let mut sequence = text::build(text)?;
//!     writer::reconcile(&mut sequence)?;
//!     writer::serialize(&sequence)
//! }
//! ```

mod sizes;
mod traits;

pub use sizes::{ContainerSizes, reconcile};
pub use traits::{FileWriter, TsWrite, VecWriter};

use std::path::Path;

use log::debug;

use crate::{BlockSequence, Result};

/// Writes block sequences to a [`TsWrite`] sink.
pub struct TsWriter<W: TsWrite> {
    writer: W,
    scratch: Vec<u8>,
    blocks_written: usize,
}

impl TsWriter<FileWriter> {
    /// Create a writer for the file at `path` using a 1 MB buffer.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_writer(FileWriter::new(path)?))
    }
}

impl<W: TsWrite> TsWriter<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer,
            scratch: Vec::new(),
            blocks_written: 0,
        }
    }

    /// Write every block of `sequence` in order.
    ///
    /// Each block is encoded in full before any of its bytes reach the sink,
    /// so a block that fails to encode writes nothing. Blocks before it have
    /// already been written.
    pub fn write_sequence(&mut self, sequence: &BlockSequence) -> Result<u64> {
        let start = self.writer.position();
        for block in sequence {
            self.scratch.clear();
            block.write(&mut self.scratch)?;
            self.writer.write_all(&self.scratch)?;
            self.blocks_written += 1;
        }
        Ok(self.writer.position() - start)
    }

    pub fn blocks_written(&self) -> usize {
        self.blocks_written
    }

    /// Flush the sink and return it.
    pub fn finalize(mut self) -> Result<W> {
        self.writer.flush()?;
        debug!(
            "Wrote {} blocks ({} bytes)",
            self.blocks_written,
            self.writer.position()
        );
        Ok(self.writer)
    }
}

/// Serialize a sequence into a new buffer.
///
/// On failure no buffer is returned.
pub fn serialize(sequence: &BlockSequence) -> Result<Vec<u8>> {
    let mut writer = TsWriter::from_writer(VecWriter::with_capacity(sequence.encoded_size()));
    writer.write_sequence(sequence)?;
    Ok(writer.finalize()?.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Error,
        blocks::{Block, BlockData, BlockKind, IndexBlock},
    };

    #[test]
    fn writes_headers_and_payloads() -> Result<()> {
        let mut end = Block::container(BlockKind::End).unwrap();
        end.length = 0;
        let sequence = BlockSequence::from(vec![
            Block::new(BlockData::Index(IndexBlock { index: 0x0102_0304 }))?,
            end,
        ]);
        let bytes = serialize(&sequence)?;
        assert_eq!(
            bytes,
            [
                b'i', b'n', b'd', b'x', 0, 0, 0, 4, 1, 2, 3, 4, //
                b'E', b'N', b'D', b' ', 0, 0, 0, 0,
            ]
        );
        assert_eq!(bytes.len(), sequence.encoded_size());
        Ok(())
    }

    #[test]
    fn writer_counts_blocks() -> Result<()> {
        let sequence: BlockSequence = [BlockKind::Body, BlockKind::End]
            .into_iter()
            .filter_map(Block::container)
            .collect();
        let mut writer = TsWriter::from_writer(VecWriter::new());
        assert_eq!(writer.write_sequence(&sequence)?, 16);
        assert_eq!(writer.blocks_written(), 2);
        assert_eq!(writer.finalize()?.len(), 16);
        Ok(())
    }

    #[test]
    fn file_writer_reports_io_errors() {
        let result = TsWriter::new("/nonexistent-dir/out.ts");
        assert!(matches!(result, Err(Error::IOError(_))));
    }
}
