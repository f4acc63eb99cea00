use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::{
    BlockSequence, Error, Result, StreamSummary,
    blocks::{BlockKind, FourCC},
    parsing::decode,
    text::{self, RenderOptions},
    types::Warning,
    writer::{self, FileWriter, TsWrite},
};

/// High level representation of a TS file.
///
/// Holds the decoded block sequence together with any warnings raised while
/// decoding it, and converts in either direction.
#[derive(Debug, Clone, PartialEq)]
pub struct TsFile {
    sequence: BlockSequence,
    warnings: Vec<Warning>,
}

impl TsFile {
    /// Read and decode a binary TS file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut file = File::open(path)?;
        let file_size = file.metadata()?.len() as usize;
        let mut data = Vec::with_capacity(file_size);
        file.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Decode a binary TS buffer.
    ///
    /// # Errors
    /// [`Error::BadSignature`] if the buffer does not open with the `AQLV`
    /// container, plus any decode error.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let decoded = decode(data)?;
        match decoded.sequence.blocks().first() {
            Some(block) if block.kind() == BlockKind::Outer => {}
            Some(block) => return Err(Error::BadSignature(block.tag())),
            None => return Err(Error::BadSignature(FourCC::default())),
        }
        Ok(Self {
            sequence: decoded.sequence,
            warnings: decoded.warnings,
        })
    }

    /// Read a text TS file from disk and build it.
    pub fn from_text_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_text(&text)
    }

    /// Build from the text form and reconcile the container lengths.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_sequence(text::build(text)?)
    }

    /// Wrap a sequence, reconciling its container lengths.
    pub fn from_sequence(mut sequence: BlockSequence) -> Result<Self> {
        writer::reconcile(&mut sequence)?;
        Ok(Self {
            sequence,
            warnings: Vec::new(),
        })
    }

    pub fn sequence(&self) -> &BlockSequence {
        &self.sequence
    }

    pub fn into_sequence(self) -> BlockSequence {
        self.sequence
    }

    /// Blocks whose length was clamped while decoding.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn to_text(&self, options: RenderOptions) -> Result<String> {
        text::render(&self.sequence, options)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        writer::serialize(&self.sequence)
    }

    /// Write the binary form to `path`.
    ///
    /// The stream is encoded in memory first; nothing is written if encoding
    /// fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_bytes()?;
        let mut out = FileWriter::new(path)?;
        out.write_all(&bytes)?;
        out.flush()?;
        debug!("Saved {} bytes", bytes.len());
        Ok(())
    }

    /// Write the text form to `path`.
    pub fn save_text(&self, path: impl AsRef<Path>, options: RenderOptions) -> Result<()> {
        let text = self.to_text(options)?;
        fs::write(path, text)?;
        Ok(())
    }

    pub fn summary(&self) -> StreamSummary {
        StreamSummary {
            clamped_blocks: self.warnings.len(),
            ..StreamSummary::from_sequence(&self.sequence)
        }
    }
}
