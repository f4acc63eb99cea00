//! Output sinks for the serializer.
//!
//! [`TsWriter`](super::TsWriter) writes through the [`TsWrite`] trait so the
//! same code produces an in-memory buffer or a file on disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::Result;

/// Write operations used by [`TsWriter`](super::TsWriter).
pub trait TsWrite {
    /// Write all bytes to the destination.
    fn write_all(&mut self, bytes: &[u8]) -> Result<()>;

    /// Number of bytes written so far.
    fn position(&self) -> u64;

    /// Flush any buffered data.
    fn flush(&mut self) -> Result<()>;
}

/// A writer that appends to an in-memory buffer.
#[derive(Debug, Default)]
pub struct VecWriter {
    buffer: Vec<u8>,
}

impl VecWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Consume the writer and return the underlying buffer.
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl TsWrite for VecWriter {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    fn position(&self) -> u64 {
        self.buffer.len() as u64
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A buffered writer to a file on disk.
pub struct FileWriter {
    inner: BufWriter<File>,
    position: u64,
}

impl FileWriter {
    /// Create (or truncate) the file at `path` with a 1 MB buffer.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_capacity(path, 1_048_576)
    }

    pub fn with_capacity(path: impl AsRef<Path>, capacity: usize) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            inner: BufWriter::with_capacity(capacity, file),
            position: 0,
        })
    }
}

impl TsWrite for FileWriter {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes)?;
        self.position += bytes.len() as u64;
        Ok(())
    }

    fn position(&self) -> u64 {
        self.position
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}
