#![forbid(unsafe_code)]

//! # codar-ts
//!
//! A Rust library for converting CODAR SeaSonde TimeSeries (TS) files between
//! their packed binary form and an editable line-oriented text form.
//!
//! A TS file is a flat run of big-endian blocks, each an 8-byte header (a
//! four character tag and a payload length) followed by the payload. Four
//! tags are containers that bracket the blocks after them:
//!
//! ```text
//! AQLV                      outer container
//! ├── HEAD                  header region, closed by BODY
//! │   ├── sign mcda cnst swep fbin
//! ├── BODY                  body region, closed by END
//! │   ├── gtag atag indx scal alvl ...
//! END
//! ```
//!
//! The `alvl` blocks hold the I/Q samples as 16-bit integers. Their physical
//! value is set by the sample format of the last `fbin` block and the scale
//! factors of the last `scal` block, which are carried forward in a
//! [`TranscodeContext`].
//!
//! ## Quick Start
//!
//! ### Binary to text
//!
//! ```no_run
//! use codar_ts::{RenderOptions, Result, TsFile};
//!
//! fn main() -> Result<()> {
//!     let file = TsFile::from_file("TS_BML1_2018_06_03_0000.ts")?;
//!     for warning in file.warnings() {
//!         eprintln!("{warning}");
//!     }
//!     file.save_text("TS_BML1_2018_06_03_0000.txt", RenderOptions::default())?;
//!     Ok(())
//! }
//! ```
//!
//! ### Text to binary
//!
//! ```no_run
//! use codar_ts::{Result, TsFile};
//!
//! fn main() -> Result<()> {
//!     // Container lengths are recomputed from the edited blocks.
//!     let file = TsFile::from_text_file("TS_BML1_2018_06_03_0000.txt")?;
//!     file.save("TS_BML1_2018_06_03_0000.ts")?;
//!     println!("{:?}", file.summary());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`blocks`] | Block payload types, tags and the block registry |
//! | [`parsing`] | Binary decoder |
//! | [`text`] | Text renderer and builder |
//! | [`writer`] | Size reconciliation and binary serialization |
//! | [`endian`] | Byte order normalization |
//! | [`error`] | Error types and [`Result`] alias |
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`]. Every error stops the pass
//! it occurs in. A block whose declared length overruns the buffer is not an
//! error: it is shortened, kept, and reported as a [`Warning`] (also logged
//! through the `log` facade).
//!
//! ## Features
//!
//! - `serde` (default): `Serialize`/`Deserialize` for the block types and
//!   JSON export of [`StreamSummary`].

pub mod blocks;
pub mod endian;
pub mod error;
pub mod parsing;
pub mod text;
pub mod writer;

mod sequence;
mod summary;
mod ts_file;
mod types;

// Re-export commonly used types at the crate root
pub use blocks::{Block, BlockData, BlockKind, FourCC};
pub use error::{Error, Location, Result};
pub use parsing::{Decoded, decode};
pub use sequence::BlockSequence;
pub use summary::StreamSummary;
pub use text::{RenderOptions, build, render};
pub use ts_file::TsFile;
pub use types::{SampleFormat, TranscodeContext, Warning};
pub use writer::{TsWriter, reconcile, serialize};
