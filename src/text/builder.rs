use log::debug;

use super::Stanza;
use crate::{
    BlockSequence, Error, Result,
    blocks::{Block, FourCC, latin1_encode},
    error::Location,
    types::TranscodeContext,
};

/// Parse the text form into a block sequence.
///
/// Every non-blank line without a `:` opens a block; the lines after it, up
/// to the next blank line, are the block's stanza. Blank lines and stray
/// `key:value` lines between stanzas are skipped. Container lengths are left
/// at zero; run [`crate::writer::reconcile`] before serializing.
///
/// # Errors
/// - [`Error::UnknownBlockType`] for a tag line that names no known block
/// - [`Error::MalformedParameter`] for a missing or unparsable value
/// - [`Error::OddSampleCount`] for a sample stanza with an unpaired line
/// - [`Error::MissingContext`] for samples before their format or scale
pub fn build(text: &str) -> Result<BlockSequence> {
    let lines: Vec<(usize, &str)> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .collect();

    let mut ctx = TranscodeContext::new();
    let mut sequence = BlockSequence::new();
    let mut pos = 0;
    while pos < lines.len() {
        let (number, line) = lines[pos];
        pos += 1;

        let name = line.trim_end();
        if name.is_empty() || name.contains(':') {
            continue;
        }
        let tag = tag_from_line(name, number)?;

        let start = pos;
        while pos < lines.len() && !lines[pos].1.trim().is_empty() {
            pos += 1;
        }
        let stanza = Stanza::new(tag, number, lines[start..pos].to_vec());
        sequence.push(Block::build(&stanza, &mut ctx)?);
    }

    debug!("Built {} blocks from {} lines", sequence.len(), lines.len());
    Ok(sequence)
}

/// Turn a tag line into a code, padding short names with spaces (`END`).
fn tag_from_line(name: &str, line: usize) -> Result<FourCC> {
    let mut bytes = latin1_encode(name).unwrap_or_else(|| name.as_bytes().to_vec());
    if bytes.len() > 4 {
        let mut code = [0u8; 4];
        code.copy_from_slice(&bytes[..4]);
        return Err(Error::UnknownBlockType {
            tag: FourCC(code),
            location: Location::Line(line),
        });
    }
    bytes.resize(4, b' ');
    let mut code = [0u8; 4];
    code.copy_from_slice(&bytes);
    Ok(FourCC(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{BlockData, BlockKind, tags};

    #[test]
    fn pads_short_tag_lines() -> Result<()> {
        assert_eq!(tag_from_line("END", 1)?, tags::END);
        assert_eq!(tag_from_line("END ", 1)?, tags::END);
        assert!(matches!(
            tag_from_line("HEADER", 3),
            Err(Error::UnknownBlockType {
                location: Location::Line(3),
                ..
            })
        ));
        Ok(())
    }

    #[test]
    fn skips_blank_and_stray_lines() -> Result<()> {
        let text = "\n\nstray:1\nAQLV\n\r\nHEAD\n\nindx\nindex:12\n\nEND\n";
        let sequence = build(text)?;
        let kinds: Vec<_> = sequence.iter().map(Block::kind).collect();
        assert_eq!(
            kinds,
            vec![BlockKind::Outer, BlockKind::Header, BlockKind::Index, BlockKind::End]
        );
        assert!(matches!(
            sequence.blocks()[2].data,
            BlockData::Index(ref b) if b.index == 12
        ));
        Ok(())
    }

    #[test]
    fn unknown_tag_reports_line() {
        let err = build("AQLV\n\nzzzz\nzzzz:1\n\n").unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownBlockType {
                location: Location::Line(3),
                ..
            }
        ));
    }

    #[test]
    fn malformed_value_reports_line() {
        let err = build("cnst\nnchannels:3\nnsweeps:x\nnsamples:2048\niqindicator:2\n\n").unwrap_err();
        assert!(matches!(err, Error::MalformedParameter { line: 3, .. }));
    }

    #[test]
    fn empty_sample_stanza_builds_empty_block() -> Result<()> {
        let text = "fbin\nformat:cviq\ntype:fix2\n\nscal\nscalar_one:1\nscalar_two:1\n\nalvl\n\n";
        let sequence = build(text)?;
        assert!(matches!(
            sequence.blocks()[2].data,
            BlockData::Samples(ref s) if s.is_empty()
        ));
        assert_eq!(sequence.blocks()[2].length, 0);
        Ok(())
    }

    #[test]
    fn samples_without_scale_fail() {
        let text = "fbin\nformat:cviq\ntype:fix2\n\nalvl\ni:0.1\nq:0.2\n\n";
        assert!(matches!(build(text), Err(Error::MissingContext { .. })));
    }
}
