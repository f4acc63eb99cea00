mod common;

use codar_ts::{
    Block, BlockData, BlockKind, BlockSequence, Error, RenderOptions, Result, TsFile, Warning,
    blocks::TimestampBlock, build, decode, reconcile, render, serialize,
};
use common::{sample_sequence, unreconciled_sequence};

#[test]
fn binary_roundtrip_is_lossless() -> Result<()> {
    let sequence = sample_sequence()?;
    let bytes = serialize(&sequence)?;
    assert_eq!(bytes.len(), sequence.encoded_size());

    let decoded = decode(&bytes)?;
    assert!(decoded.warnings.is_empty());
    assert_eq!(decoded.sequence, sequence);
    assert_eq!(serialize(&decoded.sequence)?, bytes);
    Ok(())
}

#[test]
fn trailing_payload_bytes_survive_binary_roundtrip() -> Result<()> {
    let mut sequence = sample_sequence()?;
    let at = sequence.position(BlockKind::Scale).unwrap();
    sequence.blocks_mut()[at].trailing = vec![0xDE, 0xAD];
    reconcile(&mut sequence)?;

    let bytes = serialize(&sequence)?;
    let decoded = decode(&bytes)?;
    assert_eq!(decoded.sequence.blocks()[at].trailing, vec![0xDE, 0xAD]);
    assert_eq!(decoded.sequence.blocks()[at].length, 18);
    assert_eq!(serialize(&decoded.sequence)?, bytes);
    Ok(())
}

#[test]
fn text_roundtrip_matches_reconciled_source() -> Result<()> {
    let source = unreconciled_sequence();
    let text = render(&source, RenderOptions::default())?;

    let mut rebuilt = build(&text)?;
    reconcile(&mut rebuilt)?;

    let mut expected = source.clone();
    reconcile(&mut expected)?;
    assert_eq!(rebuilt, expected);

    // Rendering the rebuilt sequence is stable.
    assert_eq!(render(&rebuilt, RenderOptions::default())?, text);
    Ok(())
}

#[test]
fn timestamps_at_and_before_the_unix_epoch_survive_text() -> Result<()> {
    for mac_seconds in [0, 1, 2_082_844_800] {
        let mut source = unreconciled_sequence();
        let at = source.position(BlockKind::Timestamp).unwrap();
        source.blocks_mut()[at].data = BlockData::Timestamp(TimestampBlock { mac_seconds });
        reconcile(&mut source)?;

        let text = render(&source, RenderOptions::default())?;
        let mut rebuilt = build(&text)?;
        reconcile(&mut rebuilt)?;
        assert_eq!(rebuilt.blocks()[at], source.blocks()[at], "{mac_seconds}");
        assert_eq!(rebuilt, source);
    }
    Ok(())
}

#[test]
fn binary_to_text_to_binary_is_identical() -> Result<()> {
    let bytes = serialize(&sample_sequence()?)?;
    let file = TsFile::from_bytes(&bytes)?;
    let text = file.to_text(RenderOptions::default())?;
    let rebuilt = TsFile::from_text(&text)?;
    assert_eq!(rebuilt.to_bytes()?, bytes);
    Ok(())
}

#[test]
fn container_lengths_cover_their_regions() -> Result<()> {
    let sequence = sample_sequence()?;
    let blocks = sequence.blocks();
    let head = sequence.position(BlockKind::Header).unwrap();
    let body = sequence.position(BlockKind::Body).unwrap();
    let end = sequence.position(BlockKind::End).unwrap();

    let span = |range: &[Block]| -> u32 {
        range.iter().map(|b| b.length + 8).sum()
    };
    assert_eq!(blocks[head].length, span(&blocks[head + 1..body]));
    assert_eq!(blocks[body].length, span(&blocks[body + 1..end]));
    assert_eq!(
        blocks[0].length,
        blocks[head].length + 8 + blocks[body].length + 8
    );

    // The outer length is exactly the bytes after the outer header.
    let bytes = serialize(&sequence)?;
    assert_eq!(blocks[0].length as usize, bytes.len() - 16);
    Ok(())
}

#[test]
fn truncated_file_is_clamped_not_rejected() -> Result<()> {
    let bytes = serialize(&sample_sequence()?)?;
    // Cut through the last sample block: drop END and six payload bytes.
    let cut = &bytes[..bytes.len() - 8 - 6];

    let file = TsFile::from_bytes(cut)?;
    let warnings = file.warnings();
    let clamped: Vec<_> = warnings
        .iter()
        .map(|Warning::ClampedBlock { tag, .. }| *tag)
        .collect();
    assert_eq!(
        clamped,
        vec![
            BlockKind::Outer.tag(),
            BlockKind::Body.tag(),
            BlockKind::Samples.tag()
        ]
    );

    let sequence = file.sequence();
    assert_eq!(sequence.len(), sample_sequence()?.len() - 1);
    let last = sequence.blocks().last().unwrap();
    assert_eq!(last.kind(), BlockKind::Samples);
    assert_eq!(last.length, 16 * 4 - 6);
    match &last.data {
        BlockData::Samples(samples) => assert_eq!(samples.len(), 14),
        other => panic!("unexpected block {other:?}"),
    }
    assert_eq!(last.trailing.len(), 2);
    assert_eq!(file.summary().clamped_blocks, 3);
    Ok(())
}

#[test]
fn every_prefix_is_clamped_or_rejected_at_a_block_start() -> Result<()> {
    let sequence = sample_sequence()?;
    let bytes = serialize(&sequence)?;
    // Offsets at which a block header starts.
    let starts: Vec<usize> = sequence
        .iter()
        .scan(0, |at, block| {
            let start = *at;
            *at += block.encoded_size();
            Some(start)
        })
        .collect();

    for len in 1..bytes.len() {
        match decode(&bytes[..len]) {
            Ok(decoded) => {
                // Losing any byte clamps at least the outer container, and
                // the clamped blocks cover the prefix exactly.
                assert!(!decoded.warnings.is_empty(), "prefix {len}");
                assert_eq!(decoded.sequence.encoded_size(), len, "prefix {len}");
            }
            // A cut inside a block header aborts the decode.
            Err(Error::TruncatedHeader { actual, offset }) => {
                assert!(actual < 8, "prefix {len}");
                assert_eq!(offset + actual, len, "prefix {len}");
                assert!(starts.contains(&offset), "prefix {len} offset {offset}");
            }
            // So does a cut that leaves a fixed layout block short.
            Err(Error::TruncatedBlock { actual, offset, .. }) => {
                assert_eq!(offset + 8 + actual, len, "prefix {len}");
                assert!(starts.contains(&offset), "prefix {len} offset {offset}");
            }
            Err(other) => panic!("prefix {len}: unexpected {other:?}"),
        }
    }
    Ok(())
}

#[test]
fn file_save_and_reload() -> Result<()> {
    let dir = std::env::temp_dir();
    let binary = dir.join("codar_ts_roundtrip.ts");
    let text = dir.join("codar_ts_roundtrip.txt");

    let file = TsFile::from_sequence(unreconciled_sequence())?;
    file.save(&binary)?;
    file.save_text(&text, RenderOptions::default())?;

    let from_binary = TsFile::from_file(&binary)?;
    let from_text = TsFile::from_text_file(&text)?;
    assert_eq!(from_binary.sequence(), file.sequence());
    assert_eq!(from_text.sequence(), file.sequence());

    std::fs::remove_file(binary)?;
    std::fs::remove_file(text)?;
    Ok(())
}

#[test]
fn summary_counts_blocks() -> Result<()> {
    let file = TsFile::from_sequence(unreconciled_sequence())?;
    let summary = file.summary();
    assert_eq!(summary.blocks, 17);
    assert_eq!(summary.count(BlockKind::Samples), 2);
    assert_eq!(summary.count(BlockKind::Index), 2);
    assert_eq!(summary.count(BlockKind::Outer), 1);
    assert_eq!(summary.sample_pairs, 32);
    assert_eq!(summary.site_code.as_deref(), Some("BML1"));
    assert_eq!(summary.clamped_blocks, 0);
    Ok(())
}

#[test]
fn empty_sequence_serializes_to_nothing() -> Result<()> {
    assert!(serialize(&BlockSequence::new())?.is_empty());
    Ok(())
}
