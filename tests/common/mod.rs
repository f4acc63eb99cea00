#![allow(dead_code)]

use codar_ts::{
    Block, BlockData, BlockKind, BlockSequence, FourCC, Result,
    blocks::{
        AntennaTagBlock, ConstantsBlock, FormatBlock, GroupTagBlock, IndexBlock, IqSample,
        SampleBlock, ScaleBlock, SignatureBlock, SweepBlock, TimestampBlock, fixed_field_from_text,
        tags,
    },
    reconcile,
};

pub fn container(kind: BlockKind) -> Block {
    Block::container(kind).expect("container kind")
}

pub fn block(data: BlockData) -> Block {
    Block::new(data).expect("payload fits")
}

pub fn signature() -> SignatureBlock {
    SignatureBlock {
        version: FourCC::new(b"CSv4"),
        filetype: FourCC::new(b"aqlv"),
        sitecode: FourCC::new(b"BML1"),
        userflags: 0x8000_0001,
        description: fixed_field_from_text("Bodega Marine Lab").unwrap(),
        ownername: fixed_field_from_text("HF radar group").unwrap(),
        comment: fixed_field_from_text("test record: two sweeps").unwrap(),
    }
}

fn sweep_samples(seed: i16, count: i16) -> SampleBlock {
    SampleBlock::new(
        (0..count)
            .map(|n| IqSample {
                i: seed.wrapping_mul(n).wrapping_add(n),
                q: -(seed.wrapping_add(n) / 3),
            })
            .collect(),
    )
}

/// A complete two-sweep record with every block type, not yet reconciled.
pub fn unreconciled_sequence() -> BlockSequence {
    BlockSequence::from(vec![
        container(BlockKind::Outer),
        container(BlockKind::Header),
        block(BlockData::Signature(signature())),
        block(BlockData::Timestamp(
            TimestampBlock::from_unix(1_528_000_000).unwrap(),
        )),
        block(BlockData::Constants(ConstantsBlock {
            nchannels: 3,
            nsweeps: 2,
            nsamples: 16,
            iqindicator: 2,
        })),
        block(BlockData::Sweep(SweepBlock {
            samplespersweep: 16,
            sweepstart: 4_537_000.0,
            sweepbandwidth: -25_733.913_043_478_26,
            sweeprate: 2.0,
            rangeoffset: 0,
        })),
        block(BlockData::Format(FormatBlock {
            format: tags::FORMAT_CVIQ,
            sample_type: tags::FORMAT_FIX2,
        })),
        container(BlockKind::Body),
        block(BlockData::GroupTag(GroupTagBlock { gtag: 1 })),
        block(BlockData::AntennaTag(AntennaTagBlock { atag: 3 })),
        block(BlockData::Index(IndexBlock { index: 0 })),
        block(BlockData::Scale(ScaleBlock {
            scalar_one: 0.25,
            scalar_two: 0.0078125,
        })),
        block(BlockData::Samples(sweep_samples(97, 16))),
        block(BlockData::Index(IndexBlock { index: 1 })),
        block(BlockData::Scale(ScaleBlock {
            scalar_one: 1.5,
            scalar_two: 3.0,
        })),
        block(BlockData::Samples(sweep_samples(-211, 16))),
        container(BlockKind::End),
    ])
}

/// The same record with container lengths filled in.
pub fn sample_sequence() -> Result<BlockSequence> {
    let mut sequence = unreconciled_sequence();
    reconcile(&mut sequence)?;
    Ok(sequence)
}

/// Append a raw header in stream order.
pub fn header(out: &mut Vec<u8>, tag: &[u8; 4], length: u32) {
    out.extend_from_slice(tag);
    out.extend_from_slice(&length.to_be_bytes());
}
