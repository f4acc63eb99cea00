//! Decode, render and build throughput for a synthetic multi-sweep record.
//!
//! Run with: cargo bench --bench transcode_benchmark

use codar_ts::{
    Block, BlockData, BlockKind, BlockSequence, RenderOptions, build, decode, reconcile, render,
    serialize,
    blocks::{FormatBlock, IndexBlock, IqSample, SampleBlock, ScaleBlock, SignatureBlock},
};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

const SAMPLES_PER_SWEEP: usize = 2048;

fn record(sweeps: u32) -> BlockSequence {
    let block = |data| Block::new(data).expect("payload fits");
    let mut blocks = vec![
        Block::container(BlockKind::Outer).expect("container"),
        Block::container(BlockKind::Header).expect("container"),
        block(BlockData::Signature(SignatureBlock::default())),
        block(BlockData::Format(FormatBlock::default())),
        Block::container(BlockKind::Body).expect("container"),
    ];
    for sweep in 0..sweeps {
        blocks.push(block(BlockData::Index(IndexBlock { index: sweep })));
        blocks.push(block(BlockData::Scale(ScaleBlock {
            scalar_one: 0.001,
            scalar_two: 0.001,
        })));
        let samples = (0..SAMPLES_PER_SWEEP)
            .map(|n| IqSample {
                i: (n as i16).wrapping_mul(13),
                q: (n as i16).wrapping_mul(-7),
            })
            .collect();
        blocks.push(block(BlockData::Samples(SampleBlock::new(samples))));
    }
    blocks.push(Block::container(BlockKind::End).expect("container"));

    let mut sequence = BlockSequence::from(blocks);
    reconcile(&mut sequence).expect("containers present");
    sequence
}

fn bench_transcode(c: &mut Criterion) {
    let mut group = c.benchmark_group("transcode");
    for sweeps in [1u32, 8, 32] {
        let sequence = record(sweeps);
        let bytes = serialize(&sequence).expect("serialize");
        let text = render(&sequence, RenderOptions::default()).expect("render");

        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("decode", sweeps), &bytes, |b, bytes| {
            b.iter(|| decode(black_box(bytes)).expect("decode"))
        });
        group.bench_with_input(BenchmarkId::new("render", sweeps), &sequence, |b, seq| {
            b.iter(|| render(black_box(seq), RenderOptions::default()).expect("render"))
        });
        group.bench_with_input(BenchmarkId::new("build", sweeps), &text, |b, text| {
            b.iter(|| build(black_box(text)).expect("build"))
        });
        group.bench_with_input(BenchmarkId::new("serialize", sweeps), &sequence, |b, seq| {
            b.iter(|| serialize(black_box(seq)).expect("serialize"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_transcode);
criterion_main!(benches);
