//! Benchmarks for the sources behind the voices.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use wobblebox::dsp::oscillator::OscillatorBlock;
use wobblebox::graph::{fm::FmNode, node::RenderCtx, GraphNode};

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    // C1, the bottom of the bass lane
    let bass_ctx = RenderCtx::from_note(48_000.0, 24, 100.0);
    let lead_ctx = RenderCtx::from_note(48_000.0, 60, 100.0);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Wobble bass and lead both start from a saw
        let mut osc = OscillatorBlock::sawtooth();
        group.bench_with_input(BenchmarkId::new("sawtooth", size), &size, |b, _| {
            b.iter(|| osc.render(black_box(&mut buffer), black_box(&bass_ctx)))
        });

        // Kick body
        let mut osc = OscillatorBlock::sine();
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| osc.render(black_box(&mut buffer), black_box(&lead_ctx)))
        });

        // Snare body
        let mut osc = OscillatorBlock::noise();
        group.bench_with_input(BenchmarkId::new("noise", size), &size, |b, _| {
            b.iter(|| osc.render(black_box(&mut buffer), black_box(&lead_ctx)))
        });

        // Hi-hat: two sin() calls per sample
        let mut fm = FmNode::new(200.0, 5.1, 32.0);
        group.bench_with_input(BenchmarkId::new("fm_metallic", size), &size, |b, _| {
            b.iter(|| fm.render_block(black_box(&mut buffer), black_box(&lead_ctx)))
        });
    }

    group.finish();
}
