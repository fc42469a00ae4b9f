//! Benchmarks for the state-variable filter, fixed and under live control.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use wobblebox::dsp::filter::SVFilter;
use wobblebox::graph::{filter::FilterNode, node::RenderCtx, GraphNode, SharedParam};

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");
    let ctx = RenderCtx::from_freq(48_000.0, 55.0, 100.0);

    for &size in BLOCK_SIZES {
        // Saw-like ramp as input
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();
        let mut buffer = input.clone();

        // Resonant lowpass as in the bass voice
        let mut filter = SVFilter::lowpass(400.0);
        filter.set_resonance(0.6);
        group.bench_with_input(BenchmarkId::new("lowpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer), black_box(&ctx));
            })
        });

        // Drum highpass
        let mut filter = SVFilter::highpass(4_000.0);
        group.bench_with_input(BenchmarkId::new("highpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer), black_box(&ctx));
            })
        });

        // Cutoff rewritten every block, as the wobble LFO does
        let cutoff = SharedParam::new(50.0);
        let mut node = FilterNode::lowpass(400.0)
            .with_resonance(0.6)
            .with_cutoff_param(cutoff.clone(), 0.0);
        let mut value = 50.0f32;
        group.bench_with_input(BenchmarkId::new("wobbled_lowpass", size), &size, |b, _| {
            b.iter(|| {
                value = if value > 2_000.0 { 50.0 } else { value * 1.1 };
                cutoff.set(value);
                buffer.copy_from_slice(&input);
                node.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });

        // Gliding cutoff, as the motion-driven lead filter does
        let cutoff = SharedParam::new(200.0);
        let mut node = FilterNode::lowpass(200.0).with_cutoff_param(cutoff.clone(), 0.1);
        group.bench_with_input(BenchmarkId::new("gliding_lowpass", size), &size, |b, _| {
            b.iter(|| {
                cutoff.set(black_box(3_200.0));
                buffer.copy_from_slice(&input);
                node.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}
