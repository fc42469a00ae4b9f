//! Benchmarks for the ADSR envelope in the shapes the voices use.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use wobblebox::dsp::envelope::Envelope;
use wobblebox::graph::node::RenderCtx;

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let ctx = RenderCtx::from_freq(48_000.0, 50.0, 100.0);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Percussive: no sustain, retriggered every iteration like a drum hit
        let mut env = Envelope::adsr(0.001, 0.3, 0.0, 0.05);
        group.bench_with_input(BenchmarkId::new("percussive_hit", size), &size, |b, _| {
            b.iter(|| {
                env.note_on(&ctx);
                env.render(black_box(&mut buffer), black_box(&ctx));
            })
        });

        // Held bass note
        let mut env = Envelope::adsr(0.005, 0.2, 0.8, 0.1);
        env.note_on(&ctx);
        for _ in 0..12_000 {
            env.next_sample(&ctx);
        }
        group.bench_with_input(BenchmarkId::new("sustain", size), &size, |b, _| {
            b.iter(|| env.render(black_box(&mut buffer), black_box(&ctx)))
        });

        // Lead release tail
        let mut env = Envelope::adsr(0.01, 0.1, 0.6, 0.3);
        env.note_on(&ctx);
        for _ in 0..6_000 {
            env.next_sample(&ctx);
        }
        env.note_off(&ctx);
        group.bench_with_input(BenchmarkId::new("release", size), &size, |b, _| {
            b.iter(|| env.render(black_box(&mut buffer), black_box(&ctx)))
        });
    }

    group.finish();
}
