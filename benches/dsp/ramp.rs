//! Benchmarks for parameter smoothing and fader gain.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use wobblebox::dsp::{gain::db_to_gain, ramp::LinearRamp};

use crate::BLOCK_SIZES;

pub fn bench_ramp(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/ramp");
    let sample_rate = 48_000.0;

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Fader move in flight: a fresh 20 ms ramp every iteration
        let mut ramp = LinearRamp::new(1.0, 0.02);
        let mut flip = false;
        group.bench_with_input(BenchmarkId::new("fill_ramping", size), &size, |b, _| {
            b.iter(|| {
                flip = !flip;
                ramp.set_target(if flip { 0.1 } else { 1.0 }, sample_rate);
                ramp.fill(black_box(&mut buffer));
            })
        });

        // Settled fader: the common case
        let mut ramp = LinearRamp::new(0.5, 0.02);
        group.bench_with_input(BenchmarkId::new("fill_settled", size), &size, |b, _| {
            b.iter(|| ramp.fill(black_box(&mut buffer)))
        });

        // Cutoff glide: one advance per block, as the filter node does
        let mut ramp = LinearRamp::new(200.0, 0.1);
        group.bench_with_input(BenchmarkId::new("advance_block", size), &size, |b, _| {
            b.iter(|| {
                ramp.set_target(black_box(3_200.0), sample_rate);
                black_box(ramp.advance(size))
            })
        });

        let db: Vec<f32> = (0..size).map(|i| -30.0 * i as f32 / size as f32).collect();
        group.bench_with_input(BenchmarkId::new("db_to_gain", size), &size, |b, _| {
            b.iter(|| {
                for (out, &d) in buffer.iter_mut().zip(db.iter()) {
                    *out = db_to_gain(black_box(d));
                }
            })
        });
    }

    group.finish();
}
