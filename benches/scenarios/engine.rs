//! Benchmarks for whole-engine rendering.
//!
//! This is exactly the work the audio callback does: scheduling, the wobble
//! LFO, the arpeggiator, all five voices, the master bus and the analyser
//! tap.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use wobblebox::{
    engine::OfflineContext,
    sequencing::{notes, ArpMode, BeatStyle},
    Engine, EngineConfig,
};

use crate::BLOCK_SIZES;

fn busy_engine() -> Engine {
    let config = EngineConfig::new().bpm(140.0).seed(1);
    let mut engine = match Engine::new(config) {
        Ok(engine) => engine,
        Err(err) => panic!("default engine config rejected: {err}"),
    };
    engine.generate_beat(BeatStyle::Trap);
    engine.generate_bassline();
    engine.enable_arpeggiator(true);
    engine.set_arp_mode(ArpMode::UpDown);
    for note in [notes::C4, notes::E4, notes::G4, notes::C5] {
        engine.key_down(note);
    }
    let mut ctx = OfflineContext::new(engine.sample_rate());
    if let Err(err) = engine.start(&mut ctx) {
        panic!("offline context refused to start: {err}");
    }
    engine
}

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut idle = match Engine::new(EngineConfig::new().seed(1)) {
            Ok(engine) => engine,
            Err(err) => panic!("default engine config rejected: {err}"),
        };
        group.bench_with_input(BenchmarkId::new("stopped", size), &size, |b, _| {
            b.iter(|| idle.render(black_box(&mut buffer)))
        });

        let mut playing = busy_engine();
        group.bench_with_input(BenchmarkId::new("full_pattern_arp", size), &size, |b, _| {
            b.iter(|| playing.render(black_box(&mut buffer)))
        });
    }

    group.finish();
}
