//! Benchmarks for the five stock voices.
//!
//! Each voice is measured mid-note, the way it sits in a busy bar.

use std::hint::black_box;

use criterion::{measurement::WallTime, BenchmarkGroup, BenchmarkId, Criterion};
use wobblebox::graph::{node::RenderCtx, GraphNode, SharedParam};
use wobblebox::sequencing::notes;
use wobblebox::synth::{Synth, SynthMessage};
use wobblebox::voices::{self, LeadSynth};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

fn bench_graph<N: GraphNode>(
    group: &mut BenchmarkGroup<'_, WallTime>,
    name: &str,
    mut voice: N,
    ctx: RenderCtx,
    buffer: &mut [f32],
) {
    let size = buffer.len();
    voice.note_on(&ctx);
    group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
        b.iter(|| voice.render_block(black_box(&mut *buffer), black_box(&ctx)))
    });
}

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let drum_ctx = RenderCtx::from_note(SAMPLE_RATE, notes::C4, 100.0);
    let bass_ctx = RenderCtx::from_note(SAMPLE_RATE, notes::C1, 100.0);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        bench_graph(&mut group, "kick", voices::kick(), drum_ctx, &mut buffer);
        bench_graph(&mut group, "snare", voices::snare(), drum_ctx, &mut buffer);
        bench_graph(&mut group, "hihat", voices::hihat(), drum_ctx, &mut buffer);

        // Cutoff swept every block, as during playback
        let cutoff = SharedParam::new(400.0);
        let mut bass = voices::bass(cutoff.clone());
        bass.note_on(&bass_ctx);
        let mut value = 50.0f32;
        group.bench_with_input(BenchmarkId::new("wobble_bass", size), &size, |b, _| {
            b.iter(|| {
                value = if value > 2_000.0 { 50.0 } else { value * 1.05 };
                cutoff.set(value);
                bass.render_block(black_box(&mut buffer), black_box(&bass_ctx));
            })
        });

        // Full eight-voice chord through the shared lead filter
        let lead_cutoff = SharedParam::new(1_700.0);
        let mut lead = LeadSynth::new(voices::lead, SAMPLE_RATE, lead_cutoff);
        for offset in 0..voices::LEAD_POLYPHONY as u8 {
            lead.handle(SynthMessage::NoteOn {
                note: notes::C4 + offset * 2,
                velocity: 100,
            });
        }
        group.bench_with_input(BenchmarkId::new("lead_chord", size), &size, |b, _| {
            b.iter(|| lead.render_block(black_box(&mut buffer)))
        });
    }

    group.finish();
}
