use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

/*
Shared Parameters
=================

Most of a voice graph is frozen once the engine starts. The exceptions are
parameters that another part of the program moves while audio is running:

    wobble modulator   → bass filter cutoff   (every render block)
    motion pipeline    → lead filter cutoff   (every camera frame, ~60 Hz)

A `SharedParam` is the handle both sides hold. The writer stores a target,
the filter reads it at the start of each block and glides towards it. The
value lives in an `AtomicU32` as raw f32 bits, so neither side ever locks
and a reader can never observe a torn value. Relaxed ordering is enough:
each value stands alone, nothing else is published alongside it.
*/

#[derive(Debug, Clone)]
pub struct SharedParam {
    bits: Arc<AtomicU32>,
}

impl SharedParam {
    pub fn new(value: f32) -> Self {
        Self {
            bits: Arc::new(AtomicU32::new(value.to_bits())),
        }
    }

    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set(&self, value: f32) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }
}
