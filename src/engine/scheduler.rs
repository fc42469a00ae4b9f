use std::collections::VecDeque;

use crate::{
    engine::transport::StepGrid,
    sequencing::{Pattern, Step, STEPS},
};

/*
Look-ahead Scheduler
====================

Turns the pattern into concrete events on the audio clock, ahead of time:

    schedule_from(pattern, grid, 0)

    frame    0     6000  12000 ...  90000  96000
    event    S0    S1    S2    ...  S15    BarEnd

Each `Step` event carries a copy of the step as it was when scheduled.
The audio callback pops whatever falls before the end of its block, in time
order, and turns steps into voice triggers on their exact frames.

Rescheduling always clears first: `schedule_from` drops every event the
last call created, so an edit or a tempo change can never leave a stale or
duplicate trigger behind. Starting from step k keeps the steps that already
fired out of the new schedule.

At `BarEnd` the caller schedules the next bar from the same frame. Since the
bar end pops before anything scheduled after it, the next bar's step 0
follows in the same block with no gap.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerEvent {
    Step { index: usize, step: Step },
    BarEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledEvent {
    pub at: u64,
    pub event: SchedulerEvent,
}

pub struct Scheduler {
    events: VecDeque<ScheduledEvent>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            events: VecDeque::with_capacity(STEPS + 1),
        }
    }

    /// Replace every pending event with steps `from..16` of `pattern` and
    /// the bar end, timed by `grid`.
    pub fn schedule_from(&mut self, pattern: &Pattern, grid: &StepGrid, from: usize) {
        self.cancel_all();
        for index in from.min(STEPS)..STEPS {
            self.events.push_back(ScheduledEvent {
                at: grid.time_of(index),
                event: SchedulerEvent::Step {
                    index,
                    step: pattern.step(index),
                },
            });
        }
        self.events.push_back(ScheduledEvent {
            at: grid.time_of(STEPS),
            event: SchedulerEvent::BarEnd,
        });
    }

    pub fn cancel_all(&mut self) {
        self.events.clear();
    }

    /// Earliest event strictly before `before`.
    pub fn pop_due(&mut self, before: u64) -> Option<ScheduledEvent> {
        match self.events.front() {
            Some(event) if event.at < before => self.events.pop_front(),
            _ => None,
        }
    }

    /// Step index of the next boundary that has not fired yet. `STEPS`
    /// when only the bar end is left.
    pub fn next_pending_index(&self) -> Option<usize> {
        self.events.front().map(|event| match event.event {
            SchedulerEvent::Step { index, .. } => index,
            SchedulerEvent::BarEnd => STEPS,
        })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledEvent> {
        self.events.iter()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
