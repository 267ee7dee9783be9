//! Logical clock and arrival detection shared by all policies.
//!
//! The clock jumps between events instead of stepping one tick at a time.
//! Arrival admission reproduces the order a tick-by-tick scan would give:
//! earlier arrival first, then lower sequence index.
//!
//! Clock arithmetic saturates at [`Ticks::MAX`]. Validation rejects any
//! workload that could reach it, so a checked run never saturates.

use tracing::{debug, trace};

use crate::models::{Pid, ProcessSet, ProcessState, Slice, Ticks};

/// Simulated CPU clock that records every interval it advances over.
#[derive(Debug, Default)]
pub(crate) struct Clock {
    now: Ticks,
    timeline: Vec<Slice>,
}

impl Clock {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn now(&self) -> Ticks {
        self.now
    }

    /// Leaves the CPU idle until `until`. No-op if `until` is not ahead.
    pub(crate) fn idle_until(&mut self, until: Ticks) {
        if until <= self.now {
            return;
        }
        debug!(from = self.now, to = until, "cpu idle");
        self.timeline.push(Slice::idle(self.now, until));
        self.now = until;
    }

    /// Charges a context switch to `incoming`.
    pub(crate) fn switch_to(&mut self, incoming: Pid, penalty: Ticks) {
        debug!(pid = %incoming, at = self.now, penalty, "context switch");
        let end = self.now.saturating_add(penalty);
        self.timeline
            .push(Slice::context_switch(incoming, self.now, end));
        self.now = end;
    }

    /// Runs `pid` for `ticks`.
    pub(crate) fn run(&mut self, pid: Pid, ticks: Ticks) {
        trace!(pid = %pid, start = self.now, ticks, "run");
        let end = self.now.saturating_add(ticks);
        self.timeline.push(Slice::run(pid, self.now, end));
        self.now = end;
    }

    pub(crate) fn into_timeline(self) -> Vec<Slice> {
        self.timeline
    }
}

/// Admits every not-yet-arrived process with `arrival <= now`, in sequence
/// order, and returns their indices.
pub(crate) fn admit_arrived(processes: &mut ProcessSet, now: Ticks) -> Vec<usize> {
    let mut admitted = Vec::new();
    for (index, process) in processes.iter_mut().enumerate() {
        if process.state() == ProcessState::NotArrived && process.has_arrived_by(now) {
            process.admit();
            admitted.push(index);
        }
    }
    admitted
}

/// Admits every not-yet-arrived process with `after < arrival <= until`.
///
/// Indices are ordered by arrival time, then sequence index.
pub(crate) fn admit_arrived_between(
    processes: &mut ProcessSet,
    after: Ticks,
    until: Ticks,
) -> Vec<usize> {
    let mut admitted: Vec<usize> = processes
        .iter()
        .enumerate()
        .filter(|(_, p)| {
            p.state() == ProcessState::NotArrived
                && p.arrival_time > after
                && p.arrival_time <= until
        })
        .map(|(index, _)| index)
        .collect();
    // Stable: equal arrivals keep sequence order
    admitted.sort_by_key(|&index| processes[index].arrival_time);

    for &index in &admitted {
        processes.process_mut(index).admit();
    }
    admitted
}

/// Earliest arrival among processes not yet admitted.
pub(crate) fn next_arrival(processes: &ProcessSet) -> Option<Ticks> {
    processes
        .iter()
        .filter(|p| p.state() == ProcessState::NotArrived)
        .map(|p| p.arrival_time)
        .min()
}
