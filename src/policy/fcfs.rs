//! First-Come, First-Served.

use super::clock::Clock;
use super::SchedulingPolicy;
use crate::models::{ProcessSet, SchedulingResult};

/// First-Come, First-Served.
///
/// Runs processes to completion in definition order. When the CPU would be
/// idle, the clock jumps to the next process's arrival.
///
/// # Precondition
/// Input must be sorted by arrival time ascending. The policy does not sort;
/// unsorted input produces wrong metrics without an error. Use
/// [`Simulator`](crate::Simulator) to have the order checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl Fcfs {
    pub const NAME: &'static str = "FCFS";
}

impl SchedulingPolicy for Fcfs {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn schedule(&self, mut processes: ProcessSet) -> SchedulingResult {
        let mut clock = Clock::new();

        for index in 0..processes.len() {
            let process = processes.process_mut(index);
            clock.idle_until(process.arrival_time);

            process.admit();
            process.dispatch();
            let used = process.run_for(process.remaining_time());
            clock.run(process.pid, used);
            process.complete(clock.now());
        }

        SchedulingResult::new(Self::NAME, processes, clock.into_timeline())
    }
}
