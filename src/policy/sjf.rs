//! Shortest Job First, non-preemptive.

use super::clock::{admit_arrived, next_arrival, Clock};
use super::SchedulingPolicy;
use crate::models::{ProcessSet, ProcessState, SchedulingResult};

/// Shortest Job First (non-preemptive).
///
/// At each decision point, picks the arrived, unfinished process with the
/// smallest burst time and runs it to completion. A shorter job arriving
/// mid-run waits.
///
/// # Tie-breaking
/// Equal bursts go to the process that appears first in the input sequence.
///
/// # Complexity
/// O(n²): one linear scan per completion.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sjf;

impl Sjf {
    pub const NAME: &'static str = "SJF (Non-Preemptive)";
}

/// Index of the ready process with the shortest burst, lowest index on ties.
fn shortest_ready(processes: &ProcessSet) -> Option<usize> {
    processes
        .iter()
        .enumerate()
        .filter(|(_, p)| p.state() == ProcessState::Ready)
        .min_by_key(|&(index, p)| (p.burst_time, index))
        .map(|(index, _)| index)
}

impl SchedulingPolicy for Sjf {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn schedule(&self, mut processes: ProcessSet) -> SchedulingResult {
        let mut clock = Clock::new();

        while !processes.all_completed() {
            admit_arrived(&mut processes, clock.now());

            let Some(index) = shortest_ready(&processes) else {
                match next_arrival(&processes) {
                    Some(arrival) => {
                        clock.idle_until(arrival);
                        continue;
                    }
                    None => break,
                }
            };

            let process = processes.process_mut(index);
            process.dispatch();
            let used = process.run_for(process.remaining_time());
            clock.run(process.pid, used);
            process.complete(clock.now());
        }

        SchedulingResult::new(Self::NAME, processes, clock.into_timeline())
    }
}
