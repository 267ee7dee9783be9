//! Round Robin, with and without a context-switch penalty.
//!
//! # Algorithm
//!
//! 1. Enqueue every process arriving at tick 0, in sequence order.
//! 2. If the queue is empty, idle until the next arrival and enqueue it.
//! 3. Dequeue the head. With a penalty configured and a different pid than the
//!    last dispatch, charge the penalty and enqueue anything that arrived
//!    meanwhile.
//! 4. Run for `min(remaining, quantum)` ticks. Processes arriving during the
//!    slice are enqueued in arrival order.
//! 5. Complete the process, or re-enqueue it behind the arrivals from step 4.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.3

use tracing::debug;

use super::clock::{admit_arrived, admit_arrived_between, next_arrival, Clock};
use super::{ReadyQueue, SchedulingPolicy};
use crate::models::{Pid, ProcessSet, SchedulingResult, Ticks};

/// Round Robin with a fixed time quantum.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    quantum: Ticks,
}

impl RoundRobin {
    pub const NAME: &'static str = "Round Robin";

    /// Creates the policy. `quantum` must be positive.
    pub fn new(quantum: Ticks) -> Self {
        Self { quantum }
    }

    /// Maximum ticks per dispatch.
    pub fn quantum(&self) -> Ticks {
        self.quantum
    }
}

impl SchedulingPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn schedule(&self, processes: ProcessSet) -> SchedulingResult {
        run(Self::NAME, processes, self.quantum, None)
    }
}

/// Round Robin that charges a fixed number of ticks whenever the CPU moves
/// to a different process.
///
/// The first dispatch is free, as is re-dispatching the process that just
/// ran. Completion does not cost a switch.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobinWithPenalty {
    quantum: Ticks,
    penalty: Ticks,
}

impl RoundRobinWithPenalty {
    pub const NAME: &'static str = "Round Robin (With Penalty)";

    /// Creates the policy. `quantum` must be positive.
    pub fn new(quantum: Ticks, context_switch_penalty: Ticks) -> Self {
        Self {
            quantum,
            penalty: context_switch_penalty,
        }
    }

    /// Maximum ticks per dispatch.
    pub fn quantum(&self) -> Ticks {
        self.quantum
    }

    /// Ticks charged when a different process takes the CPU.
    pub fn context_switch_penalty(&self) -> Ticks {
        self.penalty
    }
}

impl SchedulingPolicy for RoundRobinWithPenalty {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn schedule(&self, processes: ProcessSet) -> SchedulingResult {
        run(Self::NAME, processes, self.quantum, Some(self.penalty))
    }
}

fn run(
    name: &'static str,
    mut processes: ProcessSet,
    quantum: Ticks,
    penalty: Option<Ticks>,
) -> SchedulingResult {
    // A zero quantum never makes progress
    let quantum = quantum.max(1);
    let mut clock = Clock::new();
    let mut queue = ReadyQueue::new();
    let mut last_pid: Option<Pid> = None;

    queue.extend(admit_arrived(&mut processes, clock.now()));

    while !processes.all_completed() {
        let Some(index) = queue.pop() else {
            match next_arrival(&processes) {
                Some(arrival) => {
                    clock.idle_until(arrival);
                    queue.extend(admit_arrived(&mut processes, clock.now()));
                    continue;
                }
                None => break,
            }
        };

        let pid = processes[index].pid;
        if let Some(penalty) = penalty {
            if last_pid.is_some_and(|last| last != pid) {
                clock.switch_to(pid, penalty);
                queue.extend(admit_arrived(&mut processes, clock.now()));
            }
            last_pid = Some(pid);
        }

        let start = clock.now();
        let process = processes.process_mut(index);
        process.dispatch();
        let used = process.run_for(quantum);
        clock.run(pid, used);

        // Arrivals during the slice queue up ahead of the preempted process
        queue.extend(admit_arrived_between(&mut processes, start, clock.now()));

        let process = processes.process_mut(index);
        if process.remaining_time() == 0 {
            process.complete(clock.now());
            debug!(pid = %pid, finish = clock.now(), "process completed");
        } else {
            process.preempt();
            queue.push(index);
        }
    }

    SchedulingResult::new(name, processes, clock.into_timeline())
}
