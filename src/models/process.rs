//! Process model.
//!
//! A process is one simulated task: an immutable workload description
//! (arrival and burst) plus per-run state that is restored by [`Process::reset`]
//! before every simulation.
//!
//! # Lifecycle
//!
//! ```text
//! NotArrived ──admit──▶ Ready ──dispatch──▶ Running ──complete──▶ Completed
//!                         ▲                    │
//!                         └──────preempt───────┘
//! ```
//!
//! Timing metrics live inside [`ProcessState::Completed`], so they cannot
//! change once a process has finished.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical clock unit. One tick is the smallest amount of CPU time.
pub type Ticks = u64;

/// Process identifier.
///
/// Positive and unique within a [`ProcessSet`](super::ProcessSet); stable
/// across simulation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pid(u32);

impl Pid {
    /// Creates a pid from its numeric value.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Pid of the process at sequence position `index` (`index + 1`).
    ///
    /// `None` once the position no longer fits in a pid.
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(1))
            .map(Self)
    }

    /// Numeric value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timing metrics fixed at the moment a process completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Tick at which the last unit of work finished.
    pub finish_time: Ticks,
    /// `finish_time - arrival_time`.
    pub turnaround_time: Ticks,
    /// `turnaround_time - burst_time`.
    pub waiting_time: Ticks,
}

impl Completion {
    fn at(finish_time: Ticks, arrival_time: Ticks, burst_time: Ticks) -> Self {
        debug_assert!(
            finish_time >= arrival_time.saturating_add(burst_time),
            "finish {finish_time} precedes arrival {arrival_time} + burst {burst_time}"
        );
        let turnaround_time = finish_time.saturating_sub(arrival_time);
        Self {
            finish_time,
            turnaround_time,
            waiting_time: turnaround_time.saturating_sub(burst_time),
        }
    }
}

/// Where a process is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProcessState {
    /// Not yet admitted to the scheduler.
    NotArrived,
    /// Admitted and waiting for the CPU.
    Ready,
    /// Holding the CPU.
    Running,
    /// All work done; metrics are final.
    Completed(Completion),
}

/// One simulated task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Process identifier.
    pub pid: Pid,
    /// Tick at which the process becomes eligible to run.
    pub arrival_time: Ticks,
    /// Total CPU ticks required.
    pub burst_time: Ticks,
    remaining_time: Ticks,
    state: ProcessState,
}

impl Process {
    /// Creates a process in its initial (reset) state.
    pub fn new(pid: Pid, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
            remaining_time: burst_time,
            state: ProcessState::NotArrived,
        }
    }

    /// Restores all run state to its initial values.
    pub fn reset(&mut self) {
        self.remaining_time = self.burst_time;
        self.state = ProcessState::NotArrived;
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> ProcessState {
        self.state
    }

    /// Ticks of work left.
    #[inline]
    pub fn remaining_time(&self) -> Ticks {
        self.remaining_time
    }

    /// Whether the process would be eligible at `now`.
    #[inline]
    pub fn has_arrived_by(&self, now: Ticks) -> bool {
        self.arrival_time <= now
    }

    /// Whether the process has finished all its work.
    pub fn is_completed(&self) -> bool {
        matches!(self.state, ProcessState::Completed(_))
    }

    /// Completion metrics, if the process has finished.
    pub fn completion(&self) -> Option<Completion> {
        match self.state {
            ProcessState::Completed(completion) => Some(completion),
            _ => None,
        }
    }

    /// Completion tick, once finished.
    pub fn finish_time(&self) -> Option<Ticks> {
        self.completion().map(|c| c.finish_time)
    }

    /// Finish minus arrival, once finished.
    pub fn turnaround_time(&self) -> Option<Ticks> {
        self.completion().map(|c| c.turnaround_time)
    }

    /// Turnaround minus burst, once finished.
    pub fn waiting_time(&self) -> Option<Ticks> {
        self.completion().map(|c| c.waiting_time)
    }

    /// `NotArrived → Ready`.
    pub fn admit(&mut self) {
        debug_assert_eq!(
            self.state,
            ProcessState::NotArrived,
            "process {} admitted twice",
            self.pid
        );
        if self.state == ProcessState::NotArrived {
            self.state = ProcessState::Ready;
        }
    }

    /// `Ready → Running`.
    pub fn dispatch(&mut self) {
        debug_assert_eq!(
            self.state,
            ProcessState::Ready,
            "process {} dispatched while not ready",
            self.pid
        );
        if self.state == ProcessState::Ready {
            self.state = ProcessState::Running;
        }
    }

    /// Consumes up to `ticks` of remaining work and returns the amount used.
    ///
    /// Only a running process makes progress.
    pub fn run_for(&mut self, ticks: Ticks) -> Ticks {
        debug_assert_eq!(
            self.state,
            ProcessState::Running,
            "process {} ran without holding the CPU",
            self.pid
        );
        if self.state != ProcessState::Running {
            return 0;
        }
        let used = ticks.min(self.remaining_time);
        self.remaining_time -= used;
        used
    }

    /// `Running → Ready`, for a process that still has work left.
    pub fn preempt(&mut self) {
        debug_assert!(
            self.state == ProcessState::Running && self.remaining_time > 0,
            "process {} preempted in state {:?} with {} ticks left",
            self.pid,
            self.state,
            self.remaining_time
        );
        if self.state == ProcessState::Running {
            self.state = ProcessState::Ready;
        }
    }

    /// `Running → Completed`, fixing the metrics at `now`.
    pub fn complete(&mut self, now: Ticks) {
        debug_assert!(
            self.state == ProcessState::Running && self.remaining_time == 0,
            "process {} completed in state {:?} with {} ticks left",
            self.pid,
            self.state,
            self.remaining_time
        );
        if self.state == ProcessState::Running && self.remaining_time == 0 {
            self.state =
                ProcessState::Completed(Completion::at(now, self.arrival_time, self.burst_time));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(arrival: Ticks, burst: Ticks) -> Process {
        let mut p = Process::new(Pid::new(1), arrival, burst);
        p.admit();
        p.dispatch();
        p
    }

    #[test]
    fn test_pid_from_index() {
        assert_eq!(Pid::from_index(0), Some(Pid::new(1)));
        assert_eq!(Pid::from_index(9), Some(Pid::new(10)));
        assert_eq!(Pid::from_index(u32::MAX as usize - 1), Some(Pid::new(u32::MAX)));
        assert_eq!(Pid::from_index(u32::MAX as usize), None);
    }

    #[test]
    fn test_new_process_is_reset() {
        let p = Process::new(Pid::new(3), 4, 7);
        assert_eq!(p.state(), ProcessState::NotArrived);
        assert_eq!(p.remaining_time(), 7);
        assert!(p.completion().is_none());
        assert!(!p.is_completed());
    }

    #[test]
    fn test_full_lifecycle() {
        let mut p = running(2, 5);
        assert_eq!(p.run_for(3), 3);
        p.preempt();
        assert_eq!(p.state(), ProcessState::Ready);

        p.dispatch();
        assert_eq!(p.run_for(10), 2); // Capped at remaining work
        p.complete(12);

        let c = p.completion().unwrap();
        assert_eq!(c.finish_time, 12);
        assert_eq!(c.turnaround_time, 10);
        assert_eq!(c.waiting_time, 5);
    }

    #[test]
    fn test_reset_clears_completion() {
        let mut p = running(0, 2);
        p.run_for(2);
        p.complete(2);
        assert!(p.is_completed());

        p.reset();
        assert_eq!(p.state(), ProcessState::NotArrived);
        assert_eq!(p.remaining_time(), 2);
        assert_eq!(p.finish_time(), None);
    }

    #[test]
    fn test_has_arrived_by() {
        let p = Process::new(Pid::new(1), 5, 1);
        assert!(!p.has_arrived_by(4));
        assert!(p.has_arrived_by(5));
        assert!(p.has_arrived_by(6));
    }

    #[test]
    fn test_state_serializes_tagged() {
        let mut p = running(0, 1);
        p.run_for(1);
        p.complete(1);
        let json = serde_json::to_value(p.state()).unwrap();
        assert_eq!(json["state"], "completed");
        assert_eq!(json["finish_time"], 1);
    }
}
