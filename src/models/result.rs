//! Scheduling result model.
//!
//! A result is the terminal snapshot of one policy run: the completed
//! processes, the CPU timeline that produced them, and the derived averages.

use serde::{Deserialize, Serialize};

use super::{Pid, ProcessSet, Ticks};
use crate::metrics;

/// What the CPU was doing during a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceKind {
    /// A process executed.
    Run,
    /// The CPU switched to a different process.
    ContextSwitch,
    /// No process was eligible.
    Idle,
}

/// A contiguous interval `[start, end)` on the CPU timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    pub kind: SliceKind,
    /// Running process, or the incoming process of a context switch.
    /// `None` for idle slices.
    pub pid: Option<Pid>,
    pub start: Ticks,
    pub end: Ticks,
}

impl Slice {
    /// `pid` executing.
    pub fn run(pid: Pid, start: Ticks, end: Ticks) -> Self {
        Self {
            kind: SliceKind::Run,
            pid: Some(pid),
            start,
            end,
        }
    }

    /// Switch to `incoming`.
    pub fn context_switch(incoming: Pid, start: Ticks, end: Ticks) -> Self {
        Self {
            kind: SliceKind::ContextSwitch,
            pid: Some(incoming),
            start,
            end,
        }
    }

    /// No process eligible.
    pub fn idle(start: Ticks, end: Ticks) -> Self {
        Self {
            kind: SliceKind::Idle,
            pid: None,
            start,
            end,
        }
    }

    /// Length in ticks.
    #[inline]
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

/// Outcome of running one policy over a process set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingResult {
    /// Display name of the policy that produced this result.
    pub policy: String,
    /// Processes in definition order, all completed.
    pub processes: ProcessSet,
    /// CPU activity in chronological order.
    pub timeline: Vec<Slice>,
    /// Mean waiting time over all processes.
    pub average_waiting_time: f64,
    /// Mean turnaround time over all processes.
    pub average_turnaround_time: f64,
}

impl SchedulingResult {
    /// Builds a result and derives its averages.
    pub fn new(policy: impl Into<String>, processes: ProcessSet, timeline: Vec<Slice>) -> Self {
        let average_waiting_time =
            metrics::mean(processes.iter().map(|p| p.waiting_time().unwrap_or(0)));
        let average_turnaround_time =
            metrics::mean(processes.iter().map(|p| p.turnaround_time().unwrap_or(0)));
        Self {
            policy: policy.into(),
            processes,
            timeline,
            average_waiting_time,
            average_turnaround_time,
        }
    }

    /// Number of charged context switches.
    pub fn context_switches(&self) -> usize {
        self.slices_of_kind(SliceKind::ContextSwitch).count()
    }

    /// Total ticks spent in slices of the given kind.
    pub fn time_in(&self, kind: SliceKind) -> Ticks {
        self.slices_of_kind(kind).map(Slice::duration).sum()
    }

    /// Run slices belonging to `pid`, in order.
    pub fn run_slices_for(&self, pid: Pid) -> Vec<&Slice> {
        self.slices_of_kind(SliceKind::Run)
            .filter(|s| s.pid == Some(pid))
            .collect()
    }

    /// Total CPU time granted to `pid`.
    pub fn run_time_for(&self, pid: Pid) -> Ticks {
        self.run_slices_for(pid).iter().map(|s| s.duration()).sum()
    }

    /// Pids in the order they were dispatched, one entry per run slice.
    pub fn dispatch_order(&self) -> Vec<Pid> {
        self.slices_of_kind(SliceKind::Run)
            .filter_map(|s| s.pid)
            .collect()
    }

    /// Latest finish time, or 0 for an empty result.
    pub fn makespan(&self) -> Ticks {
        self.processes
            .iter()
            .filter_map(|p| p.finish_time())
            .max()
            .unwrap_or(0)
    }

    fn slices_of_kind(&self, kind: SliceKind) -> impl Iterator<Item = &Slice> {
        self.timeline.iter().filter(move |s| s.kind == kind)
    }
}
