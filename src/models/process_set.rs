//! Ordered collection of processes.
//!
//! The order is the definition order of the workload, not the execution
//! order. Several policies depend on it: FCFS runs in this order and SJF
//! breaks ties by it.

use serde::{Deserialize, Serialize};
use std::ops::Index;

use super::{Pid, Process, Ticks};
use crate::error::{Error, Result};
use crate::validation::{self, ValidationError, ValidationErrorKind};

/// An ordered sequence of processes with unique pids.
///
/// Policies take a `ProcessSet` by value, so every run works on its own copy.
/// Call [`reset`](Self::reset) on a copy before handing it to a policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessSet {
    processes: Vec<Process>,
}

impl ProcessSet {
    /// Wraps processes without validation.
    pub fn new(processes: Vec<Process>) -> Self {
        Self { processes }
    }

    /// Builds a set from parallel arrival/burst sequences, assigning pids
    /// `1..=n` in sequence order.
    ///
    /// # Errors
    /// [`Error::InvalidWorkload`] if the sequences are empty, differ in
    /// length, contain a zero burst, or cannot be simulated without the
    /// clock overflowing.
    pub fn from_workload(arrivals: &[Ticks], bursts: &[Ticks]) -> Result<Self> {
        validation::validate_workload(arrivals, bursts).map_err(Error::InvalidWorkload)?;

        let processes = arrivals
            .iter()
            .zip(bursts)
            .enumerate()
            .map(|(i, (&arrival, &burst))| {
                Pid::from_index(i)
                    .map(|pid| Process::new(pid, arrival, burst))
                    .ok_or_else(|| {
                        Error::InvalidWorkload(vec![ValidationError::new(
                            ValidationErrorKind::TooManyProcesses,
                            format!("Process at position {} has no pid left", i + 1),
                        )])
                    })
            })
            .collect::<Result<_>>()?;
        Ok(Self { processes })
    }

    /// Restores every process to its initial run state.
    pub fn reset(&mut self) {
        for process in &mut self.processes {
            process.reset();
        }
    }

    /// Returns a reset copy, leaving `self` untouched.
    pub fn fresh_copy(&self) -> Self {
        let mut copy = self.clone();
        copy.reset();
        copy
    }

    /// Number of processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Whether the set has no processes.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Processes in sequence order.
    pub fn iter(&self) -> std::slice::Iter<'_, Process> {
        self.processes.iter()
    }

    /// Processes as a slice, in sequence order.
    pub fn as_slice(&self) -> &[Process] {
        &self.processes
    }

    /// Process at sequence position `index`.
    pub fn get(&self, index: usize) -> Option<&Process> {
        self.processes.get(index)
    }

    /// Finds a process by pid.
    pub fn by_pid(&self, pid: Pid) -> Option<&Process> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    pub(crate) fn process_mut(&mut self, index: usize) -> &mut Process {
        &mut self.processes[index]
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Process> {
        self.processes.iter_mut()
    }

    /// Whether every process has completed.
    pub fn all_completed(&self) -> bool {
        self.processes.iter().all(Process::is_completed)
    }

    /// Number of completed processes.
    pub fn completed_count(&self) -> usize {
        self.processes.iter().filter(|p| p.is_completed()).count()
    }

    /// Whether arrival times are non-decreasing in sequence order.
    pub fn is_sorted_by_arrival(&self) -> bool {
        self.processes
            .windows(2)
            .all(|w| w[0].arrival_time <= w[1].arrival_time)
    }

    /// Sum of all burst times, saturating at [`Ticks::MAX`].
    pub fn total_burst(&self) -> Ticks {
        self.processes
            .iter()
            .fold(0, |total: Ticks, p| total.saturating_add(p.burst_time))
    }
}

impl Index<usize> for ProcessSet {
    type Output = Process;

    fn index(&self, index: usize) -> &Self::Output {
        &self.processes[index]
    }
}

impl<'a> IntoIterator for &'a ProcessSet {
    type Item = &'a Process;
    type IntoIter = std::slice::Iter<'a, Process>;

    fn into_iter(self) -> Self::IntoIter {
        self.processes.iter()
    }
}

impl FromIterator<Process> for ProcessSet {
    fn from_iter<I: IntoIterator<Item = Process>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
