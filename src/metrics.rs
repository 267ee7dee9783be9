//! Schedule quality metrics.
//!
//! Computes the standard CPU scheduling indicators from a completed
//! [`SchedulingResult`].
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Waiting | Mean of (turnaround - burst) |
//! | Avg Turnaround | Mean of (finish - arrival) |
//! | Makespan | Latest finish time |
//! | Busy Time | Ticks spent running processes |
//! | Switch Overhead | Ticks spent switching between processes |
//! | CPU Utilization | busy / makespan |
//! | Throughput | Completed processes per tick |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::models::{SchedulingResult, SliceKind, Ticks};

/// Arithmetic mean of tick values; 0.0 when there are none.
pub(crate) fn mean(values: impl Iterator<Item = Ticks>) -> f64 {
    let (sum, count) = values.fold((0u128, 0usize), |(sum, count), v| {
        (sum + u128::from(v), count + 1)
    });
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// Performance indicators of one policy run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    pub policy: String,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    /// Longest time any process spent waiting.
    pub max_waiting_time: Ticks,
    pub makespan: Ticks,
    pub busy_time: Ticks,
    pub idle_time: Ticks,
    pub switch_overhead: Ticks,
    pub context_switches: usize,
    /// Fraction of the makespan spent running processes (0.0..=1.0).
    pub cpu_utilization: f64,
    /// Completed processes per tick.
    pub throughput: f64,
}

impl ScheduleMetrics {
    /// Computes metrics from a completed result.
    pub fn calculate(result: &SchedulingResult) -> Self {
        let makespan = result.makespan();
        let busy_time = result.time_in(SliceKind::Run);
        let completed = result.processes.completed_count();

        let (cpu_utilization, throughput) = if makespan == 0 {
            (0.0, 0.0)
        } else {
            (
                busy_time as f64 / makespan as f64,
                completed as f64 / makespan as f64,
            )
        };

        Self {
            policy: result.policy.clone(),
            average_waiting_time: result.average_waiting_time,
            average_turnaround_time: result.average_turnaround_time,
            max_waiting_time: result
                .processes
                .iter()
                .filter_map(|p| p.waiting_time())
                .max()
                .unwrap_or(0),
            makespan,
            busy_time,
            idle_time: result.time_in(SliceKind::Idle),
            switch_overhead: result.time_in(SliceKind::ContextSwitch),
            context_switches: result.context_switches(),
            cpu_utilization,
            throughput,
        }
    }
}
