//! Dispatch policies.
//!
//! Each policy is a pure function from a reset [`ProcessSet`] to a
//! [`SchedulingResult`]. Policies own their input, so runs never share
//! mutable state.
//!
//! # Policies
//!
//! | Policy | Preemptive | Selection |
//! |--------|-----------|-----------|
//! | FCFS | No | Definition order (input must be sorted by arrival) |
//! | SJF | No | Shortest burst among arrived, lowest index on ties |
//! | Round Robin | Quantum | FIFO ready queue |
//! | Round Robin + penalty | Quantum | FIFO, plus a fixed cost per process switch |
//!
//! # Usage
//!
//! ```
//! use u_cpusched::models::ProcessSet;
//! use u_cpusched::policy::{RoundRobin, SchedulingPolicy};
//!
//! let processes = ProcessSet::from_workload(&[0, 2], &[5, 3]).unwrap();
//! let result = RoundRobin::new(2).schedule(processes);
//! assert!(result.processes.all_completed());
//! ```
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3: Scheduling Algorithms

mod clock;
mod fcfs;
mod ready_queue;
mod round_robin;
mod sjf;

pub use fcfs::Fcfs;
pub use round_robin::{RoundRobin, RoundRobinWithPenalty};
pub use sjf::Sjf;

pub(crate) use ready_queue::ReadyQueue;

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::models::{ProcessSet, SchedulingResult, Ticks};

/// A CPU dispatch discipline.
pub trait SchedulingPolicy: Send + Sync + Debug {
    /// Display name used in reports (e.g., "FCFS").
    fn name(&self) -> &'static str;

    /// Runs every process in `processes` to completion.
    ///
    /// `processes` must be freshly reset; see [`ProcessSet::reset`].
    fn schedule(&self, processes: ProcessSet) -> SchedulingResult;
}

/// Serializable policy selection with its parameters.
///
/// ```
/// use u_cpusched::policy::PolicyConfig;
///
/// let policy: PolicyConfig =
///     serde_json::from_str(r#"{ "policy": "round_robin", "quantum": 4 }"#).unwrap();
/// assert_eq!(policy, PolicyConfig::RoundRobin { quantum: 4 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum PolicyConfig {
    Fcfs,
    Sjf,
    RoundRobin {
        quantum: Ticks,
    },
    RoundRobinWithPenalty {
        quantum: Ticks,
        context_switch_penalty: Ticks,
    },
}

impl PolicyConfig {
    /// Instantiates the policy.
    pub fn build(&self) -> Box<dyn SchedulingPolicy> {
        match *self {
            Self::Fcfs => Box::new(Fcfs),
            Self::Sjf => Box::new(Sjf),
            Self::RoundRobin { quantum } => Box::new(RoundRobin::new(quantum)),
            Self::RoundRobinWithPenalty {
                quantum,
                context_switch_penalty,
            } => Box::new(RoundRobinWithPenalty::new(quantum, context_switch_penalty)),
        }
    }

    /// Display name of the configured policy.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fcfs => Fcfs::NAME,
            Self::Sjf => Sjf::NAME,
            Self::RoundRobin { .. } => RoundRobin::NAME,
            Self::RoundRobinWithPenalty { .. } => RoundRobinWithPenalty::NAME,
        }
    }

    /// Time quantum, for the Round Robin family.
    pub fn quantum(&self) -> Option<Ticks> {
        match *self {
            Self::RoundRobin { quantum } | Self::RoundRobinWithPenalty { quantum, .. } => {
                Some(quantum)
            }
            _ => None,
        }
    }

    /// Ticks charged per process switch; zero outside the penalty variant.
    pub fn context_switch_penalty(&self) -> Ticks {
        match *self {
            Self::RoundRobinWithPenalty {
                context_switch_penalty,
                ..
            } => context_switch_penalty,
            _ => 0,
        }
    }

    /// Whether the policy relies on input sorted by arrival time.
    pub fn requires_sorted_arrivals(&self) -> bool {
        matches!(self, Self::Fcfs)
    }
}
