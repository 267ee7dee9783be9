//! Input validation for scheduling runs.
//!
//! The policies themselves assume well-formed input and never check it.
//! These functions turn those preconditions into explicit failures before a
//! run starts. Detects:
//! - Empty workloads and mismatched arrival/burst sequences
//! - Zero bursts and zero pids
//! - Duplicate pids
//! - Unsorted arrivals (FCFS only)
//! - Zero quanta (Round Robin family)
//! - Workloads whose run would carry the clock past [`Ticks::MAX`]
//!
//! Every check runs; all detected issues are returned together.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::models::{Pid, ProcessSet, Ticks};
use crate::policy::PolicyConfig;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// The workload contains no processes.
    EmptyWorkload,
    /// Arrival and burst sequences differ in length.
    LengthMismatch,
    /// Two processes share a pid.
    DuplicatePid,
    /// A pid is zero.
    InvalidPid,
    /// A process requires no CPU time.
    NonPositiveBurst,
    /// Arrival times decrease somewhere in sequence order.
    UnsortedArrivals,
    /// A Round Robin quantum is zero.
    NonPositiveQuantum,
    /// More processes than there are pids.
    TooManyProcesses,
    /// A run could carry the clock past [`Ticks::MAX`].
    ClockOverflow,
}

impl ValidationError {
    /// Creates an error of `kind`.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Latest tick a run of `policy` over `processes` can reach, or `None` if
/// that exceeds [`Ticks::MAX`].
///
/// The bound is the last arrival plus all work, plus one switch penalty per
/// dispatch. Without a policy no penalty is counted.
pub fn clock_horizon(processes: &ProcessSet, policy: Option<&PolicyConfig>) -> Option<Ticks> {
    horizon(processes.iter().map(|p| (p.arrival_time, p.burst_time)), policy)
}

fn horizon(
    mut processes: impl Iterator<Item = (Ticks, Ticks)>,
    policy: Option<&PolicyConfig>,
) -> Option<Ticks> {
    let penalty = policy.map_or(0, PolicyConfig::context_switch_penalty);
    let quantum = policy
        .and_then(PolicyConfig::quantum)
        .unwrap_or(Ticks::MAX)
        .max(1);

    let (latest_arrival, work) = processes.try_fold(
        (0, 0),
        |(latest, work): (Ticks, Ticks), (arrival, burst)| {
            let switches = burst.div_ceil(quantum).checked_mul(penalty)?;
            Some((
                latest.max(arrival),
                work.checked_add(burst)?.checked_add(switches)?,
            ))
        },
    )?;
    latest_arrival.checked_add(work)
}

fn clock_overflow(policy: Option<&PolicyConfig>) -> ValidationError {
    let message = match policy {
        Some(policy) => format!("{} would run past tick {}", policy.name(), Ticks::MAX),
        None => format!("Workload would run past tick {}", Ticks::MAX),
    };
    ValidationError::new(ValidationErrorKind::ClockOverflow, message)
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates parallel arrival/burst sequences.
///
/// Checks:
/// 1. At least one process
/// 2. Equal sequence lengths
/// 3. Every burst is positive
/// 4. Every process gets a pid
/// 5. The clock cannot overflow
pub fn validate_workload(arrivals: &[Ticks], bursts: &[Ticks]) -> ValidationResult {
    let mut errors = Vec::new();

    if arrivals.is_empty() && bursts.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyWorkload,
            "Workload has no processes",
        ));
    }

    if arrivals.len() != bursts.len() {
        errors.push(ValidationError::new(
            ValidationErrorKind::LengthMismatch,
            format!(
                "Workload has {} arrival times but {} burst times",
                arrivals.len(),
                bursts.len()
            ),
        ));
    }

    for (i, &burst) in bursts.iter().enumerate() {
        if burst == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Process at position {} has a zero burst time", i + 1),
            ));
        }
    }

    let count = arrivals.len().max(bursts.len());
    if count.checked_sub(1).is_some_and(|last| Pid::from_index(last).is_none()) {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooManyProcesses,
            format!("Workload has {count} processes, more than {} pids", u32::MAX),
        ));
    }

    if horizon(arrivals.iter().copied().zip(bursts.iter().copied()), None).is_none() {
        errors.push(clock_overflow(None));
    }

    finish(errors)
}

/// Validates an already-built process set.
///
/// Checks:
/// 1. At least one process
/// 2. Every pid is positive and unique
/// 3. Every burst is positive
/// 4. The clock cannot overflow
pub fn validate_process_set(processes: &ProcessSet) -> ValidationResult {
    let mut errors = Vec::new();

    if processes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyWorkload,
            "Workload has no processes",
        ));
    }

    let mut seen = HashSet::new();
    for p in processes {
        if p.pid.get() == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPid,
                "Pid 0 is reserved",
            ));
        }
        if !seen.insert(p.pid) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePid,
                format!("Duplicate pid: {}", p.pid),
            ));
        }
        if p.burst_time == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Process {} has a zero burst time", p.pid),
            ));
        }
    }

    if clock_horizon(processes, None).is_none() {
        errors.push(clock_overflow(None));
    }

    finish(errors)
}

/// Checks that arrivals never decrease in sequence order.
pub fn validate_arrival_order(processes: &ProcessSet) -> ValidationResult {
    let errors = processes
        .as_slice()
        .windows(2)
        .filter(|w| w[1].arrival_time < w[0].arrival_time)
        .map(|w| {
            ValidationError::new(
                ValidationErrorKind::UnsortedArrivals,
                format!(
                    "Process {} arrives at {} before its predecessor {} at {}",
                    w[1].pid, w[1].arrival_time, w[0].pid, w[0].arrival_time
                ),
            )
        })
        .collect();
    finish(errors)
}

/// Validates policy parameters.
pub fn validate_policy(policy: &PolicyConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if let Some(0) = policy.quantum() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveQuantum,
            format!("{} requires a positive quantum", policy.name()),
        ));
    }

    finish(errors)
}

/// Validates everything a run of `policy` over `processes` depends on.
pub fn validate_run(processes: &ProcessSet, policy: &PolicyConfig) -> ValidationResult {
    let mut errors = Vec::new();

    for result in [
        validate_process_set(processes),
        validate_policy(policy),
        if policy.requires_sorted_arrivals() {
            validate_arrival_order(processes)
        } else {
            Ok(())
        },
    ] {
        if let Err(mut found) = result {
            errors.append(&mut found);
        }
    }

    // Switch penalties can push an otherwise valid workload out of range.
    if clock_horizon(processes, None).is_some() && clock_horizon(processes, Some(policy)).is_none()
    {
        errors.push(clock_overflow(Some(policy)));
    }

    finish(errors)
}
