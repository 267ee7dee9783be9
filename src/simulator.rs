//! Policy comparison driver.
//!
//! The simulator owns one validated [`ProcessSet`] and runs policies over
//! fresh copies of it, so results never depend on run order.

use tracing::info;

use crate::config::SimulationConfig;
use crate::error::{Error, Result};
use crate::models::{ProcessSet, SchedulingResult};
use crate::policy::{PolicyConfig, SchedulingPolicy};
use crate::validation;

/// Runs policies over a fixed workload.
///
/// # Example
///
/// ```
/// use u_cpusched::{PolicyConfig, Simulator, Workload};
///
/// let processes = Workload::reference().to_process_set().unwrap();
/// let simulator = Simulator::new(processes).unwrap();
/// let result = simulator.run(&PolicyConfig::Sjf).unwrap();
/// assert!((result.average_waiting_time - 16.5).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    processes: ProcessSet,
}

impl Simulator {
    /// Creates a simulator after checking pids and bursts.
    pub fn new(processes: ProcessSet) -> Result<Self> {
        validation::validate_process_set(&processes).map_err(Error::InvalidWorkload)?;
        Ok(Self { processes })
    }

    /// Creates a simulator for the configured workload.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        Self::new(config.workload.resolve().to_process_set()?)
    }

    /// The validated workload, never mutated by a run.
    pub fn processes(&self) -> &ProcessSet {
        &self.processes
    }

    /// Validates `policy` against the workload, then runs it on a reset copy.
    ///
    /// # Errors
    /// [`Error::InvalidWorkload`] for a zero quantum, or for FCFS over
    /// input not sorted by arrival.
    pub fn run(&self, policy: &PolicyConfig) -> Result<SchedulingResult> {
        validation::validate_run(&self.processes, policy).map_err(Error::InvalidWorkload)?;
        Ok(self.run_policy(policy.build().as_ref()))
    }

    /// Runs an arbitrary policy without parameter checks.
    pub fn run_policy(&self, policy: &dyn SchedulingPolicy) -> SchedulingResult {
        let result = policy.schedule(self.processes.fresh_copy());
        info!(
            policy = policy.name(),
            processes = result.processes.len(),
            makespan = result.makespan(),
            avg_waiting = result.average_waiting_time,
            avg_turnaround = result.average_turnaround_time,
            "simulation finished"
        );
        result
    }

    /// Runs each policy in order. Fails on the first invalid policy.
    pub fn run_all(&self, policies: &[PolicyConfig]) -> Result<Vec<SchedulingResult>> {
        policies.iter().map(|policy| self.run(policy)).collect()
    }
}

/// Builds the configured workload and runs every configured policy.
pub fn run_config(config: &SimulationConfig) -> Result<Vec<SchedulingResult>> {
    Simulator::from_config(config)?.run_all(&config.policies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Pid, Process, SliceKind, Ticks};
    use crate::policy::{Fcfs, RoundRobin, RoundRobinWithPenalty, Sjf};
    use crate::validation::ValidationErrorKind;
    use crate::workload::Workload;
    use proptest::prelude::*;

    fn all_policies(quantum: Ticks, penalty: Ticks) -> Vec<PolicyConfig> {
        vec![
            PolicyConfig::Fcfs,
            PolicyConfig::Sjf,
            PolicyConfig::RoundRobin { quantum },
            PolicyConfig::RoundRobinWithPenalty {
                quantum,
                context_switch_penalty: penalty,
            },
        ]
    }

    fn invalid_kinds(err: Error) -> Vec<ValidationErrorKind> {
        match err {
            Error::InvalidWorkload(errors) => errors.into_iter().map(|e| e.kind).collect(),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_default_config_matches_reference_averages() {
        let results = run_config(&SimulationConfig::default()).unwrap();
        let summary: Vec<(&str, f64)> = results
            .iter()
            .map(|r| (r.policy.as_str(), r.average_waiting_time))
            .collect();

        assert_eq!(summary.len(), 3);
        assert_eq!(summary[0].0, "FCFS");
        assert!((summary[0].1 - 19.2).abs() < 1e-9);
        assert_eq!(summary[1].0, "SJF (Non-Preemptive)");
        assert!((summary[1].1 - 16.5).abs() < 1e-9);
        assert_eq!(summary[2].0, "Round Robin (With Penalty)");
        assert!((summary[2].1 - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_runs_are_independent() {
        let simulator = Simulator::from_config(&SimulationConfig::default()).unwrap();
        let first = simulator.run(&PolicyConfig::RoundRobin { quantum: 4 }).unwrap();
        simulator.run(&PolicyConfig::Sjf).unwrap();
        let again = simulator.run(&PolicyConfig::RoundRobin { quantum: 4 }).unwrap();
        assert_eq!(first, again);
        // The simulator's own copy is never mutated
        assert_eq!(simulator.processes().completed_count(), 0);
    }

    #[test]
    fn test_fcfs_rejects_unsorted() {
        let set = ProcessSet::from_workload(&[3, 0], &[1, 1]).unwrap();
        let simulator = Simulator::new(set).unwrap();
        let kinds = invalid_kinds(simulator.run(&PolicyConfig::Fcfs).unwrap_err());
        assert_eq!(kinds, vec![ValidationErrorKind::UnsortedArrivals]);
        // Other policies accept the same workload
        assert!(simulator.run(&PolicyConfig::Sjf).is_ok());
    }

    #[test]
    fn test_zero_quantum_rejected() {
        let simulator = Simulator::from_config(&SimulationConfig::default()).unwrap();
        let kinds = invalid_kinds(
            simulator
                .run(&PolicyConfig::RoundRobin { quantum: 0 })
                .unwrap_err(),
        );
        assert_eq!(kinds, vec![ValidationErrorKind::NonPositiveQuantum]);
    }

    #[test]
    fn test_run_all_stops_on_invalid_policy() {
        let simulator = Simulator::from_config(&SimulationConfig::default()).unwrap();
        let policies = [PolicyConfig::Fcfs, PolicyConfig::RoundRobin { quantum: 0 }];
        assert!(simulator.run_all(&policies).is_err());
    }

    #[test]
    fn test_new_rejects_duplicate_pids() {
        let set = ProcessSet::new(vec![
            Process::new(Pid::new(1), 0, 1),
            Process::new(Pid::new(1), 0, 1),
        ]);
        let kinds = invalid_kinds(Simulator::new(set).unwrap_err());
        assert_eq!(kinds, vec![ValidationErrorKind::DuplicatePid]);
    }

    #[test]
    fn test_new_rejects_clock_overflow() {
        let set = ProcessSet::new(vec![Process::new(Pid::new(1), Ticks::MAX, 1)]);
        let kinds = invalid_kinds(Simulator::new(set).unwrap_err());
        assert_eq!(kinds, vec![ValidationErrorKind::ClockOverflow]);
    }

    #[test]
    fn test_run_rejects_penalty_overflow() {
        let set = ProcessSet::from_workload(&[0, 0], &[2, 2]).unwrap();
        let simulator = Simulator::new(set).unwrap();
        let policy = PolicyConfig::RoundRobinWithPenalty {
            quantum: 1,
            context_switch_penalty: Ticks::MAX / 2,
        };
        let kinds = invalid_kinds(simulator.run(&policy).unwrap_err());
        assert_eq!(kinds, vec![ValidationErrorKind::ClockOverflow]);
        assert!(simulator.run(&PolicyConfig::RoundRobin { quantum: 1 }).is_ok());
    }

    #[test]
    fn test_run_near_clock_limit() {
        let set = ProcessSet::from_workload(&[Ticks::MAX - 3], &[3]).unwrap();
        let simulator = Simulator::new(set).unwrap();
        for result in simulator.run_all(&all_policies(2, 0)).unwrap() {
            assert_eq!(result.processes[0].finish_time(), Some(Ticks::MAX));
            assert_eq!(result.processes[0].waiting_time(), Some(0));
        }
    }

    #[test]
    fn test_from_config_rejects_empty_workload() {
        let config = SimulationConfig::new(crate::workload::WorkloadSource::Explicit(
            Workload::new(Vec::new(), Vec::new()),
        ));
        let kinds = invalid_kinds(Simulator::from_config(&config).unwrap_err());
        assert!(kinds.contains(&ValidationErrorKind::EmptyWorkload));
    }

    #[test]
    fn test_run_policy_accepts_custom_policy() {
        let simulator = Simulator::from_config(&SimulationConfig::default()).unwrap();
        let result = simulator.run_policy(&RoundRobinWithPenalty::new(4, 1));
        assert_eq!(result.context_switches(), 17);
    }

    fn sorted_workload() -> impl Strategy<Value = ProcessSet> {
        prop::collection::vec((0u64..40, 1u64..12), 1..12).prop_map(|mut pairs| {
            pairs.sort_by_key(|&(arrival, _)| arrival);
            let (arrivals, bursts): (Vec<Ticks>, Vec<Ticks>) = pairs.into_iter().unzip();
            ProcessSet::from_workload(&arrivals, &bursts).unwrap()
        })
    }

    proptest! {
        #[test]
        fn prop_conservation_laws(
            processes in sorted_workload(),
            quantum in 1u64..6,
            penalty in 0u64..3,
        ) {
            let simulator = Simulator::new(processes).unwrap();
            for policy in all_policies(quantum, penalty) {
                let result = simulator.run(&policy).unwrap();
                prop_assert!(result.processes.all_completed());

                for p in &result.processes {
                    let c = p.completion().unwrap();
                    prop_assert_eq!(c.turnaround_time, c.finish_time - p.arrival_time);
                    prop_assert_eq!(c.waiting_time, c.turnaround_time - p.burst_time);
                    prop_assert!(c.finish_time >= p.arrival_time + p.burst_time);
                    // Work conservation
                    prop_assert_eq!(result.run_time_for(p.pid), p.burst_time);
                    // No slice starts before arrival
                    for s in result.run_slices_for(p.pid) {
                        prop_assert!(s.start >= p.arrival_time);
                    }
                }
            }
        }

        #[test]
        fn prop_timeline_is_contiguous(
            processes in sorted_workload(),
            quantum in 1u64..6,
            penalty in 0u64..3,
        ) {
            let simulator = Simulator::new(processes).unwrap();
            for policy in all_policies(quantum, penalty) {
                let result = simulator.run(&policy).unwrap();
                let mut now = 0;
                for s in &result.timeline {
                    prop_assert_eq!(s.start, now);
                    now = s.end;
                }
                prop_assert_eq!(now, result.makespan());
            }
        }

        #[test]
        fn prop_penalty_accounting(
            processes in sorted_workload(),
            quantum in 1u64..6,
            penalty in 0u64..4,
        ) {
            let simulator = Simulator::new(processes).unwrap();
            let result = simulator.run_policy(&RoundRobinWithPenalty::new(quantum, penalty));

            // Pid that holds (or is being switched onto) the CPU
            let mut holder = None;
            for s in &result.timeline {
                match s.kind {
                    SliceKind::ContextSwitch => {
                        prop_assert_eq!(s.duration(), penalty);
                        prop_assert!(holder.is_some(), "first dispatch was charged");
                        prop_assert_ne!(holder, s.pid);
                        holder = s.pid;
                    }
                    SliceKind::Run => {
                        prop_assert!(
                            holder.is_none() || holder == s.pid,
                            "unpaid switch to {:?}",
                            s.pid
                        );
                        holder = s.pid;
                    }
                    SliceKind::Idle => {}
                }
            }
        }

        #[test]
        fn prop_reset_is_idempotent(processes in sorted_workload(), quantum in 1u64..6) {
            let simulator = Simulator::new(processes).unwrap();
            let policies: [&dyn SchedulingPolicy; 4] = [
                &Fcfs,
                &Sjf,
                &RoundRobin::new(quantum),
                &RoundRobinWithPenalty::new(quantum, 1),
            ];
            for policy in policies {
                prop_assert_eq!(simulator.run_policy(policy), simulator.run_policy(policy));
            }
        }

        #[test]
        fn prop_sjf_never_worse_than_fcfs_when_all_arrive_at_once(
            bursts in prop::collection::vec(1u64..20, 1..10),
        ) {
            let arrivals = vec![0; bursts.len()];
            let simulator = Simulator::new(ProcessSet::from_workload(&arrivals, &bursts).unwrap()).unwrap();
            let fcfs = simulator.run_policy(&Fcfs);
            let sjf = simulator.run_policy(&Sjf);
            prop_assert!(sjf.average_waiting_time <= fcfs.average_waiting_time + 1e-9);
        }
    }
}
