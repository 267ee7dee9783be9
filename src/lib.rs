//! CPU scheduling policy simulator.
//!
//! Runs classic single-CPU dispatch disciplines over the same workload and
//! reports per-process and average timing metrics, so the policies can be
//! compared side by side. The clock is a logical tick counter.
//!
//! # Modules
//!
//! - **`models`**: `Process` (with an explicit lifecycle), `ProcessSet`,
//!   `SchedulingResult`, `Slice`
//! - **`policy`**: `Fcfs`, `Sjf`, `RoundRobin`, `RoundRobinWithPenalty`,
//!   the `SchedulingPolicy` trait and the serializable `PolicyConfig`
//! - **`metrics`**: `ScheduleMetrics` (utilization, throughput, switch overhead)
//! - **`validation`**: Precondition checks (empty input, zero bursts,
//!   duplicate pids, unsorted FCFS input, zero quanta)
//! - **`workload`** / **`config`**: Workload sources and JSON configuration
//! - **`simulator`**: Validate, reset, run, collect
//! - **`report`**: Tabular text output
//!
//! # Example
//!
//! ```
//! use u_cpusched::{run_config, Report, SimulationConfig};
//!
//! let results = run_config(&SimulationConfig::default()).unwrap();
//! for result in &results {
//!     print!("{}", Report::new(result));
//! }
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7

pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod policy;
pub mod report;
pub mod simulator;
pub mod validation;
pub mod workload;

pub use config::SimulationConfig;
pub use error::{Error, Result};
pub use metrics::ScheduleMetrics;
pub use policy::{PolicyConfig, SchedulingPolicy};
pub use report::Report;
pub use simulator::{run_config, Simulator};
pub use workload::Workload;
