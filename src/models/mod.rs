//! CPU scheduling domain models.
//!
//! | Type | Role |
//! |------|------|
//! | `Process` | One simulated task and its lifecycle |
//! | `ProcessSet` | Ordered workload, value-semantics input to every policy |
//! | `SchedulingResult` | Completed processes, CPU timeline, averages |
//! | `Slice` | One interval of CPU activity (run, switch, idle) |

mod process;
mod process_set;
mod result;

pub use process::{Completion, Pid, Process, ProcessState, Ticks};
pub use process_set::ProcessSet;
pub use result::{SchedulingResult, Slice, SliceKind};
