//! Text report for a scheduling result.
//!
//! ```text
//! ================ FCFS ================
//! PID	Arr	Bst	Fin	Wait	TAT
//! 1	0	5	5	0	5
//! --------------------------------------------
//! Average Waiting Time: 0.00
//! Average Turnaround Time: 5.00
//! ```

use std::fmt;

use crate::models::SchedulingResult;

const RULE: &str = "--------------------------------------------";

/// Tabular, tab-separated view of one result.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    result: &'a SchedulingResult,
}

impl<'a> Report<'a> {
    pub fn new(result: &'a SchedulingResult) -> Self {
        Self { result }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result;
        writeln!(f)?;
        writeln!(f, "================ {} ================", result.policy)?;
        writeln!(f, "PID\tArr\tBst\tFin\tWait\tTAT")?;
        for p in &result.processes {
            writeln!(
                f,
                "{}\t{}\t{}\t{}\t{}\t{}",
                p.pid,
                p.arrival_time,
                p.burst_time,
                p.finish_time().unwrap_or(0),
                p.waiting_time().unwrap_or(0),
                p.turnaround_time().unwrap_or(0)
            )?;
        }
        writeln!(f, "{RULE}")?;
        writeln!(f, "Average Waiting Time: {:.2}", result.average_waiting_time)?;
        writeln!(
            f,
            "Average Turnaround Time: {:.2}",
            result.average_turnaround_time
        )?;
        writeln!(f)
    }
}

/// Concatenates the reports of several results.
pub fn render_all(results: &[SchedulingResult]) -> String {
    results.iter().map(|r| Report::new(r).to_string()).collect()
}
