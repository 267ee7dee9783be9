//! Command-line driver.
//!
//! ```text
//! u-cpusched [--json] [--metrics] [CONFIG.json]
//! ```
//!
//! Without a config file the built-in reference workload runs under FCFS,
//! SJF and Round Robin with a context-switch penalty. Set `RUST_LOG=debug`
//! to trace every dispatch.

use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;
use u_cpusched::{run_config, Report, ScheduleMetrics, SimulationConfig};

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    json: bool,
    metrics: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args::default();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => args.json = true,
            "--metrics" => args.metrics = true,
            flag if flag.starts_with("--") => bail!("unknown flag: {flag}"),
            path => {
                if args.config.replace(PathBuf::from(path)).is_some() {
                    bail!("only one config file may be given");
                }
            }
        }
    }
    Ok(args)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    let results = run_config(&config).context("running simulation")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            print!("{}", Report::new(result));
        }
    }

    if args.metrics {
        let metrics: Vec<ScheduleMetrics> = results.iter().map(ScheduleMetrics::calculate).collect();
        if args.json {
            println!("{}", serde_json::to_string_pretty(&metrics)?);
        } else {
            println!("Policy\tUtil\tThroughput\tSwitches\tOverhead\tMakespan");
            for m in &metrics {
                println!(
                    "{}\t{:.2}\t{:.3}\t{}\t{}\t{}",
                    m.policy,
                    m.cpu_utilization,
                    m.throughput,
                    m.context_switches,
                    m.switch_overhead,
                    m.makespan
                );
            }
        }
    }

    Ok(())
}
