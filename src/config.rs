//! Simulation configuration.
//!
//! A configuration names a workload and the ordered list of policies to run
//! over it. Loaded from JSON; every field has a default.
//!
//! ```json
//! {
//!   "workload": { "arrivals": [0, 2, 4], "bursts": [5, 3, 2] },
//!   "policies": [
//!     { "policy": "fcfs" },
//!     { "policy": "round_robin_with_penalty", "quantum": 4, "context_switch_penalty": 1 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::policy::PolicyConfig;
use crate::workload::WorkloadSource;

/// Workload plus the policies to compare on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub workload: WorkloadSource,
    #[serde(default = "default_policies")]
    pub policies: Vec<PolicyConfig>,
}

/// FCFS, SJF, then Round Robin with quantum 4 and a one-tick switch penalty.
pub fn default_policies() -> Vec<PolicyConfig> {
    vec![
        PolicyConfig::Fcfs,
        PolicyConfig::Sjf,
        PolicyConfig::RoundRobinWithPenalty {
            quantum: 4,
            context_switch_penalty: 1,
        },
    ]
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            workload: WorkloadSource::default(),
            policies: default_policies(),
        }
    }
}

impl SimulationConfig {
    /// Creates a configuration with no policies.
    pub fn new(workload: WorkloadSource) -> Self {
        Self {
            workload,
            policies: Vec::new(),
        }
    }

    /// Appends a policy to the run order.
    pub fn with_policy(mut self, policy: PolicyConfig) -> Self {
        self.policies.push(policy);
        self
    }

    /// Parses a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::Workload;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.workload.resolve(), Workload::reference());
        assert_eq!(config.policies.len(), 3);
        assert_eq!(config.policies[0], PolicyConfig::Fcfs);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = SimulationConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_full_document() {
        let config = SimulationConfig::from_json_str(
            r#"{
                "workload": { "arrivals": [0, 2, 4], "bursts": [5, 3, 2] },
                "policies": [
                    { "policy": "fcfs" },
                    { "policy": "round_robin", "quantum": 2 }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.workload.resolve().bursts, vec![5, 3, 2]);
        assert_eq!(
            config.policies,
            vec![PolicyConfig::Fcfs, PolicyConfig::RoundRobin { quantum: 2 }]
        );
    }

    #[test]
    fn test_builder() {
        let config = SimulationConfig::new(WorkloadSource::reference())
            .with_policy(PolicyConfig::Sjf)
            .with_policy(PolicyConfig::RoundRobin { quantum: 3 });
        assert_eq!(config.policies.len(), 2);
    }

    #[test]
    fn test_malformed_json() {
        let err = SimulationConfig::from_json_str("{ \"policies\": 5 }").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_load_demo_files() {
        let compare =
            SimulationConfig::load(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/compare.json"))
                .unwrap();
        assert_eq!(compare.workload.resolve(), Workload::reference());
        assert_eq!(compare.policies.len(), 4);

        let random =
            SimulationConfig::load(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/random.json"))
                .unwrap();
        assert_eq!(random.workload.resolve().len(), 25);
    }

    #[test]
    fn test_missing_file() {
        let err = SimulationConfig::load("/nonexistent/u-cpusched.json").unwrap_err();
        match err {
            Error::Io { path, .. } => assert!(path.ends_with("u-cpusched.json")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
