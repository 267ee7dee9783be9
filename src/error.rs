//! Crate error type.

use std::path::PathBuf;

use crate::validation::ValidationError;

/// Errors raised before a simulation starts.
///
/// The engine itself cannot fail once its inputs are valid.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The workload or policy parameters violate a precondition.
    #[error("invalid workload: {}", join(.0))]
    InvalidWorkload(Vec<ValidationError>),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
