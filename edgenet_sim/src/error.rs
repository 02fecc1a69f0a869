//! Error types for the simulation harness.

use edgenet_core::EvolutionError;
use thiserror::Error;

/// Errors that stop the harness before or after a scenario run.
///
/// Engine failures during a run are not errors here: they fail the
/// scenario and land in [`crate::ScenarioResult::failure_reason`].
#[derive(Debug, Error)]
pub enum SimError {
    /// Reading a config file or writing an export failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A config file is not valid JSON for `EvolutionConfig`
    #[error("Malformed config {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The merged configuration failed validation
    #[error(transparent)]
    Evolution(#[from] EvolutionError),

    /// No scenario matches the requested name
    #[error("{0} (available: bands, step, uniform, gradient, noisy_bands, all)")]
    UnknownScenario(String),

    /// The export is not representable as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A flag combination the harness cannot honour
    #[error("Usage error: {0}")]
    Usage(String),
}

impl SimError {
    /// Creates an I/O error for `path`.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
