//! Error types for the evolution engine.

use thiserror::Error;

/// Errors surfaced to the caller of the evolution engine.
///
/// Per-node and per-net failures (leaving the image, colliding with
/// another net) never show up here: the node state machine absorbs them.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvolutionError {
    /// A configuration value is outside its documented range
    #[error("Invalid configuration: {field} = {value} (expected {expected})")]
    InvalidConfiguration {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Rejection sampling found no value outside the occupied ranges
    #[error("Sampling exhausted: no row in [{lower}, {upper}] outside occupied ranges after {attempts} attempts")]
    SamplingExhausted { lower: i32, upper: i32, attempts: u32 },

    /// The pixel source has no rows or no columns
    #[error("Empty image: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
}

impl EvolutionError {
    /// Creates a configuration error.
    pub fn invalid(field: &'static str, value: impl std::fmt::Display, expected: &'static str) -> Self {
        Self::InvalidConfiguration {
            field,
            value: value.to_string(),
            expected,
        }
    }

    /// Creates a sampling exhaustion error.
    pub fn exhausted(lower: i32, upper: i32, attempts: u32) -> Self {
        Self::SamplingExhausted { lower, upper, attempts }
    }
}
