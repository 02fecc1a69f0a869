//! Evolution parameters.

use crate::error::EvolutionError;
use crate::random::DEFAULT_MAX_ATTEMPTS;
use serde::{Deserialize, Serialize};

/// Configuration for an evolution run.
///
/// Rates and densities are fractions. Values outside their documented
/// ranges are rejected by [`EvolutionConfig::validate`], never clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Fraction of the image height populated with nets, `(0, 1)`
    pub population_density: f64,

    /// Fraction of the image width populated with nodes, `(0, 1)`
    pub node_density: f64,

    /// Fraction of new nets created with a random resistance, `[0, 1]`
    pub mutation_rate: f64,

    /// Width of the selection band relative to the fitness spread, `[0, 1]`
    pub selection_rate: f64,

    /// How far the resistance band reaches below the strongest edge, `[0, 1]`
    pub sensitivity: f64,

    /// Vertical spread a net may have before it is penalized
    pub dispersion_allowed: u32,

    /// Number of generations to run
    pub generation_count: u32,

    /// Master seed for determinism (None = seed from OS entropy)
    pub seed: Option<u64>,

    /// Draws allowed when placing a net before giving up
    pub max_sampling_attempts: u32,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_density: 0.2,
            node_density: 0.4,
            mutation_rate: 0.1,
            selection_rate: 0.2,
            sensitivity: 0.2,
            dispersion_allowed: 2,
            generation_count: 100,
            seed: None,
            max_sampling_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl EvolutionConfig {
    /// Sets the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, generations: u32) -> Self {
        self.generation_count = generations;
        self
    }

    /// Sets population and node densities.
    pub fn with_densities(mut self, population: f64, node: f64) -> Self {
        self.population_density = population;
        self.node_density = node;
        self
    }

    /// Sets mutation and selection rates.
    pub fn with_rates(mut self, mutation: f64, selection: f64) -> Self {
        self.mutation_rate = mutation;
        self.selection_rate = selection;
        self
    }

    /// Sets the sensitivity.
    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Sets the dispersion allowance.
    pub fn with_dispersion(mut self, dispersion_allowed: u32) -> Self {
        self.dispersion_allowed = dispersion_allowed;
        self
    }

    /// Checks every field against its documented range.
    pub fn validate(&self) -> Result<(), EvolutionError> {
        open_unit("population_density", self.population_density)?;
        open_unit("node_density", self.node_density)?;
        closed_unit("mutation_rate", self.mutation_rate)?;
        closed_unit("selection_rate", self.selection_rate)?;
        closed_unit("sensitivity", self.sensitivity)?;
        if self.max_sampling_attempts == 0 {
            return Err(EvolutionError::invalid("max_sampling_attempts", 0, "at least 1"));
        }
        Ok(())
    }
}

fn open_unit(field: &'static str, value: f64) -> Result<(), EvolutionError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(EvolutionError::invalid(field, value, "a value in (0, 1)"))
    }
}

fn closed_unit(field: &'static str, value: f64) -> Result<(), EvolutionError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EvolutionError::invalid(field, value, "a value in [0, 1]"))
    }
}
