//! Seeded random source for the evolution engine.
//!
//! All entropy used by a run comes from one `ChaCha8Rng` stream seeded
//! with a single 64-bit value, so any run can be replayed from its seed.

use crate::error::EvolutionError;
use crate::ranges::OccupiedRanges;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

/// Default retry budget for rejection sampling.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// Vertical crawling direction of a net.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heading {
    /// 90 degrees: nodes move towards row 0
    Up,

    /// 270 degrees: nodes move towards the last row
    Down,
}

impl Heading {
    /// Direction angle in degrees.
    pub fn degrees(&self) -> f64 {
        match self {
            Heading::Up => 90.0,
            Heading::Down => 270.0,
        }
    }
}

/// Deterministic random source.
#[derive(Debug, Clone)]
pub struct RandomSource {
    /// Seed the stream was created from
    seed: u64,

    /// The stream itself
    rng: ChaCha8Rng,

    /// Draws allowed before rejection sampling gives up
    max_attempts: u32,
}

impl RandomSource {
    /// Creates a random source from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Creates a random source with a seed taken from OS entropy.
    ///
    /// The seed is still recorded, so the run can be replayed.
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Sets the rejection sampling retry budget (at least one draw).
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Returns the seed of this stream.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the rejection sampling retry budget.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Uniform integer in `[lower, upper]`, both inclusive.
    ///
    /// Bounds given in the wrong order are swapped.
    pub fn uniform_int(&mut self, lower: i32, upper: i32) -> i32 {
        let (lo, hi) = if lower <= upper { (lower, upper) } else { (upper, lower) };
        self.rng.gen_range(lo..=hi)
    }

    /// Normally distributed value.
    pub fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        mean + z * std_dev
    }

    /// Normally distributed value rounded to the nearest integer.
    pub fn gaussian_int(&mut self, mean: f64, std_dev: f64) -> i32 {
        self.gaussian(mean, std_dev).round() as i32
    }

    /// Uniform integer in `[lower, upper]` outside every occupied range.
    pub fn uniform_excluding(
        &mut self,
        lower: i32,
        upper: i32,
        ranges: &OccupiedRanges,
    ) -> Result<i32, EvolutionError> {
        if ranges.covers(lower, upper) {
            return Err(EvolutionError::exhausted(lower, upper, 0));
        }
        for _ in 0..self.max_attempts {
            let chosen = self.uniform_int(lower, upper);
            if !ranges.contains(chosen) {
                return Ok(chosen);
            }
        }
        Err(EvolutionError::exhausted(lower, upper, self.max_attempts))
    }

    /// Gaussian integer clipped to `[lower, upper]` and outside every
    /// occupied range. Out-of-bound and occupied draws are resampled.
    pub fn gaussian_excluding(
        &mut self,
        mean: f64,
        std_dev: f64,
        lower: i32,
        upper: i32,
        ranges: &OccupiedRanges,
    ) -> Result<i32, EvolutionError> {
        if ranges.covers(lower, upper) {
            return Err(EvolutionError::exhausted(lower, upper, 0));
        }
        for _ in 0..self.max_attempts {
            let chosen = self.gaussian_int(mean, std_dev);
            if chosen >= lower && chosen <= upper && !ranges.contains(chosen) {
                return Ok(chosen);
            }
        }
        Err(EvolutionError::exhausted(lower, upper, self.max_attempts))
    }

    /// Either heading, with equal probability.
    pub fn vertical_direction(&mut self) -> Heading {
        if self.rng.gen_bool(0.5) {
            Heading::Up
        } else {
            Heading::Down
        }
    }
}
