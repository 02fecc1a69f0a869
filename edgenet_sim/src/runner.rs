//! Scenario runner - evolves nets over a synthetic image and checks the result.

use crate::scenarios::{ScenarioId, ScenarioImage};

use edgenet_core::{Evolution, EvolutionConfig, EvolutionOutcome, GenerationReport};
use tracing::{debug, info, warn};

/// Results from running a scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioResult {
    /// Scenario that was run
    pub scenario: ScenarioId,

    /// Seed used
    pub seed: u64,

    /// Image size the scenario ran on
    pub width: u32,
    pub height: u32,

    /// Whether the scenario passed all assertions
    pub passed: bool,

    /// Generations completed
    pub generations: u32,

    /// Nets alive at the end
    pub survivors: usize,

    /// Best fitness among the survivors
    pub best_fitness: Option<i32>,

    /// Share of surviving nodes sitting next to a true boundary, `None`
    /// when the image has no boundaries or nothing survived
    pub boundary_hit_rate: Option<f64>,

    /// Failure message if any
    pub failure_reason: Option<String>,

    /// Final population, `None` if the engine could not be built
    pub outcome: Option<EvolutionOutcome>,

    /// One report per completed generation
    pub reports: Vec<GenerationReport>,

    /// True boundary rows of the scenario image
    pub boundaries: Vec<u32>,
}

/// Runs scenarios.
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Master seed; the engine uses it as is, the image a derived one
    seed: u64,

    /// Image width in pixels
    width: u32,

    /// Image height in pixels
    height: u32,

    /// Engine parameters (its seed is replaced by the runner's)
    config: EvolutionConfig,
}

impl ScenarioRunner {
    /// Creates a new scenario runner.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            width: 64,
            height: 48,
            config: EvolutionConfig::default(),
        }
    }

    /// Sets the image size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the engine parameters.
    pub fn with_config(mut self, config: EvolutionConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, generations: u32) -> Self {
        self.config.generation_count = generations;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Seed of the image generator, decorrelated from the engine stream.
    pub fn image_seed(&self) -> u64 {
        self.seed.wrapping_mul(0x9e3779b97f4a7c15)
    }

    /// Builds the image a scenario runs on.
    pub fn scenario_image(&self, scenario: ScenarioId) -> ScenarioImage {
        scenario.image(self.width, self.height, self.image_seed())
    }

    /// Runs a scenario and returns the result.
    pub fn run(&self, scenario: ScenarioId) -> ScenarioResult {
        info!("Starting scenario: {} (seed={})", scenario.name(), self.seed);
        let ScenarioImage { image, boundaries } = self.scenario_image(scenario);
        let config = self.config.clone().with_seed(self.seed);
        let generation_count = config.generation_count;

        let mut result = ScenarioResult {
            scenario,
            seed: self.seed,
            width: self.width,
            height: self.height,
            passed: false,
            generations: 0,
            survivors: 0,
            best_fitness: None,
            boundary_hit_rate: None,
            failure_reason: None,
            outcome: None,
            reports: Vec::with_capacity(generation_count as usize),
            boundaries,
        };

        let mut engine = match Evolution::new(&image, config) {
            Ok(engine) => engine,
            Err(e) => {
                warn!("Engine rejected scenario {}: {}", scenario.name(), e);
                result.failure_reason = Some(e.to_string());
                return result;
            }
        };

        for _ in 0..generation_count {
            match engine.step_generation() {
                Ok(report) => {
                    debug!(
                        "  gen={} | survivors={} | best={:?}",
                        report.generation, report.survivors, report.best_fitness
                    );
                    result.reports.push(report);
                }
                Err(e) => {
                    warn!("Generation {} failed: {}", engine.generation() + 1, e);
                    result.failure_reason = Some(e.to_string());
                    break;
                }
            }
        }

        let outcome = engine.outcome();
        result.generations = outcome.generations;
        result.survivors = outcome.nets.len();
        result.best_fitness = outcome.nets.iter().map(|net| net.fitness).max();
        if scenario.has_boundaries() {
            result.boundary_hit_rate = boundary_hit_rate(&outcome, &result.boundaries);
        }
        if result.failure_reason.is_none() {
            result.failure_reason = check_outcome(&outcome);
        }
        result.passed = result.failure_reason.is_none();
        result.outcome = Some(outcome);
        result
    }
}

/// Returns the first broken invariant of a finished population, if any.
pub fn check_outcome(outcome: &EvolutionOutcome) -> Option<String> {
    let (width, height) = (outcome.width as i64, outcome.height as i64);
    for net in &outcome.nets {
        if net.fitness < 0 {
            return Some(format!("{} survived with negative fitness {}", net.id, net.fitness));
        }
        let outside = net.chain.iter().find(|c| {
            let (x, y) = (c.x as i64, c.y as i64);
            x < 0 || y < 0 || x >= width || y >= height
        });
        if let Some(node) = outside {
            return Some(format!(
                "{} has node {} outside {}x{}",
                net.id, node, outcome.width, outcome.height
            ));
        }
    }
    None
}

/// Fraction of surviving nodes on a boundary row or the row just above it.
///
/// A node crawling down stops one row above a boundary, a node crawling up
/// stops on it.
pub fn boundary_hit_rate(outcome: &EvolutionOutcome, boundaries: &[u32]) -> Option<f64> {
    if boundaries.is_empty() {
        return None;
    }
    let (mut total, mut hits) = (0usize, 0usize);
    for node in outcome.nets.iter().flat_map(|net| net.chain.iter()) {
        total += 1;
        let row = node.y as i64;
        if boundaries.iter().any(|&b| row == b as i64 || row + 1 == b as i64) {
            hits += 1;
        }
    }
    (total > 0).then(|| hits as f64 / total as f64)
}
