//! The evolution engine: net generation, simulation ticks and selection.
//!
//! Each generation runs through the same phases:
//!
//! ```text
//!  features ──► generate ──► simulate (lifetime ticks) ──► select
//!     ▲          (regular +      │ snapshot ranges            │
//!     │           mutated)       │ run every net              │
//!     └──────────────────────────┴────────────────────────────┘
//! ```

use crate::analysis::{vertical_difference_range, ResistanceBand};
use crate::config::EvolutionConfig;
use crate::error::EvolutionError;
use crate::net::{Net, NetId, NetParams};
use crate::random::{Heading, RandomSource};
use crate::ranges::OccupiedRanges;
use edgenet_env::{Coordinate, PixelSource};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// Per-generation quantities derived from the image and population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationFeatures {
    /// Nets to create this generation
    pub target_count: usize,

    /// Node count N of every new net (chains get N + 1 nodes)
    pub node_count: usize,

    /// Horizontal distance between nodes of a new net
    pub horizontal_step: i32,

    /// Simulation ticks this generation runs
    pub lifetime: usize,
}

impl GenerationFeatures {
    /// Computes the features for an image of `width` x `height` currently
    /// holding `population` nets.
    pub fn compute(width: u32, height: u32, population: usize, config: &EvolutionConfig) -> Self {
        let wanted = (height as f64 * config.population_density).ceil() as i64;
        Self {
            target_count: (wanted - population as i64).max(0) as usize,
            node_count: (width as f64 * config.node_density).ceil() as usize,
            horizontal_step: (1.0 / config.node_density) as i32 + 1,
            lifetime: (height as f64 * (1.0 - config.population_density)) as usize,
        }
    }

    /// Splits the target into regular and mutated net counts.
    ///
    /// Both parts are truncated, so their sum may fall short of the target.
    pub fn split(&self, mutation_rate: f64) -> (usize, usize) {
        let target = self.target_count as f64;
        (
            (target * (1.0 - mutation_rate)) as usize,
            (target * mutation_rate) as usize,
        )
    }
}

/// Result of one selection pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Kept nets, ascending by fitness
    pub survivors: Vec<Net>,

    /// Cutoff applied, `None` when no net had a non-negative fitness
    pub lower_bound: Option<i32>,

    /// Nets dropped
    pub discarded: usize,
}

/// Keeps the nets whose fitness lies in the selection band.
///
/// Nets with negative fitness are dropped outright. Among the rest the
/// band is `[best_max - trunc((best_max - best_min) * selection_rate), best_max]`,
/// so the pressure adapts to how spread out the generation's scores are.
pub fn select(nets: Vec<Net>, selection_rate: f64) -> Selection {
    let total = nets.len();

    // Score once; sort is stable so ties keep population order
    let mut scored: Vec<(i32, Net)> = nets.into_iter().map(|net| (net.fitness(), net)).collect();
    scored.sort_by_key(|(fitness, _)| *fitness);

    let first_kept = scored.partition_point(|(fitness, _)| *fitness < 0);
    let candidates = scored.split_off(first_kept);

    let (best_min, best_max) = match (candidates.first(), candidates.last()) {
        (Some((min, _)), Some((max, _))) => (*min, *max),
        _ => {
            return Selection {
                survivors: Vec::new(),
                lower_bound: None,
                discarded: total,
            }
        }
    };

    let lower_bound = best_max - ((best_max - best_min) as f64 * selection_rate) as i32;
    let survivors: Vec<Net> = candidates
        .into_iter()
        .filter(|(fitness, _)| *fitness >= lower_bound)
        .map(|(_, net)| net)
        .collect();

    Selection {
        discarded: total - survivors.len(),
        survivors,
        lower_bound: Some(lower_bound),
    }
}

/// Summary of one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// 1-based generation number
    pub generation: u32,

    pub features: GenerationFeatures,

    /// Regular nets created
    pub created: usize,

    /// Mutated nets created
    pub mutated: usize,

    /// Resistance shared by this generation's regular nets
    pub regular_resistance: Option<i32>,

    /// Resistance shared by this generation's mutated nets
    pub mutated_resistance: Option<i32>,

    /// Ticks simulated
    pub ticks: usize,

    /// Population size after selection
    pub survivors: usize,

    /// Nets dropped by selection
    pub discarded: usize,

    /// Selection cutoff, `None` if the population died out
    pub lower_bound: Option<i32>,

    /// Best fitness among survivors
    pub best_fitness: Option<i32>,
}

/// Final state of one net, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetTrace {
    pub id: NetId,
    pub fitness: i32,
    pub resistance: i32,
    pub heading: Heading,

    /// Nodes sitting on an edge
    pub ready_nodes: usize,

    /// Live node positions in chain order
    pub chain: Vec<Coordinate>,
}

impl From<&Net> for NetTrace {
    fn from(net: &Net) -> Self {
        Self {
            id: net.id(),
            fitness: net.fitness(),
            resistance: net.resistance(),
            heading: net.heading(),
            ready_nodes: net.ready_count(),
            chain: net.chain(),
        }
    }
}

/// Surviving population of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionOutcome {
    /// Seed the run can be replayed with
    pub seed: u64,

    /// Generations completed
    pub generations: u32,

    pub width: u32,
    pub height: u32,

    pub nets: Vec<NetTrace>,
}

/// The evolution engine.
///
/// Owns the population and the random stream; borrows the pixel source,
/// which it never mutates.
pub struct Evolution<'a, S: PixelSource + ?Sized> {
    source: &'a S,

    config: EvolutionConfig,

    rng: RandomSource,

    /// Resistance interval of regular nets
    band: ResistanceBand,

    /// Current population
    nets: Vec<Net>,

    next_id: u64,

    /// Generations completed so far
    generation: u32,
}

impl<'a, S: PixelSource + ?Sized> Evolution<'a, S> {
    /// Validates the configuration and analyses the image.
    pub fn new(source: &'a S, config: EvolutionConfig) -> Result<Self, EvolutionError> {
        config.validate()?;
        let (width, height) = (source.width(), source.height());
        if width == 0 || height == 0 {
            return Err(EvolutionError::EmptyImage { width, height });
        }

        let rng = match config.seed {
            Some(seed) => RandomSource::new(seed),
            None => RandomSource::from_entropy(),
        }
        .with_max_attempts(config.max_sampling_attempts);

        let range = vertical_difference_range(source);
        let band = ResistanceBand::from_range(range, config.sensitivity);
        info!(
            seed = rng.seed(),
            width,
            height,
            min_difference = range.min,
            max_difference = range.max,
            "Evolution engine ready (resistance band {}..={})",
            band.lower,
            band.upper
        );

        Ok(Self {
            source,
            config,
            rng,
            band,
            nets: Vec::new(),
            next_id: 0,
            generation: 0,
        })
    }

    /// Returns the seed of the run.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Generations completed so far.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn resistance_band(&self) -> ResistanceBand {
        self.band
    }

    /// Current population.
    pub fn population(&self) -> &[Net] {
        &self.nets
    }

    /// Consumes the engine, returning the population.
    pub fn into_population(self) -> Vec<Net> {
        self.nets
    }

    /// Features of the next generation given the current population.
    pub fn features(&self) -> GenerationFeatures {
        GenerationFeatures::compute(
            self.source.width(),
            self.source.height(),
            self.nets.len(),
            &self.config,
        )
    }

    /// Snapshot of the territory claimed by every non-empty net.
    pub fn occupied_ranges(&self) -> OccupiedRanges {
        self.nets
            .iter()
            .filter_map(|net| net.limits().map(|limits| (net.id(), limits)))
            .collect()
    }

    /// Places one new net with the given resistance outside all occupied
    /// territory, on a row drawn around mid-height.
    pub fn spawn_net(
        &mut self,
        features: &GenerationFeatures,
        resistance: i32,
    ) -> Result<NetId, EvolutionError> {
        let height = self.source.height() as i32;
        let middle = (height / 2) as f64;
        let ranges = self.occupied_ranges();
        let row = self.rng.gaussian_excluding(middle, middle, 0, height - 1, &ranges)?;
        let heading = self.rng.vertical_direction();

        let id = NetId(self.next_id);
        self.next_id += 1;
        self.nets.push(Net::new(
            id,
            NetParams {
                row,
                node_count: features.node_count,
                horizontal_step: features.horizontal_step,
                heading,
                resistance,
                dispersion_allowed: self.config.dispersion_allowed,
            },
        ));
        trace!(%id, row, ?heading, resistance, "Spawned net");
        Ok(id)
    }

    /// Spawns `count` nets sharing one resistance drawn from `band`.
    /// Returns the resistance, or `None` when nothing was spawned.
    fn spawn_batch(
        &mut self,
        count: usize,
        band: ResistanceBand,
        features: &GenerationFeatures,
    ) -> Result<Option<i32>, EvolutionError> {
        if count == 0 {
            return Ok(None);
        }
        let resistance = self.rng.uniform_int(band.lower, band.upper);
        for _ in 0..count {
            self.spawn_net(features, resistance)?;
        }
        Ok(Some(resistance))
    }

    /// Runs one simulation tick over the whole population.
    ///
    /// Every net sees the same snapshot of occupied ranges, taken before
    /// any net moves.
    pub fn tick(&mut self) {
        let snapshot = self.occupied_ranges();
        Self::run_nets(&mut self.nets, self.source, &snapshot);
    }

    #[cfg(feature = "parallel")]
    fn run_nets(nets: &mut [Net], source: &S, snapshot: &OccupiedRanges) {
        use rayon::prelude::*;
        nets.par_iter_mut().for_each(|net| net.run(source, snapshot));
    }

    #[cfg(not(feature = "parallel"))]
    fn run_nets(nets: &mut [Net], source: &S, snapshot: &OccupiedRanges) {
        for net in nets.iter_mut() {
            net.run(source, snapshot);
        }
    }

    /// Runs one full generation: generate, simulate, select.
    pub fn step_generation(&mut self) -> Result<GenerationReport, EvolutionError> {
        let features = self.features();
        let (regular, mutated) = features.split(self.config.mutation_rate);

        let regular_resistance = self.spawn_batch(regular, self.band, &features)?;
        let mutated_resistance = self.spawn_batch(mutated, ResistanceBand::MUTATION, &features)?;

        for _ in 0..features.lifetime {
            self.tick();
        }

        let selection = select(std::mem::take(&mut self.nets), self.config.selection_rate);
        self.nets = selection.survivors;
        self.generation += 1;

        let report = GenerationReport {
            generation: self.generation,
            features,
            created: regular,
            mutated,
            regular_resistance,
            mutated_resistance,
            ticks: features.lifetime,
            survivors: self.nets.len(),
            discarded: selection.discarded,
            lower_bound: selection.lower_bound,
            best_fitness: self.nets.last().map(Net::fitness),
        };

        if self.nets.is_empty() {
            debug!(generation = self.generation, "Population died out; regenerating next generation");
        }
        debug!(
            generation = report.generation,
            created = report.created,
            mutated = report.mutated,
            survivors = report.survivors,
            discarded = report.discarded,
            best = ?report.best_fitness,
            "Generation complete"
        );
        Ok(report)
    }

    /// Runs the configured number of generations and returns the outcome.
    pub fn run(&mut self) -> Result<EvolutionOutcome, EvolutionError> {
        for _ in 0..self.config.generation_count {
            self.step_generation()?;
        }
        info!(
            seed = self.seed(),
            generations = self.generation,
            survivors = self.nets.len(),
            "Evolution finished"
        );
        Ok(self.outcome())
    }

    /// Current population as renderer-ready traces.
    pub fn outcome(&self) -> EvolutionOutcome {
        EvolutionOutcome {
            seed: self.seed(),
            generations: self.generation,
            width: self.source.width(),
            height: self.source.height(),
            nets: self.nets.iter().map(NetTrace::from).collect(),
        }
    }
}
