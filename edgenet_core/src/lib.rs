//! edgenet Core - Evolutionary Band-Edge Detection
//!
//! Finds horizontal intensity boundaries in a grayscale image by evolving a
//! population of **nets**: chains of point agents that crawl vertically and
//! stop where the intensity jump exceeds their resistance.
//!
//! 1. **Generation**: new nets are placed on free rows around mid-height
//! 2. **Simulation**: every tick each net steps its free nodes, blocked by
//!    the territory of other nets
//! 3. **Selection**: nets are scored on edge hits and tightness; only the
//!    top band of non-negative scores survives
//!
//! All randomness flows from one seeded stream, so runs replay exactly.
//!
//! ```ignore
//! use edgenet_core::{Evolution, EvolutionConfig};
//!
//! let config = EvolutionConfig::default().with_seed(42);
//! let outcome = Evolution::new(&image, config)?.run()?;
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod evolution;
pub mod net;
pub mod node;
pub mod random;
pub mod ranges;
pub mod render;

// Re-export key types for convenience
pub use analysis::{vertical_difference_range, IntensityRange, ResistanceBand};
pub use config::EvolutionConfig;
pub use error::EvolutionError;
pub use evolution::{
    select, Evolution, EvolutionOutcome, GenerationFeatures, GenerationReport, NetTrace, Selection,
};
pub use net::{Net, NetId, NetParams, EMPTY_NET_FITNESS};
pub use node::{Node, NodeState};
pub use random::{Heading, RandomSource};
pub use ranges::{Limits, OccupiedRanges};
pub use render::{draw_chain, draw_nets, DrawStyle};
