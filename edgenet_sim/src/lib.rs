//! edgenet Simulation Harness
//!
//! Runs the evolution engine against synthetic images whose band
//! boundaries are known, and checks what the surviving nets found.
//!
//! # Determinism
//!
//! Everything flows from one 64-bit seed:
//! - **Engine**: the seed is handed to the evolution engine unchanged
//! - **Image**: noisy scenarios draw from a stream seeded with a derived value
//!
//! Any failing run is reproduced by re-running its scenario with its seed.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     ScenarioRunner                       │
//! │  ┌──────────────┐   image    ┌────────────────────────┐  │
//! │  │  ScenarioId  │──────────► │  edgenet_core          │  │
//! │  │  (synthetic  │            │  Evolution engine      │  │
//! │  │   images)    │            └───────────┬────────────┘  │
//! │  └──────┬───────┘                        │ reports,      │
//! │         │ true boundaries                │ outcome       │
//! │         ▼                                ▼               │
//! │  ┌──────────────────────────────────────────────────┐    │
//! │  │ ScenarioResult (checks, boundary hit rate)       │    │
//! │  └──────────────────────────────────────────────────┘    │
//! └──────────────────────────────────────────────────────────┘
//!            │                          │
//!       SimExport (JSON)          render_ascii (terminal)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use edgenet_sim::{ScenarioRunner, scenarios::ScenarioId};
//!
//! let result = ScenarioRunner::new(42)
//!     .with_size(64, 48)
//!     .run(ScenarioId::Bands);
//! assert!(result.passed);
//! ```

mod ascii;
mod error;
mod exporter;
mod runner;
pub mod scenarios;

pub use ascii::render_ascii;
pub use error::SimError;
pub use exporter::{GenerationFrame, SimExport};
pub use runner::{boundary_hit_rate, check_outcome, ScenarioResult, ScenarioRunner};
pub use scenarios::{ScenarioId, ScenarioImage};
