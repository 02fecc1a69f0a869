//! JSON exporter for offline inspection of a run.
//!
//! Exports one frame per generation plus the final nets, so a plotting
//! script can replay how the population converged.

use crate::error::SimError;
use crate::runner::ScenarioResult;
use edgenet_core::{GenerationReport, NetTrace};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;

/// A single generation of simulation data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationFrame {
    /// 1-based generation number
    pub generation: u32,

    /// Nets created (regular + mutated)
    pub created: usize,

    pub mutated: usize,

    /// Population after selection
    pub survivors: usize,

    pub discarded: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_fitness: Option<i32>,
}

impl From<&GenerationReport> for GenerationFrame {
    fn from(report: &GenerationReport) -> Self {
        Self {
            generation: report.generation,
            created: report.created + report.mutated,
            mutated: report.mutated,
            survivors: report.survivors,
            discarded: report.discarded,
            lower_bound: report.lower_bound,
            best_fitness: report.best_fitness,
        }
    }
}

/// Complete simulation export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimExport {
    /// Scenario name
    pub scenario: String,

    /// Seed used
    pub seed: u64,

    pub width: u32,
    pub height: u32,

    /// True boundary rows of the image
    pub boundaries: Vec<u32>,

    /// All frames
    pub frames: Vec<GenerationFrame>,

    /// Surviving nets at the end
    pub nets: Vec<NetTrace>,

    /// Final results
    pub passed: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary_hit_rate: Option<f64>,
}

impl SimExport {
    /// Creates a new export container.
    pub fn new(scenario: &str, seed: u64, width: u32, height: u32) -> Self {
        Self {
            scenario: scenario.to_string(),
            seed,
            width,
            height,
            boundaries: Vec::new(),
            frames: Vec::new(),
            nets: Vec::new(),
            passed: false,
            failure_reason: None,
            boundary_hit_rate: None,
        }
    }

    /// Builds the export of a finished scenario run.
    pub fn from_result(result: &ScenarioResult) -> Self {
        let mut export = Self::new(result.scenario.name(), result.seed, result.width, result.height);
        export.boundaries = result.boundaries.clone();
        for report in &result.reports {
            export.add_frame(GenerationFrame::from(report));
        }
        if let Some(outcome) = &result.outcome {
            export.nets = outcome.nets.clone();
        }
        export.finalize(result.passed, result.failure_reason.clone(), result.boundary_hit_rate);
        export
    }

    /// Adds a frame.
    pub fn add_frame(&mut self, frame: GenerationFrame) {
        self.frames.push(frame);
    }

    /// Finalizes the export.
    pub fn finalize(&mut self, passed: bool, failure_reason: Option<String>, hit_rate: Option<f64>) {
        self.passed = passed;
        self.failure_reason = failure_reason;
        self.boundary_hit_rate = hit_rate;
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: &str) -> Result<(), SimError> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path).map_err(|e| SimError::io(path, e))?;
        file.write_all(json.as_bytes()).map_err(|e| SimError::io(path, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ScenarioRunner;
    use crate::scenarios::ScenarioId;

    #[test]
    fn test_export_has_one_frame_per_generation() {
        let result = ScenarioRunner::new(3)
            .with_size(16, 20)
            .with_generations(4)
            .run(ScenarioId::Step);
        let export = SimExport::from_result(&result);

        assert_eq!(export.scenario, "step");
        assert_eq!((export.width, export.height), (16, 20));
        assert_eq!(export.frames.len(), result.reports.len());
        let generations: Vec<u32> = export.frames.iter().map(|f| f.generation).collect();
        assert_eq!(generations, (1..=export.frames.len() as u32).collect::<Vec<_>>());
        assert_eq!(export.nets.len(), result.survivors);
        assert_eq!(export.boundaries, vec![10]);
    }

    #[test]
    fn test_export_size_comes_from_the_run() {
        // Rejected config: no outcome, but the size is still the runner's
        let config = edgenet_core::EvolutionConfig::default().with_sensitivity(3.0);
        let result = ScenarioRunner::new(3)
            .with_size(12, 9)
            .with_config(config)
            .run(ScenarioId::Bands);
        assert!(result.outcome.is_none());

        let export = SimExport::from_result(&result);
        assert_eq!((export.width, export.height), (12, 9));
        assert!(!export.passed);
        assert!(export.frames.is_empty());
    }

    #[test]
    fn test_export_json_round_trip() {
        let mut export = SimExport::new("bands", 9, 8, 8);
        export.add_frame(GenerationFrame {
            generation: 1,
            created: 2,
            mutated: 0,
            survivors: 0,
            discarded: 2,
            lower_bound: None,
            best_fitness: None,
        });
        export.finalize(true, None, None);

        let json = serde_json::to_string(&export).unwrap();
        assert!(!json.contains("lower_bound"));
        assert!(!json.contains("failure_reason"));
        let parsed: SimExport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, export);
    }

    #[test]
    fn test_write_to_missing_directory_reports_path() {
        let export = SimExport::new("bands", 1, 4, 4);
        let err = export.write_to_file("/nonexistent-dir/edgenet/out.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent-dir/edgenet/out.json"));
    }
}
