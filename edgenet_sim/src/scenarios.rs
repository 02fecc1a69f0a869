//! Synthetic test images with known band boundaries.

use edgenet_env::GrayImage;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Intensities of the four horizontal bands, top to bottom.
const BAND_LEVELS: [u8; 4] = [30, 200, 90, 240];

/// Half-width of the noise added by `NoisyBands`.
const NOISE_AMPLITUDE: i32 = 12;

/// Scenario identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioId {
    /// Four flat horizontal bands, three sharp boundaries
    Bands,

    /// Dark top half, bright bottom half
    Step,

    /// One flat intensity, no boundary at all
    Uniform,

    /// Smooth top-to-bottom ramp, no sharp boundary
    Gradient,

    /// `Bands` with seeded per-pixel noise
    NoisyBands,
}

/// A scenario image together with the rows where a new band starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioImage {
    pub image: GrayImage,

    /// First row of every band except the topmost, ascending
    pub boundaries: Vec<u32>,
}

impl ScenarioId {
    /// Returns a list of all scenarios.
    pub fn all() -> Vec<ScenarioId> {
        vec![
            ScenarioId::Bands,
            ScenarioId::Step,
            ScenarioId::Uniform,
            ScenarioId::Gradient,
            ScenarioId::NoisyBands,
        ]
    }

    /// Returns the scenario name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::Bands => "bands",
            ScenarioId::Step => "step",
            ScenarioId::Uniform => "uniform",
            ScenarioId::Gradient => "gradient",
            ScenarioId::NoisyBands => "noisy_bands",
        }
    }

    /// Returns a description of the scenario.
    pub fn description(&self) -> &'static str {
        match self {
            ScenarioId::Bands => "Four flat bands; nets should settle on the three boundaries",
            ScenarioId::Step => "Single dark/bright boundary at mid-height",
            ScenarioId::Uniform => "Flat image; every net should crawl out and die",
            ScenarioId::Gradient => "Smooth ramp; no difference stands out as an edge",
            ScenarioId::NoisyBands => "Four bands under +/-12 noise; edges must beat the noise",
        }
    }

    /// Returns true if the image has boundaries nets are expected to find.
    pub fn has_boundaries(&self) -> bool {
        matches!(self, ScenarioId::Bands | ScenarioId::Step | ScenarioId::NoisyBands)
    }

    /// Builds the scenario image. `seed` only matters for noisy scenarios.
    pub fn image(&self, width: u32, height: u32, seed: u64) -> ScenarioImage {
        match self {
            ScenarioId::Bands => banded(width, height, &BAND_LEVELS),
            ScenarioId::Step => banded(width, height, &[40, 210]),
            ScenarioId::Uniform => ScenarioImage {
                image: GrayImage::filled(width, height, 128),
                boundaries: Vec::new(),
            },
            ScenarioId::Gradient => {
                let span = height.saturating_sub(1).max(1);
                ScenarioImage {
                    image: GrayImage::from_fn(width, height, |_, y| (y * 255 / span) as u8),
                    boundaries: Vec::new(),
                }
            }
            ScenarioId::NoisyBands => {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let clean = banded(width, height, &BAND_LEVELS);
                let image = GrayImage::from_fn(width, height, |x, y| {
                    let base = clean.image.row(y)[x as usize] as i32;
                    let noise = rng.gen_range(-NOISE_AMPLITUDE..=NOISE_AMPLITUDE);
                    (base + noise).clamp(0, 255) as u8
                });
                ScenarioImage {
                    image,
                    boundaries: clean.boundaries,
                }
            }
        }
    }
}

/// Splits the height into `levels.len()` equal bands.
fn banded(width: u32, height: u32, levels: &[u8]) -> ScenarioImage {
    let count = levels.len() as u64;
    let band_of = |y: u32| (y as u64 * count / height.max(1) as u64) as usize;
    let image = GrayImage::from_fn(width, height, |_, y| levels[band_of(y)]);
    let boundaries = (1..height)
        .filter(|&y| band_of(y) != band_of(y - 1))
        .collect();
    ScenarioImage { image, boundaries }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ScenarioId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bands" => Ok(ScenarioId::Bands),
            "step" => Ok(ScenarioId::Step),
            "uniform" | "flat" => Ok(ScenarioId::Uniform),
            "gradient" | "ramp" => Ok(ScenarioId::Gradient),
            "noisy_bands" | "noisybands" | "noisy" => Ok(ScenarioId::NoisyBands),
            _ => Err(format!("Unknown scenario: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgenet_env::PixelSource;

    #[test]
    fn test_names_round_trip() {
        for scenario in ScenarioId::all() {
            assert_eq!(scenario.name().parse::<ScenarioId>(), Ok(scenario));
        }
        assert!("split_brain".parse::<ScenarioId>().is_err());
    }

    #[test]
    fn test_bands_boundaries() {
        let scenario = ScenarioId::Bands.image(8, 48, 0);
        assert_eq!(scenario.boundaries, vec![12, 24, 36]);
        assert_eq!(scenario.image.intensity_at(3, 11), 30);
        assert_eq!(scenario.image.intensity_at(3, 12), 200);
        assert_eq!(scenario.image.intensity_at(3, 47), 240);
    }

    #[test]
    fn test_uneven_height_still_has_three_boundaries() {
        let scenario = ScenarioId::Bands.image(4, 10, 0);
        assert_eq!(scenario.boundaries, vec![3, 5, 8]);
    }

    #[test]
    fn test_step_boundary() {
        let scenario = ScenarioId::Step.image(4, 20, 0);
        assert_eq!(scenario.boundaries, vec![10]);
    }

    #[test]
    fn test_flat_scenarios_have_no_boundaries() {
        assert!(ScenarioId::Uniform.image(4, 20, 0).boundaries.is_empty());
        let gradient = ScenarioId::Gradient.image(4, 20, 0);
        assert!(gradient.boundaries.is_empty());
        assert_eq!(gradient.image.intensity_at(0, 0), 0);
        assert_eq!(gradient.image.intensity_at(0, 19), 255);
    }

    #[test]
    fn test_noise_is_seeded() {
        let a = ScenarioId::NoisyBands.image(16, 16, 7);
        let b = ScenarioId::NoisyBands.image(16, 16, 7);
        let c = ScenarioId::NoisyBands.image(16, 16, 8);
        assert_eq!(a, b);
        assert_ne!(a.image, c.image);
        assert_eq!(a.boundaries, vec![4, 8, 12]);
    }
}
