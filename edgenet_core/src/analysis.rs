//! Global image heuristics used to seed net resistance.

use edgenet_env::PixelSource;
use serde::{Deserialize, Serialize};

/// Smallest and largest absolute difference between vertically adjacent
/// pixels over the whole image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntensityRange {
    pub min: i32,
    pub max: i32,
}

/// Scans every vertical pixel pair.
///
/// Images with fewer than two rows have no pairs and yield `0..=0`.
pub fn vertical_difference_range<S: PixelSource + ?Sized>(source: &S) -> IntensityRange {
    if source.height() < 2 || source.width() == 0 {
        return IntensityRange { min: 0, max: 0 };
    }
    let (mut min, mut max) = (255, 0);
    for y in 1..source.height() {
        for x in 0..source.width() {
            let above = source.intensity_at(x, y - 1) as i32;
            let here = source.intensity_at(x, y) as i32;
            let difference = (above - here).abs();
            min = min.min(difference);
            max = max.max(difference);
        }
    }
    IntensityRange { min, max }
}

/// Resistance interval regular (non-mutated) nets draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResistanceBand {
    pub lower: i32,
    pub upper: i32,
}

impl ResistanceBand {
    /// Band used by mutated nets: any resistance a pixel pair can exceed.
    pub const MUTATION: ResistanceBand = ResistanceBand { lower: 1, upper: 255 };

    /// Narrows the measured range towards its maximum.
    ///
    /// The upper bound is one past the largest difference. With
    /// `sensitivity = 1` the band spans the whole measured range; with
    /// `sensitivity = 0` it collapses onto the upper bound.
    pub fn from_range(range: IntensityRange, sensitivity: f64) -> Self {
        let upper = range.max + 1;
        let lower = range.min + ((upper - range.min) as f64 * (1.0 - sensitivity)) as i32;
        Self { lower, upper }
    }
}
