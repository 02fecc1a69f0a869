//! Error types for the edgenet environment abstraction.

use thiserror::Error;

/// Errors that can occur while building an in-memory image.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// Raw buffer length does not match `width * height`
    #[error("Dimension mismatch: {width}x{height} needs {expected} pixels, got {actual}")]
    DimensionMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Image has no pixels
    #[error("Empty image: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
}

impl EnvError {
    /// Creates a dimension mismatch error.
    pub fn mismatch(width: u32, height: u32, actual: usize) -> Self {
        Self::DimensionMismatch {
            width,
            height,
            expected: width as usize * height as usize,
            actual,
        }
    }
}
