//! edgenet Environment Abstraction Layer
//!
//! This crate provides the "Sans-IO" boundary between the net simulation
//! and whatever actually holds the pixels. The engine never decodes,
//! encodes or displays an image; it only needs:
//! - A read-only grayscale **pixel source** (`width`, `height`, `intensity_at`)
//! - A **drawing sink** that can set a pixel color at a coordinate
//!
//! Decoders, renderers and windows live outside the core and adapt their
//! buffers to these two traits.
//!
//! # Example
//!
//! ```ignore
//! use edgenet_env::{GrayImage, PixelSource};
//!
//! let image = GrayImage::from_fn(64, 64, |_, y| if y < 32 { 20 } else { 220 });
//! assert_eq!(image.intensity_at(0, 40), 220);
//! ```

mod source;
mod types;
mod error;
mod buffer;

pub use source::{PixelSource, DrawSink};
pub use types::{Coordinate, Color};
pub use error::EnvError;
pub use buffer::GrayImage;
