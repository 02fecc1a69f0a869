//! In-memory grayscale raster implementing both environment traits.

use crate::{Color, DrawSink, EnvError, PixelSource};

/// Row-major 8-bit grayscale image.
///
/// This is the "real" implementation used by the simulation harness and
/// tests. Anything that decodes files adapts into this (or implements
/// [`PixelSource`] directly).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl GrayImage {
    /// Creates an image filled with a single intensity.
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![value; width as usize * height as usize],
        }
    }

    /// Creates an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> u8,
    {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self { width, height, pixels }
    }

    /// Wraps a raw row-major buffer.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, EnvError> {
        if width == 0 || height == 0 {
            return Err(EnvError::EmptyImage { width, height });
        }
        if pixels.len() != width as usize * height as usize {
            return Err(EnvError::mismatch(width, height, pixels.len()));
        }
        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the raw row-major pixels.
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns one row of pixels.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl PixelSource for GrayImage {
    fn width(&self) -> u32 {
        GrayImage::width(self)
    }

    fn height(&self) -> u32 {
        GrayImage::height(self)
    }

    fn intensity_at(&self, x: u32, y: u32) -> u8 {
        self.pixels[self.index(x, y)]
    }
}

impl DrawSink for GrayImage {
    fn width(&self) -> u32 {
        GrayImage::width(self)
    }

    fn height(&self) -> u32 {
        GrayImage::height(self)
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color.luma();
    }
}
