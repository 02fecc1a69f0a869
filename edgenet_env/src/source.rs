//! Core environment traits consumed by the net simulation.

use crate::types::Color;

/// Read-only access to a grayscale raster.
///
/// This is the only view of an image the simulation ever gets. The
/// intensity is the single channel the nets react to (the blue channel of
/// a grayscale RGB image, where all three channels are equal).
///
/// # Threading
///
/// Nets may be advanced on several worker threads during one tick, all
/// reading the same source, hence the `Send + Sync` bound.
pub trait PixelSource: Send + Sync {
    /// Image width in pixels.
    fn width(&self) -> u32;

    /// Image height in pixels.
    fn height(&self) -> u32;

    /// Returns the intensity in `[0, 255]` at `(x, y)`.
    ///
    /// Only valid for `0 <= x < width` and `0 <= y < height`; callers
    /// check with [`PixelSource::contains`] first.
    fn intensity_at(&self, x: u32, y: u32) -> u8;

    /// Returns true if the signed coordinate lies inside the image.
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height()
    }
}

/// A surface the results can be painted on.
///
/// Painting happens only after the whole generation loop has finished,
/// and never on the source the simulation is reading.
pub trait DrawSink {
    /// Surface width in pixels.
    fn width(&self) -> u32;

    /// Surface height in pixels.
    fn height(&self) -> u32;

    /// Sets the pixel at `(x, y)` to `color`.
    ///
    /// Coordinates are pre-clipped by the caller.
    fn set_pixel(&mut self, x: u32, y: u32, color: Color);
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn intensity_at(&self, x: u32, y: u32) -> u8 {
        (**self).intensity_at(x, y)
    }
}
