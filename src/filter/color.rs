//! Per-pixel color transforms.

use crate::grid::PixelGrid;
use crate::pixel::Pixel;

/// Replace every pixel with the truncated mean of its channels.
pub fn grayscale(grid: &mut PixelGrid) {
    for p in grid.pixels_mut() {
        let avg = ((u16::from(p.r) + u16::from(p.g) + u16::from(p.b)) / 3) as u8;
        *p = Pixel::new(avg, avg, avg);
    }
}

#[inline]
fn sepia_channel(r: f64, g: f64, b: f64, kr: f64, kg: f64, kb: f64) -> u8 {
    // Inputs and weights are non-negative, only the top needs clamping.
    (kr * r + kg * g + kb * b).round().min(255.0) as u8
}

/// Classic sepia tone: fixed linear mix of the original channels, rounded and
/// clamped to 255.
pub fn sepia(grid: &mut PixelGrid) {
    for p in grid.pixels_mut() {
        let (r, g, b) = (f64::from(p.r), f64::from(p.g), f64::from(p.b));
        *p = Pixel::new(
            sepia_channel(r, g, b, 0.393, 0.769, 0.189),
            sepia_channel(r, g, b, 0.349, 0.686, 0.168),
            sepia_channel(r, g, b, 0.272, 0.534, 0.131),
        );
    }
}
