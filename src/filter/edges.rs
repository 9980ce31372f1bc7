//! Sobel edge detection.
//!
//! The image is copied into a grid with a one-pixel black border, converted to
//! grayscale, and convolved with the 3×3 Sobel pair. Border pixels therefore
//! see zero-valued neighbours rather than clamped or wrapped ones.

use super::color::grayscale;
use crate::grid::PixelGrid;
use crate::pixel::Pixel;

type Kernel3 = [[i32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Copy `grid` into the centre of a grid two pixels larger in each direction.
fn zero_padded(grid: &PixelGrid) -> PixelGrid {
    let mut padded = PixelGrid::new(grid.width() + 2, grid.height() + 2);
    for (y, row) in grid.rows().enumerate() {
        padded.row_mut(y + 1)[1..=grid.width()].copy_from_slice(row);
    }
    padded
}

/// Replace every pixel with its clamped Sobel gradient magnitude, written to
/// all three channels.
pub fn sobel_edges(grid: &mut PixelGrid) {
    let mut padded = zero_padded(grid);
    grayscale(&mut padded);

    for y in 0..grid.height() {
        // Padded rows y, y+1, y+2 are the 3x3 neighbourhood of output row y.
        let rows = [padded.row(y), padded.row(y + 1), padded.row(y + 2)];
        let out = grid.row_mut(y);
        for (x, px) in out.iter_mut().enumerate() {
            let mut gx = 0i32;
            let mut gy = 0i32;
            for (ky, row) in rows.iter().enumerate() {
                for kx in 0..3 {
                    // After grayscale every channel holds the same intensity.
                    let v = i32::from(row[x + kx].r);
                    gx += SOBEL_KERNEL_X[ky][kx] * v;
                    gy += SOBEL_KERNEL_Y[ky][kx] * v;
                }
            }
            let mag = f64::from(gx * gx + gy * gy).sqrt().round().min(255.0) as u8;
            *px = Pixel::new(mag, mag, mag);
        }
    }
}
