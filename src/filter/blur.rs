//! Box blur via a summed-area table.
//!
//! The table is built once per call in O(W·H). Each output pixel is then one
//! inclusion–exclusion lookup, so cost does not depend on the radius.
//! Windows are clipped at the image edges and divided by the clipped area.

use crate::grid::PixelGrid;
use crate::pixel::{AccumPixel, Pixel, clamp_channel};

/// Radius of the blur window; the full window is `2 * BLUR_RADIUS + 1` square.
pub const BLUR_RADIUS: usize = 20;

#[inline]
fn add(a: AccumPixel, b: AccumPixel) -> AccumPixel {
    AccumPixel::new(a.r + b.r, a.g + b.g, a.b + b.b)
}

#[inline]
fn sub(a: AccumPixel, b: AccumPixel) -> AccumPixel {
    AccumPixel::new(a.r - b.r, a.g - b.g, a.b - b.b)
}

#[inline]
fn widen(p: Pixel) -> AccumPixel {
    AccumPixel::new(i64::from(p.r), i64::from(p.g), i64::from(p.b))
}

/// Inclusive 2D prefix sums: entry `(y, x)` holds the sum of all pixels in
/// rows `0..=y` and columns `0..=x`.
pub(crate) struct SummedAreaTable {
    sums: Vec<AccumPixel>,
    width: usize,
}

impl SummedAreaTable {
    pub(crate) fn build(grid: &PixelGrid) -> Self {
        let width = grid.width();
        let mut sums = vec![AccumPixel::default(); width * grid.height()];
        for (y, row) in grid.rows().enumerate() {
            let mut running = AccumPixel::default();
            for (x, &p) in row.iter().enumerate() {
                running = add(running, widen(p));
                let above = if y > 0 {
                    sums[(y - 1) * width + x]
                } else {
                    AccumPixel::default()
                };
                sums[y * width + x] = add(running, above);
            }
        }
        Self { sums, width }
    }

    #[inline]
    fn at(&self, y: usize, x: usize) -> AccumPixel {
        self.sums[y * self.width + x]
    }

    /// Sum over rows `top..=bottom`, columns `left..=right`. Terms that would
    /// index above or left of the grid are omitted.
    pub(crate) fn window_sum(
        &self,
        top: usize,
        left: usize,
        bottom: usize,
        right: usize,
    ) -> AccumPixel {
        let mut sum = self.at(bottom, right);
        if top > 0 {
            sum = sub(sum, self.at(top - 1, right));
        }
        if left > 0 {
            sum = sub(sum, self.at(bottom, left - 1));
        }
        if top > 0 && left > 0 {
            sum = add(sum, self.at(top - 1, left - 1));
        }
        sum
    }
}

#[inline]
fn rounded_mean(sum: i64, area: i64) -> u8 {
    // Sums are non-negative, so this rounds half up.
    clamp_channel((sum + area / 2) / area)
}

/// Box blur with the default [`BLUR_RADIUS`].
pub fn box_blur(grid: &mut PixelGrid) {
    box_blur_with_radius(grid, BLUR_RADIUS);
}

/// Box blur with an explicit radius. Radius 0 leaves the grid unchanged.
pub fn box_blur_with_radius(grid: &mut PixelGrid, radius: usize) {
    let table = SummedAreaTable::build(grid);
    let (w, h) = (grid.width(), grid.height());

    for y in 0..h {
        let top = y.saturating_sub(radius);
        let bottom = (y + radius).min(h - 1);
        let rows = (bottom - top + 1) as i64;
        let out = grid.row_mut(y);
        for (x, px) in out.iter_mut().enumerate() {
            let left = x.saturating_sub(radius);
            let right = (x + radius).min(w - 1);
            let area = rows * (right - left + 1) as i64;
            let sum = table.window_sum(top, left, bottom, right);
            *px = Pixel::new(
                rounded_mean(sum.r, area),
                rounded_mean(sum.g, area),
                rounded_mean(sum.b, area),
            );
        }
    }
}
