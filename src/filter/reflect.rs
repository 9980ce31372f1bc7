use crate::grid::PixelGrid;

/// Mirror each row horizontally: column `c` swaps with `width - 1 - c`.
pub fn reflect(grid: &mut PixelGrid) {
    let mut tmp = Vec::with_capacity(grid.width());
    for y in 0..grid.height() {
        let row = grid.row_mut(y);
        tmp.clear();
        tmp.extend(row.iter().rev().copied());
        row.copy_from_slice(&tmp);
    }
}
