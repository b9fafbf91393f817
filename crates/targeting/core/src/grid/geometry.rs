//! Pure coordinate conversions and grid distance metrics.

use super::{GridCell, WorldPos};

/// World units per cell used by hosts that do not override it.
pub const CELL_SIZE: u32 = 16;

/// Converts a world position to the cell containing it (floor division).
pub fn world_to_cell(pos: WorldPos, cell_size: u32) -> GridCell {
    let size = cell_size as f32;
    GridCell::new((pos.x / size).floor() as i32, (pos.y / size).floor() as i32)
}

/// World position of the centre of `cell`.
pub fn cell_center(cell: GridCell, cell_size: u32) -> WorldPos {
    let size = cell_size as f32;
    WorldPos::new(
        cell.x as f32 * size + size / 2.0,
        cell.y as f32 * size + size / 2.0,
    )
}

/// Chebyshev (king-move) distance: `max(|dx|, |dy|)`.
#[inline]
pub fn chebyshev(a: GridCell, b: GridCell) -> u32 {
    a.x.abs_diff(b.x).max(a.y.abs_diff(b.y))
}

/// Manhattan (rook-step) distance: `|dx| + |dy|`.
#[inline]
pub fn manhattan(a: GridCell, b: GridCell) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Squared Euclidean distance, exact in integers.
#[inline]
pub fn euclidean_sq(a: GridCell, b: GridCell) -> u64 {
    let dx = u64::from(a.x.abs_diff(b.x));
    let dy = u64::from(a.y.abs_diff(b.y));
    dx * dx + dy * dy
}

#[inline]
pub fn euclidean(a: GridCell, b: GridCell) -> f32 {
    (euclidean_sq(a, b) as f32).sqrt()
}
