use super::GridCell;

/// Axis-aligned rectangle of cells.
///
/// The rectangle spans `origin.x .. origin.x + width` horizontally and
/// `origin.y .. origin.y + height` vertically, so the last included cell is
/// `origin + (width - 1, height - 1)`. A region with zero width or height
/// contains nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    pub origin: GridCell,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const EMPTY: Self = Self {
        origin: GridCell::ORIGIN,
        width: 0,
        height: 0,
    };

    pub const fn new(origin: GridCell, width: u32, height: u32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Builds a region from two inclusive corner cells.
    ///
    /// An `end` that lies before `start` on either axis yields an empty region.
    pub fn from_corners(start: GridCell, end: GridCell) -> Self {
        let width = (i64::from(end.x) - i64::from(start.x) + 1).max(0) as u32;
        let height = (i64::from(end.y) - i64::from(start.y) + 1).max(0) as u32;
        Self::new(start, width, height)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns true if `cell` lies inside the region.
    #[inline]
    pub fn contains(&self, cell: GridCell) -> bool {
        let dx = i64::from(cell.x) - i64::from(self.origin.x);
        let dy = i64::from(cell.y) - i64::from(self.origin.y);
        dx >= 0 && dy >= 0 && dx < i64::from(self.width) && dy < i64::from(self.height)
    }

    /// Last included cell, or `None` for an empty region.
    pub fn max_cell(&self) -> Option<GridCell> {
        if self.is_empty() {
            return None;
        }
        Some(
            self.origin
                .offset(self.width as i32 - 1, self.height as i32 - 1),
        )
    }

    /// Number of cells in the region.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Iterates every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        let origin = self.origin;
        (0..self.height as i32).flat_map(move |dy| {
            (0..self.width as i32).map(move |dx| origin.offset(dx, dy))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_inclusive() {
        let region = Region::from_corners(GridCell::new(0, 0), GridCell::new(4, 4));
        assert_eq!(region.width, 5);
        assert_eq!(region.height, 5);
        assert!(region.contains(GridCell::new(0, 0)));
        assert!(region.contains(GridCell::new(4, 4)));
        assert!(!region.contains(GridCell::new(5, 4)));
        assert!(!region.contains(GridCell::new(-1, 0)));
        assert_eq!(region.max_cell(), Some(GridCell::new(4, 4)));
    }

    #[test]
    fn inverted_corners_are_empty() {
        let region = Region::from_corners(GridCell::new(3, 3), GridCell::new(2, 8));
        assert!(region.is_empty());
        assert!(!region.contains(GridCell::new(3, 3)));
        assert_eq!(region.max_cell(), None);
        assert_eq!(region.cells().count(), 0);
    }

    #[test]
    fn cells_cover_area() {
        let region = Region::new(GridCell::new(-2, 1), 3, 2);
        let cells: Vec<_> = region.cells().collect();
        assert_eq!(cells.len() as u64, region.area());
        assert_eq!(cells.first(), Some(&GridCell::new(-2, 1)));
        assert_eq!(cells.last(), Some(&GridCell::new(0, 2)));
        assert!(cells.iter().all(|&c| region.contains(c)));
    }
}
