//! Integer line rasterization between two cells.

use crate::grid::{GridCell, chebyshev};

/// Bresenham walk from `start` to `end`, both inclusive.
///
/// Each step moves at most one cell on each axis, so consecutive cells are
/// 8-connected. The walk performs no bounds checking.
#[derive(Clone, Debug)]
pub struct LineWalk {
    x: i32,
    y: i32,
    end: GridCell,
    dx: i64,
    dy: i64,
    sx: i32,
    sy: i32,
    err: i64,
    finished: bool,
}

impl LineWalk {
    pub fn new(start: GridCell, end: GridCell) -> Self {
        let dx = i64::from(start.x.abs_diff(end.x));
        let dy = i64::from(start.y.abs_diff(end.y));
        Self {
            x: start.x,
            y: start.y,
            end,
            dx,
            dy,
            sx: if start.x < end.x { 1 } else { -1 },
            sy: if start.y < end.y { 1 } else { -1 },
            err: dx - dy,
            finished: false,
        }
    }

    pub fn end(&self) -> GridCell {
        self.end
    }
}

impl Iterator for LineWalk {
    type Item = GridCell;

    fn next(&mut self) -> Option<GridCell> {
        if self.finished {
            return None;
        }

        let current = GridCell::new(self.x, self.y);
        if current == self.end {
            self.finished = true;
            return Some(current);
        }

        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for LineWalk {
    fn len(&self) -> usize {
        if self.finished {
            0
        } else {
            chebyshev(GridCell::new(self.x, self.y), self.end) as usize + 1
        }
    }
}

impl std::iter::FusedIterator for LineWalk {}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(a: (i32, i32), b: (i32, i32)) -> Vec<GridCell> {
        LineWalk::new(a.into(), b.into()).collect()
    }

    #[test]
    fn degenerate_line_is_single_cell() {
        assert_eq!(walk((3, -2), (3, -2)), vec![GridCell::new(3, -2)]);
    }

    #[test]
    fn horizontal_and_vertical_lines() {
        assert_eq!(
            walk((0, 0), (3, 0)),
            vec![(0, 0).into(), (1, 0).into(), (2, 0).into(), (3, 0).into()]
        );
        assert_eq!(
            walk((0, 2), (0, 0)),
            vec![(0, 2).into(), (0, 1).into(), (0, 0).into()]
        );
    }

    #[test]
    fn shallow_slope_matches_bresenham() {
        assert_eq!(
            walk((0, 0), (4, 2)),
            vec![
                GridCell::new(0, 0),
                GridCell::new(1, 0),
                GridCell::new(2, 1),
                GridCell::new(3, 1),
                GridCell::new(4, 2),
            ]
        );
    }

    #[test]
    fn diagonal_moves_both_axes() {
        assert_eq!(
            walk((2, 2), (-1, -1)),
            vec![(2, 2).into(), (1, 1).into(), (0, 0).into(), (-1, -1).into()]
        );
    }

    #[test]
    fn length_is_known_up_front() {
        for end in [(7, 3), (-5, 9), (0, -4), (6, 6), (1, -8)] {
            let line = LineWalk::new(GridCell::ORIGIN, end.into());
            let expected = line.len();
            assert_eq!(line.count(), expected);
        }
    }
}
