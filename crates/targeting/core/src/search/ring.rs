//! Expanding-ring best-first traversal over a bounded grid.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::iter::Peekable;

use crate::grid::{GridCell, Region, chebyshev, euclidean_sq, manhattan};

/// Neighbour topology used when expanding the frontier.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Topology {
    /// 4-neighbour adjacency; rings are Manhattan diamonds.
    Orthogonal,
    /// 8-neighbour adjacency; rings are Chebyshev squares.
    #[default]
    Diagonal,
}

const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

impl Topology {
    pub fn neighbor_offsets(self) -> &'static [(i32, i32)] {
        match self {
            Topology::Orthogonal => &ORTHOGONAL,
            Topology::Diagonal => &DIAGONAL,
        }
    }

    /// Ring index of `cell` around `center` under this topology.
    pub fn ring_distance(self, center: GridCell, cell: GridCell) -> u32 {
        match self {
            Topology::Orthogonal => manhattan(center, cell),
            Topology::Diagonal => chebyshev(center, cell),
        }
    }
}

/// Containment test restricting which cells a search may visit.
pub trait Bounds {
    fn contains(&self, cell: GridCell) -> bool;
}

impl Bounds for Region {
    fn contains(&self, cell: GridCell) -> bool {
        Region::contains(self, cell)
    }
}

impl<F> Bounds for F
where
    F: Fn(GridCell) -> bool,
{
    fn contains(&self, cell: GridCell) -> bool {
        self(cell)
    }
}

/// Frontier key: ring, then squared distance from the centre, then enqueue order.
type FrontierKey = (u32, u64, u64, GridCell);

/// Lazy, finite traversal that emits cells ring by ring outward from a centre.
///
/// Cells are dequeued from a min-priority frontier keyed by ring distance and
/// then by Euclidean distance from the centre. With rectangular [`Region`]
/// bounds the ring index of emitted cells never decreases. Predicate bounds
/// that are not convex carry no such guarantee: a cell reachable only around
/// a gap is discovered late and may follow cells of a farther ring.
///
/// Each in-bounds cell reachable from the centre is emitted exactly once. An
/// out-of-bounds centre produces an empty sequence.
#[derive(Debug)]
pub struct RingSearch<B> {
    center: GridCell,
    bounds: B,
    topology: Topology,
    frontier: BinaryHeap<Reverse<FrontierKey>>,
    visited: HashSet<GridCell>,
    sequence: u64,
}

impl<B: Bounds> RingSearch<B> {
    pub fn new(center: GridCell, bounds: B, topology: Topology) -> Self {
        let mut search = Self {
            center,
            bounds,
            topology,
            frontier: BinaryHeap::new(),
            visited: HashSet::new(),
            sequence: 0,
        };
        if search.bounds.contains(center) {
            search.visited.insert(center);
            search.enqueue(center);
        }
        search
    }

    pub fn center(&self) -> GridCell {
        self.center
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Number of cells enqueued so far (emitted plus pending).
    pub fn discovered(&self) -> usize {
        self.visited.len()
    }

    /// Groups the remaining cells into whole rings.
    pub fn rings(self) -> Rings<B> {
        Rings {
            center: self.center,
            topology: self.topology,
            cells: self.peekable(),
        }
    }

    fn enqueue(&mut self, cell: GridCell) {
        let key = (
            self.topology.ring_distance(self.center, cell),
            euclidean_sq(self.center, cell),
            self.sequence,
            cell,
        );
        self.sequence += 1;
        self.frontier.push(Reverse(key));
    }
}

impl<B: Bounds> Iterator for RingSearch<B> {
    type Item = GridCell;

    fn next(&mut self) -> Option<GridCell> {
        let Reverse((_, _, _, current)) = self.frontier.pop()?;

        for &(dx, dy) in self.topology.neighbor_offsets() {
            let Some(neighbor) = current.checked_offset(dx, dy) else {
                continue;
            };
            if self.bounds.contains(neighbor) && self.visited.insert(neighbor) {
                self.enqueue(neighbor);
            }
        }

        Some(current)
    }
}

impl<B: Bounds> std::iter::FusedIterator for RingSearch<B> {}

/// All cells of one ring, in emission order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ring {
    pub distance: u32,
    pub cells: Vec<GridCell>,
}

/// Adapter produced by [`RingSearch::rings`].
pub struct Rings<B: Bounds> {
    center: GridCell,
    topology: Topology,
    cells: Peekable<RingSearch<B>>,
}

impl<B: Bounds> Iterator for Rings<B> {
    type Item = Ring;

    fn next(&mut self) -> Option<Ring> {
        let first = self.cells.next()?;
        let distance = self.topology.ring_distance(self.center, first);
        let mut cells = vec![first];
        while let Some(&cell) = self.cells.peek() {
            if self.topology.ring_distance(self.center, cell) != distance {
                break;
            }
            cells.push(cell);
            self.cells.next();
        }
        Some(Ring { distance, cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: i32, max: i32) -> Region {
        Region::from_corners(GridCell::new(min, min), GridCell::new(max, max))
    }

    #[test]
    fn center_is_emitted_first() {
        let mut search = RingSearch::new(GridCell::new(2, 2), square(0, 4), Topology::Diagonal);
        assert_eq!(search.next(), Some(GridCell::new(2, 2)));
    }

    #[test]
    fn out_of_bounds_center_is_empty() {
        let search = RingSearch::new(GridCell::new(9, 9), square(0, 4), Topology::Diagonal);
        assert_eq!(search.count(), 0);
    }

    #[test]
    fn empty_region_is_empty() {
        let search = RingSearch::new(GridCell::ORIGIN, Region::EMPTY, Topology::Orthogonal);
        assert_eq!(search.count(), 0);
    }

    #[test]
    fn first_ring_is_the_eight_neighbours_orthogonals_first() {
        let center = GridCell::new(5, 5);
        let mut rings = RingSearch::new(center, square(0, 10), Topology::Diagonal).rings();

        let ring0 = rings.next().unwrap();
        assert_eq!(ring0.distance, 0);
        assert_eq!(ring0.cells, vec![center]);

        let ring1 = rings.next().unwrap();
        assert_eq!(ring1.distance, 1);
        assert_eq!(ring1.cells.len(), 8);
        // Orthogonal neighbours are nearer than diagonals.
        assert!(ring1.cells[..4].iter().all(|c| euclidean_sq(center, *c) == 1));
        assert!(ring1.cells[4..].iter().all(|c| euclidean_sq(center, *c) == 2));
    }

    #[test]
    fn predicate_bounds_limit_traversal() {
        let search = RingSearch::new(
            GridCell::ORIGIN,
            |c: GridCell| c.y == 0 && (-3..=3).contains(&c.x),
            Topology::Diagonal,
        );
        let mut cells: Vec<_> = search.collect();
        assert_eq!(cells.len(), 7);
        cells.sort();
        assert_eq!(cells.first(), Some(&GridCell::new(-3, 0)));
        assert_eq!(cells.last(), Some(&GridCell::new(3, 0)));
    }

    #[test]
    fn orthogonal_topology_emits_manhattan_rings() {
        let center = GridCell::new(2, 2);
        let search = RingSearch::new(center, square(0, 4), Topology::Orthogonal);
        let mut last = 0;
        let mut seen = 0;
        for cell in search {
            let d = manhattan(center, cell);
            assert!(d >= last);
            last = d;
            seen += 1;
        }
        assert_eq!(seen, 25);
    }

    #[test]
    fn detour_through_predicate_bounds_can_move_inward() {
        // An arch over a gap: (2, 0) is only reachable through ring 3.
        let arch = [(0, 0), (0, 1), (0, 2), (1, 3), (2, 3), (3, 2), (3, 1), (2, 0)]
            .map(GridCell::from);
        let order: Vec<_> = RingSearch::new(
            GridCell::ORIGIN,
            |cell: GridCell| arch.contains(&cell),
            Topology::Diagonal,
        )
        .collect();

        assert_eq!(order.len(), arch.len());
        assert_eq!(order[6..], [GridCell::new(3, 1), GridCell::new(2, 0)]);
    }

    #[test]
    fn traversal_is_deterministic() {
        let run = || {
            RingSearch::new(GridCell::new(1, 3), square(0, 6), Topology::Diagonal)
                .collect::<Vec<_>>()
        };
        let (a, b) = (run(), run());
        assert_eq!(a, b);
    }
}
