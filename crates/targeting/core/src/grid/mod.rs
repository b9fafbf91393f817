//! Grid primitives: cells, world positions, regions, and distance metrics.

mod cell;
pub mod geometry;
mod region;

pub use cell::{GridCell, WorldPos};
pub use geometry::{
    CELL_SIZE, cell_center, chebyshev, euclidean, euclidean_sq, manhattan, world_to_cell,
};
pub use region::Region;
