//! Grid traversals used by targeting strategies.
//!
//! - [`RingSearch`]: best-first expansion from a centre, ring by ring
//! - [`LineWalk`]: Bresenham rasterization between two cells
//! - [`select_nearest_in_first_ring`]: ring-buffered closest-to-hint selection

mod line;
mod ring;
mod select;

pub use line::LineWalk;
pub use ring::{Bounds, Ring, RingSearch, Rings, Topology};
pub use select::{TrailingRing, select_nearest_in_first_ring};
