//! Per-lookup snapshot handed to strategies.

use std::collections::HashSet;

use crate::config::TargetingConfig;
use crate::grid::{GridCell, Region, WorldPos, world_to_cell};
use crate::search::TrailingRing;

/// Raw inputs for one lookup, as supplied by the host.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReachQuery {
    /// Top-left corner of the subject's bounding box, in world units.
    pub position: WorldPos,
    /// Width and height of the subject's bounding box, in world units.
    pub extent: WorldPos,
    /// Extra reach granted by the selected tool, in cells.
    pub tool_boost: i32,
    /// Cursor position used to break ties between equally near cells.
    pub hint: WorldPos,
}

impl ReachQuery {
    pub fn new(position: WorldPos, extent: WorldPos, hint: WorldPos) -> Self {
        Self {
            position,
            extent,
            tool_boost: 0,
            hint,
        }
    }

    pub fn with_tool_boost(mut self, tool_boost: i32) -> Self {
        self.tool_boost = tool_boost;
        self
    }

    /// Centre of the subject's bounding box.
    pub fn center(&self) -> WorldPos {
        WorldPos::new(
            self.position.x + self.extent.x / 2.0,
            self.position.y + self.extent.y / 2.0,
        )
    }

    /// Computes the rectangle of cells the subject can reach.
    ///
    /// The trailing edge is one cell shorter on y than on x. Every corner is
    /// clamped to `[margin, world_size - margin]` on its axis.
    pub fn reach(&self, config: &TargetingConfig) -> Region {
        let cell = config.cell_size.max(1) as f32;
        let reach_x = config.range_x.saturating_add(self.tool_boost);
        let reach_y = config.range_y.saturating_add(self.tool_boost);
        // Float-to-int casts saturate, so extreme positions stay finite.
        let floor = |v: f32| (v / cell).floor() as i32;

        let x1 = floor(self.position.x).saturating_sub(reach_x).saturating_add(1);
        let x2 = floor(self.position.x + self.extent.x)
            .saturating_add(reach_x)
            .saturating_sub(1);
        let y1 = floor(self.position.y).saturating_sub(reach_y).saturating_add(1);
        let y2 = floor(self.position.y + self.extent.y)
            .saturating_add(reach_y)
            .saturating_sub(2);

        let margin = config.world_margin;
        let upper = |size: i32| size.saturating_sub(margin).max(margin);
        let clamp_x = |v: i32| v.clamp(margin, upper(config.world_width));
        let clamp_y = |v: i32| v.clamp(margin, upper(config.world_height));

        Region::from_corners(
            GridCell::new(clamp_x(x1), clamp_y(y1)),
            GridCell::new(clamp_x(x2), clamp_y(y2)),
        )
    }
}

/// Snapshot of a single lookup.
///
/// Built once per lookup and dropped when it finishes. The restriction set
/// starts empty; strategies may add cells to it while validating, and any
/// restricted cell is refused as a result for the rest of the lookup.
#[derive(Clone, Debug)]
pub struct TargetingContext<S> {
    /// The thing the lookup is for (typically the held tool).
    pub subject: S,
    /// Centre of the acting agent, in world units.
    pub anchor: WorldPos,
    /// Cursor position, in world units.
    pub hint: WorldPos,
    /// Cells the agent can reach.
    pub reach: Region,
    pub cell_size: u32,
    pub trailing_ring: TrailingRing,
    restricted: HashSet<GridCell>,
}

impl<S> TargetingContext<S> {
    pub fn new(subject: S, anchor: WorldPos, hint: WorldPos, reach: Region) -> Self {
        Self {
            subject,
            anchor,
            hint,
            reach,
            cell_size: crate::grid::CELL_SIZE,
            trailing_ring: TrailingRing::default(),
            restricted: HashSet::new(),
        }
    }

    /// Builds the context for `query` using the reach rules in `config`.
    pub fn from_query(subject: S, query: &ReachQuery, config: &TargetingConfig) -> Self {
        Self {
            subject,
            anchor: query.center(),
            hint: query.hint,
            reach: query.reach(config),
            cell_size: config.cell_size.max(1),
            trailing_ring: config.trailing_ring,
            restricted: HashSet::new(),
        }
    }

    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size.max(1);
        self
    }

    pub fn with_trailing_ring(mut self, trailing_ring: TrailingRing) -> Self {
        self.trailing_ring = trailing_ring;
        self
    }

    pub fn anchor_cell(&self) -> GridCell {
        world_to_cell(self.anchor, self.cell_size)
    }

    pub fn hint_cell(&self) -> GridCell {
        world_to_cell(self.hint, self.cell_size)
    }

    /// Vetoes `cell` for the rest of this lookup. Returns false if it was
    /// already restricted.
    pub fn restrict(&mut self, cell: GridCell) -> bool {
        self.restricted.insert(cell)
    }

    pub fn is_restricted(&self, cell: GridCell) -> bool {
        self.restricted.contains(&cell)
    }

    pub fn restricted(&self) -> &HashSet<GridCell> {
        &self.restricted
    }
}
