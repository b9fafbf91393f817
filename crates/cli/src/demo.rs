//! Demo strategies and native targeting over a [`TileField`].
//!
//! Each tool gets its own behaviour:
//! - `pickaxe`: nearest ore vein in reach
//! - `torch`: farthest supported cell on the line toward the cursor, stopping at opaque tiles
//! - `seeds`: the cursor cell when plantable, otherwise the nearest plantable ground;
//!   cells next to water are never planted

use std::sync::Arc;

use runtime::CursorRuntime;
use targeting_core::grid::cell_center;
use targeting_core::{
    Baseline, ExecutionPhase, FnStrategy, GridCell, LineStrategy, LookupOutcome, ReachQuery,
    StrategyRegistry, TargetingContext, WorldPos,
};
use targeting_content::{TileField, TileKind};
use tracing::debug;

pub const BUNDLED_CONFIG: &str = include_str!("../data/targeting.toml");
pub const BUNDLED_FIELD: &str = include_str!("../data/field.ron");

/// Agent bounding box, in cells.
const AGENT_WIDTH: f32 = 2.0;
const AGENT_HEIGHT: f32 = 3.0;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Tool {
    Pickaxe,
    Torch,
    Seeds,
}

impl Tool {
    fn places(self) -> bool {
        matches!(self, Tool::Torch | Tool::Seeds)
    }
}

/// Builds the query for an agent whose top-left cell is `anchor`.
pub fn query(anchor: GridCell, hint: GridCell, cell_size: u32) -> ReachQuery {
    let size = cell_size as f32;
    ReachQuery::new(
        WorldPos::new(anchor.x as f32 * size, anchor.y as f32 * size),
        WorldPos::new(AGENT_WIDTH * size, AGENT_HEIGHT * size),
        cell_center(hint, cell_size),
    )
}

fn next_to_water(field: &TileField, cell: GridCell) -> bool {
    [(1, 0), (-1, 0), (0, 1), (0, -1)]
        .iter()
        .any(|&(dx, dy)| field.is(cell.offset(dx, dy), TileKind::Water))
}

fn plantable(field: &TileField, cell: GridCell) -> bool {
    field.is(cell, TileKind::Empty) && field.is(cell.offset(0, 1), TileKind::Solid)
}

pub fn register_strategies(
    runtime: &CursorRuntime<Tool>,
    field: &Arc<TileField>,
) -> runtime::Result<()> {
    let ores = Arc::clone(field);
    runtime.register(
        |tool: &Tool| *tool == Tool::Pickaxe,
        FnStrategy::new("ore_finder", move |_, cell| ores.is(cell, TileKind::Ore))
            .with_group("mining"),
        StrategyRegistry::<Tool>::PRIORITY_NORMAL,
    )?;

    let (walls, sight) = (Arc::clone(field), Arc::clone(field));
    runtime.register(
        |tool: &Tool| *tool == Tool::Torch,
        LineStrategy::new("torch_line", move |_, cell| walls.is_supported(cell))
            .blocked_by(move |_, cell| sight.get(cell).is_some_and(TileKind::is_opaque))
            .with_group("lighting"),
        StrategyRegistry::<Tool>::PRIORITY_NORMAL,
    )?;

    // Never finds a target; it only fences off the shore for everything after it.
    let shore = Arc::clone(field);
    runtime.register(
        |tool: &Tool| *tool == Tool::Seeds,
        FnStrategy::new("water_guard", move |ctx: &mut TargetingContext<Tool>, cell| {
            if next_to_water(&shore, cell) {
                ctx.restrict(cell);
            }
            false
        })
        .with_group("farming"),
        StrategyRegistry::<Tool>::PRIORITY_HIGH,
    )?;

    let soil = Arc::clone(field);
    runtime.register(
        |tool: &Tool| *tool == Tool::Seeds,
        FnStrategy::new("seed_planter", move |ctx: &mut TargetingContext<Tool>, cell| {
            plantable(&soil, cell) && !ctx.is_restricted(cell)
        })
        .with_group("farming")
        .with_phase(ExecutionPhase::PostBaseline),
        StrategyRegistry::<Tool>::PRIORITY_NORMAL,
    )?;

    Ok(())
}

/// Stand-in for the host's own cursor logic: act on the cell under the
/// cursor when the tool can use it.
///
/// Placing tools keep a pending preview of the cell they would place on,
/// which is withdrawn when the dispatcher reverts the result.
pub struct NativeTargeting {
    field: Arc<TileField>,
    pending: Option<GridCell>,
}

impl NativeTargeting {
    pub fn new(field: Arc<TileField>) -> Self {
        Self {
            field,
            pending: None,
        }
    }

    pub fn pending(&self) -> Option<GridCell> {
        self.pending
    }
}

impl Baseline<Tool> for NativeTargeting {
    fn run(&mut self, ctx: &TargetingContext<Tool>) -> Option<GridCell> {
        let hint = ctx.hint_cell();
        if !ctx.reach.contains(hint) {
            return None;
        }

        let usable = match ctx.subject {
            Tool::Pickaxe => self.field.get(hint).is_some_and(TileKind::is_opaque),
            Tool::Torch => self.field.is_supported(hint),
            Tool::Seeds => plantable(&self.field, hint),
        };
        if !usable {
            return None;
        }

        if ctx.subject.places() {
            self.pending = Some(hint);
        }
        Some(hint)
    }

    fn revert(&mut self, cell: GridCell) {
        if self.pending == Some(cell) {
            debug!(%cell, "withdrawing placement preview");
            self.pending = None;
        }
    }
}

/// Runs one lookup for `tool`.
pub fn run(
    runtime: &mut CursorRuntime<Tool>,
    baseline: &mut NativeTargeting,
    tool: Tool,
    anchor: GridCell,
    hint: GridCell,
) -> runtime::Result<LookupOutcome> {
    let query = query(anchor, hint, runtime.config().cell_size);
    runtime.lookup(tool, &query, baseline)
}
