//! Closure-backed strategies for hosts that don't need a dedicated type.

use tracing::trace;

use super::{ExecutionPhase, TargetStrategy};
use crate::context::TargetingContext;
use crate::grid::GridCell;
use crate::search::LineWalk;

type CellValidator<S> = Box<dyn Fn(&mut TargetingContext<S>, GridCell) -> bool + Send + Sync>;
type CellTest<S> = Box<dyn Fn(&TargetingContext<S>, GridCell) -> bool + Send + Sync>;

/// Strategy whose validity test is a closure; uses the default ring search.
///
/// ```rust,ignore
/// let torches = FnStrategy::new("torch_walls", |ctx, cell| field.is_wall(cell))
///     .with_group("lighting");
/// registry.register(|tool: &Tool| tool.is_torch(), torches, StrategyRegistry::PRIORITY_NORMAL);
/// ```
pub struct FnStrategy<S> {
    name: String,
    group: String,
    phase: ExecutionPhase,
    validator: CellValidator<S>,
}

impl<S> FnStrategy<S> {
    pub fn new<F>(name: impl Into<String>, validator: F) -> Self
    where
        F: Fn(&mut TargetingContext<S>, GridCell) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            group: "unknown".to_owned(),
            phase: ExecutionPhase::PreBaseline,
            validator: Box::new(validator),
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn with_phase(mut self, phase: ExecutionPhase) -> Self {
        self.phase = phase;
        self
    }
}

impl<S> TargetStrategy<S> for FnStrategy<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn group(&self) -> &str {
        &self.group
    }

    fn phase(&self) -> ExecutionPhase {
        self.phase
    }

    fn is_cell_valid(&self, ctx: &mut TargetingContext<S>, cell: GridCell) -> bool {
        (self.validator)(ctx, cell)
    }
}

/// Strategy that walks a straight line from the agent toward the cursor.
///
/// The walk stops at the first cell that leaves the reachable region or that
/// the blocking test rejects (line-of-sight style). The farthest valid cell
/// seen before stopping is the target.
pub struct LineStrategy<S> {
    name: String,
    group: String,
    phase: ExecutionPhase,
    target: CellValidator<S>,
    blocks: CellTest<S>,
}

impl<S> LineStrategy<S> {
    /// Creates a line strategy with nothing blocking the line.
    pub fn new<F>(name: impl Into<String>, target: F) -> Self
    where
        F: Fn(&mut TargetingContext<S>, GridCell) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            group: "unknown".to_owned(),
            phase: ExecutionPhase::PreBaseline,
            target: Box::new(target),
            blocks: Box::new(|_, _| false),
        }
    }

    /// Stops the walk at cells for which `blocks` returns true.
    pub fn blocked_by<F>(mut self, blocks: F) -> Self
    where
        F: Fn(&TargetingContext<S>, GridCell) -> bool + Send + Sync + 'static,
    {
        self.blocks = Box::new(blocks);
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn with_phase(mut self, phase: ExecutionPhase) -> Self {
        self.phase = phase;
        self
    }
}

impl<S> TargetStrategy<S> for LineStrategy<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn group(&self) -> &str {
        &self.group
    }

    fn phase(&self) -> ExecutionPhase {
        self.phase
    }

    fn is_cell_valid(&self, ctx: &mut TargetingContext<S>, cell: GridCell) -> bool {
        (self.target)(ctx, cell)
    }

    fn find_target(&self, ctx: &mut TargetingContext<S>) -> Option<GridCell> {
        let start = ctx.anchor_cell();
        let end = ctx.hint_cell();
        let mut farthest = None;

        for cell in LineWalk::new(start, end) {
            if !ctx.reach.contains(cell) || (self.blocks)(&*ctx, cell) {
                trace!(
                    target: "targeting::strategy",
                    strategy = %self.name,
                    %cell,
                    "line walk stopped"
                );
                break;
            }
            if self.is_cell_valid(ctx, cell) {
                farthest = Some(cell);
            }
        }

        farthest
    }
}
