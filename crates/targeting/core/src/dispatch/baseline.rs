use crate::context::TargetingContext;
use crate::grid::GridCell;

/// The host's native targeting, wrapped by the dispatch chain.
///
/// `run` may commit a target in host state and report it. If the reported
/// cell is restricted, the controller calls `revert` so the host can undo
/// whatever `run` committed.
pub trait Baseline<S> {
    fn run(&mut self, ctx: &TargetingContext<S>) -> Option<GridCell>;

    fn revert(&mut self, _cell: GridCell) {}
}

impl<S, F> Baseline<S> for F
where
    F: FnMut(&TargetingContext<S>) -> Option<GridCell>,
{
    fn run(&mut self, ctx: &TargetingContext<S>) -> Option<GridCell> {
        self(ctx)
    }
}

/// Baseline that never finds anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBaseline;

impl<S> Baseline<S> for NoBaseline {
    fn run(&mut self, _ctx: &TargetingContext<S>) -> Option<GridCell> {
        None
    }
}
