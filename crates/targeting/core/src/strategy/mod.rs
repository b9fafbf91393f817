//! Pluggable target-finding strategies.
//!
//! A strategy decides which cells are acceptable targets for a subject
//! ([`TargetStrategy::is_cell_valid`]) and, by default, picks among them with
//! a ring search from the agent outward ([`nearest_valid_in_reach`]).
//! Strategies that need a different traversal override
//! [`TargetStrategy::find_target`] entirely.
//!
//! # Execution Order
//!
//! Each strategy declares an [`ExecutionPhase`]:
//! - `PreBaseline`: tried before the host's native targeting (default)
//! - `PostBaseline`: tried only when the native targeting finds nothing usable
//!
//! Within a phase, strategies run in registry priority order until one
//! produces an unrestricted cell.

mod builtin;

pub use builtin::{FnStrategy, LineStrategy};

use tracing::trace;

use crate::context::TargetingContext;
use crate::grid::GridCell;
use crate::search::{RingSearch, Topology, select_nearest_in_first_ring};

/// When a strategy runs relative to the baseline targeting.
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
pub enum ExecutionPhase {
    /// Runs before the baseline; the first strategy to find a target wins.
    #[default]
    PreBaseline,
    /// Runs after the baseline, as a fallback.
    PostBaseline,
}

/// A unit of targeting behaviour.
///
/// Implementations are shared across lookups, so they must not keep
/// per-lookup state of their own; anything a strategy wants to communicate to
/// later strategies goes through the context's restriction set.
pub trait TargetStrategy<S>: Send + Sync {
    /// Human-readable name, reported when this strategy wins a lookup.
    fn name(&self) -> &str;

    /// Name of the extension that owns this strategy, reported alongside the name.
    fn group(&self) -> &str {
        "unknown"
    }

    fn phase(&self) -> ExecutionPhase {
        ExecutionPhase::PreBaseline
    }

    /// Returns true if `cell` is an acceptable target.
    ///
    /// May add cells to the context's restriction set to keep later
    /// strategies and the baseline from targeting them.
    fn is_cell_valid(&self, ctx: &mut TargetingContext<S>, cell: GridCell) -> bool;

    /// Picks the cell to target, or `None` if nothing suits.
    fn find_target(&self, ctx: &mut TargetingContext<S>) -> Option<GridCell> {
        nearest_valid_in_reach(self, ctx)
    }
}

/// Default targeting algorithm.
///
/// Searches the reachable region ring by ring outward from the agent's cell
/// (8-neighbour topology) and returns, from the first ring holding any valid
/// cell, the one closest to the cursor cell.
pub fn nearest_valid_in_reach<S, T>(strategy: &T, ctx: &mut TargetingContext<S>) -> Option<GridCell>
where
    T: TargetStrategy<S> + ?Sized,
{
    let center = ctx.anchor_cell();
    let hint = ctx.hint_cell();
    let reach = ctx.reach;
    let radius_bound = reach.width + reach.height;

    trace!(
        target: "targeting::strategy",
        strategy = strategy.name(),
        %center,
        %hint,
        radius_bound,
        "ring search"
    );

    let trailing = ctx.trailing_ring;
    let search = RingSearch::new(center, reach, Topology::Diagonal);
    select_nearest_in_first_ring(search, center, hint, trailing, |cell| {
        strategy.is_cell_valid(ctx, cell)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Region, WorldPos, cell_center};

    struct OnlyCell(GridCell);

    impl TargetStrategy<()> for OnlyCell {
        fn name(&self) -> &str {
            "only_cell"
        }

        fn is_cell_valid(&self, _ctx: &mut TargetingContext<()>, cell: GridCell) -> bool {
            cell == self.0
        }
    }

    fn context(anchor: GridCell, hint: GridCell, reach: Region) -> TargetingContext<()> {
        TargetingContext::new((), cell_center(anchor, 16), cell_center(hint, 16), reach)
    }

    #[test]
    fn finds_lone_valid_cell_in_outermost_ring() {
        let reach = Region::from_corners((0, 0).into(), (4, 4).into());
        let corner = GridCell::new(4, 4);
        let mut ctx = context(GridCell::ORIGIN, corner, reach);

        assert_eq!(OnlyCell(corner).find_target(&mut ctx), Some(corner));
    }

    #[test]
    fn cell_outside_reach_is_never_found() {
        let reach = Region::from_corners((0, 0).into(), (4, 4).into());
        let mut ctx = context(GridCell::new(2, 2), GridCell::new(2, 2), reach);

        assert_eq!(OnlyCell(GridCell::new(5, 5)).find_target(&mut ctx), None);
    }

    #[test]
    fn anchor_outside_reach_finds_nothing() {
        let reach = Region::from_corners((0, 0).into(), (4, 4).into());
        let mut ctx = context(GridCell::new(20, 20), GridCell::new(1, 1), reach);

        assert_eq!(OnlyCell(GridCell::new(1, 1)).find_target(&mut ctx), None);
    }

    #[test]
    fn validation_can_restrict_cells() {
        struct Vetoing;
        impl TargetStrategy<()> for Vetoing {
            fn name(&self) -> &str {
                "vetoing"
            }
            fn is_cell_valid(&self, ctx: &mut TargetingContext<()>, cell: GridCell) -> bool {
                ctx.restrict(cell);
                false
            }
        }

        let reach = Region::from_corners((0, 0).into(), (2, 2).into());
        let mut ctx = TargetingContext::new((), WorldPos::new(24.0, 24.0), WorldPos::ZERO, reach);
        assert_eq!(Vetoing.find_target(&mut ctx), None);
        assert_eq!(ctx.restricted().len(), 9);
    }
}
