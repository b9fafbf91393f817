use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use targeting_core::{
    Baseline, DispatchController, DispatchState, ExecutionPhase, FnStrategy, GridCell,
    LookupOutcome, NoBaseline, Producer, ReachQuery, Region, StrategyRegistry, TargetStrategy,
    TargetingConfig, TargetingContext, WorldPos,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tool {
    Pickaxe,
    Hammer,
}

type Registry = StrategyRegistry<Tool>;

/// Strategy that always proposes the same cell and counts its invocations.
struct Fixed {
    name: &'static str,
    cell: Option<GridCell>,
    phase: ExecutionPhase,
    calls: Arc<AtomicUsize>,
}

impl Fixed {
    fn new(name: &'static str, cell: (i32, i32)) -> Self {
        Self {
            name,
            cell: Some(cell.into()),
            phase: ExecutionPhase::PreBaseline,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn nothing(name: &'static str) -> Self {
        Self {
            cell: None,
            ..Self::new(name, (0, 0))
        }
    }

    fn post(mut self) -> Self {
        self.phase = ExecutionPhase::PostBaseline;
        self
    }

    fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl TargetStrategy<Tool> for Fixed {
    fn name(&self) -> &str {
        self.name
    }

    fn group(&self) -> &str {
        "tests"
    }

    fn phase(&self) -> ExecutionPhase {
        self.phase
    }

    fn is_cell_valid(&self, _ctx: &mut TargetingContext<Tool>, cell: GridCell) -> bool {
        self.cell == Some(cell)
    }

    fn find_target(&self, _ctx: &mut TargetingContext<Tool>) -> Option<GridCell> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.cell
    }
}

/// Baseline with a canned answer that records reverts.
#[derive(Default)]
struct RecordingBaseline {
    answer: Option<GridCell>,
    runs: usize,
    reverted: Vec<GridCell>,
}

impl RecordingBaseline {
    fn answering(cell: (i32, i32)) -> Self {
        Self {
            answer: Some(cell.into()),
            ..Self::default()
        }
    }
}

impl Baseline<Tool> for RecordingBaseline {
    fn run(&mut self, _ctx: &TargetingContext<Tool>) -> Option<GridCell> {
        self.runs += 1;
        self.answer
    }

    fn revert(&mut self, cell: GridCell) {
        self.reverted.push(cell);
    }
}

fn context(tool: Tool) -> TargetingContext<Tool> {
    let reach = Region::from_corners(GridCell::new(0, 0), GridCell::new(9, 9));
    // Agent in cell (5, 5), cursor in cell (9, 0).
    TargetingContext::new(tool, WorldPos::new(88.0, 88.0), WorldPos::new(152.0, 8.0), reach)
}

fn strategy_producer(name: &str) -> Option<Producer> {
    Some(Producer::Strategy {
        name: name.to_owned(),
        group: "tests".to_owned(),
    })
}

#[test]
fn lookups_are_deterministic() {
    let mut registry = Registry::new();
    registry.register(
        |tool| *tool == Tool::Pickaxe,
        FnStrategy::new("diagonal", |_, cell: GridCell| cell.x == cell.y && cell.x > 6),
        Registry::PRIORITY_NORMAL,
    );

    let mut controller = DispatchController::new();
    let first = controller.run(&registry, &mut context(Tool::Pickaxe), &mut NoBaseline);
    let second = controller.run(&registry, &mut context(Tool::Pickaxe), &mut NoBaseline);

    assert_eq!(first, second);
    assert_eq!(first.target, Some(GridCell::new(7, 7)));
    assert_eq!(first.producer.as_ref().map(Producer::name), Some("diagonal"));
}

#[test]
fn restricted_result_falls_through_to_next_strategy() {
    let mut registry = Registry::new();
    let vetoed = Fixed::new("vetoed", (2, 2));
    let vetoed_calls = vetoed.counter();
    registry.register(|_| true, vetoed, Registry::PRIORITY_HIGH);
    registry.register(|_| true, Fixed::new("next", (3, 3)), Registry::PRIORITY_NORMAL);

    let mut ctx = context(Tool::Pickaxe);
    ctx.restrict(GridCell::new(2, 2));
    let outcome = DispatchController::new().run(&registry, &mut ctx, &mut NoBaseline);

    assert_eq!(outcome.target, Some(GridCell::new(3, 3)));
    assert_eq!(outcome.producer, strategy_producer("next"));
    assert_eq!(vetoed_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn restricted_result_falls_through_to_baseline() {
    let mut registry = Registry::new();
    registry.register(|_| true, Fixed::new("vetoed", (2, 2)), Registry::PRIORITY_HIGH);

    let mut ctx = context(Tool::Pickaxe);
    ctx.restrict(GridCell::new(2, 2));
    let mut baseline = RecordingBaseline::answering((4, 4));
    let outcome = DispatchController::new().run(&registry, &mut ctx, &mut baseline);

    assert_eq!(outcome.target, Some(GridCell::new(4, 4)));
    assert_eq!(outcome.producer, Some(Producer::Baseline));
}

#[test]
fn lower_bucket_wins_and_stops_the_chain() {
    let mut registry = Registry::new();
    let generic = Fixed::new("generic", (8, 8));
    let generic_calls = generic.counter();
    registry.register(|_| true, generic, Registry::PRIORITY_LOW);
    registry.register(|_| true, Fixed::new("specific", (1, 1)), Registry::PRIORITY_HIGH);

    let mut baseline = RecordingBaseline::answering((6, 6));
    let mut ctx = context(Tool::Hammer);
    let outcome = DispatchController::new().run(&registry, &mut ctx, &mut baseline);

    assert_eq!(outcome.target, Some(GridCell::new(1, 1)));
    assert_eq!(outcome.producer, strategy_producer("specific"));
    assert_eq!(generic_calls.load(Ordering::SeqCst), 0);
    assert_eq!(baseline.runs, 0);
}

#[test]
fn restricted_baseline_result_is_reverted_and_post_phase_runs() {
    let mut registry = Registry::new();
    // Vetoes (3, 3) while searching and never accepts anything itself.
    registry.register(
        |_| true,
        FnStrategy::new("guard", |ctx: &mut TargetingContext<Tool>, cell: GridCell| {
            if cell == GridCell::new(3, 3) {
                ctx.restrict(cell);
            }
            false
        }),
        Registry::PRIORITY_HIGH,
    );
    registry.register(|_| true, Fixed::new("fallback", (5, 6)).post(), Registry::PRIORITY_NORMAL);

    let mut ctx = context(Tool::Pickaxe);
    let mut baseline = RecordingBaseline::answering((3, 3));
    let mut controller = DispatchController::new();
    let outcome = controller.run(&registry, &mut ctx, &mut baseline);

    assert_eq!(baseline.reverted, vec![GridCell::new(3, 3)]);
    assert_eq!(outcome.target, Some(GridCell::new(5, 6)));
    assert_eq!(outcome.producer, strategy_producer("fallback"));
    assert_eq!(controller.last_producer().map(Producer::name), Some("fallback"));
}

#[test]
fn accepted_baseline_skips_post_phase() {
    let mut registry = Registry::new();
    let fallback = Fixed::new("fallback", (5, 6)).post();
    let fallback_calls = fallback.counter();
    registry.register(|_| true, fallback, Registry::PRIORITY_NORMAL);

    let mut baseline = RecordingBaseline::answering((2, 8));
    let mut ctx = context(Tool::Pickaxe);
    let outcome = DispatchController::new().run(&registry, &mut ctx, &mut baseline);

    assert_eq!(outcome.target, Some(GridCell::new(2, 8)));
    assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
    assert!(baseline.reverted.is_empty());
}

#[test]
fn baseline_wins_when_no_strategy_matches() {
    let mut registry = Registry::new();
    registry.register(|tool| *tool == Tool::Hammer, Fixed::new("hammer", (1, 1)), 50);

    let mut controller = DispatchController::new();
    let mut baseline = |_: &TargetingContext<Tool>| Some(GridCell::new(7, 7));
    let outcome = controller.run(&registry, &mut context(Tool::Pickaxe), &mut baseline);

    assert_eq!(outcome.target, Some(GridCell::new(7, 7)));
    assert_eq!(outcome.producer, Some(Producer::Baseline));
    assert!(controller.last_producer().is_some_and(Producer::is_baseline));
    assert_eq!(controller.state(), DispatchState::Resolved);
}

#[test]
fn nothing_found_is_a_normal_outcome() {
    let mut registry = Registry::new();
    registry.register(|_| true, Fixed::nothing("empty"), 50);
    registry.register(|_| true, Fixed::nothing("empty_post").post(), 50);

    let mut controller = DispatchController::new();
    let mut baseline_runs = 0;
    let mut baseline = |_: &TargetingContext<Tool>| -> Option<GridCell> {
        baseline_runs += 1;
        None
    };
    let outcome = controller.run(&registry, &mut context(Tool::Pickaxe), &mut baseline);

    assert_eq!(outcome, LookupOutcome::NONE);
    assert!(!outcome.is_found());
    assert_eq!(controller.last_producer(), None);
    assert_eq!(baseline_runs, 1);
}

#[test]
fn lookup_builds_context_from_query() {
    let config = TargetingConfig::new();
    let mut registry = Registry::new();
    registry.register(
        |_| true,
        FnStrategy::new("anything", |_: &mut TargetingContext<Tool>, _: GridCell| true),
        Registry::PRIORITY_NORMAL,
    );

    // Agent box spans cells (100..=101, 50..=52); its centre is in cell (100, 51).
    let query = ReachQuery::new(
        WorldPos::new(1600.0, 800.0),
        WorldPos::new(20.0, 42.0),
        WorldPos::new(0.0, 0.0),
    );
    let outcome = DispatchController::new().lookup(
        &registry,
        Tool::Pickaxe,
        &query,
        &config,
        &mut NoBaseline,
    );

    assert_eq!(outcome.target, Some(GridCell::new(100, 51)));
}

#[test]
fn baseline_only_ignores_strategies_and_restrictions() {
    let mut registry = Registry::new();
    registry.register(|_| true, Fixed::new("unused", (1, 1)), 50);

    let mut ctx = context(Tool::Pickaxe);
    ctx.restrict(GridCell::new(7, 7));
    let mut baseline = |_: &TargetingContext<Tool>| Some(GridCell::new(7, 7));
    let outcome = DispatchController::new().run_baseline_only(&ctx, &mut baseline);

    assert_eq!(outcome.target, Some(GridCell::new(7, 7)));
    assert_eq!(outcome.producer, Some(Producer::Baseline));
}
