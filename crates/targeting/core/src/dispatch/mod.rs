//! Lookup orchestration: strategies before the baseline, the baseline, then
//! fallback strategies.
//!
//! # Chain
//!
//! 1. `PreBaseline` strategies run in registry order. The first unrestricted
//!    cell is committed and the lookup ends.
//! 2. The baseline runs. An unrestricted result is accepted; a restricted one
//!    is reverted and the lookup continues.
//! 3. `PostBaseline` strategies run like step 1.
//!
//! A strategy whose result is restricted is skipped, never retried. Ending
//! with no target is a normal outcome.

mod baseline;

pub use baseline::{Baseline, NoBaseline};

use std::fmt;

use tracing::{debug, trace};

use crate::config::TargetingConfig;
use crate::context::{ReachQuery, TargetingContext};
use crate::grid::GridCell;
use crate::registry::StrategyRegistry;
use crate::strategy::{ExecutionPhase, TargetStrategy};

/// Stage of the most recent lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum DispatchState {
    #[default]
    Idle,
    RunningPreBaseline,
    RunningBaseline,
    RunningPostBaseline,
    Resolved,
}

/// What produced the committed target of a lookup.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Producer {
    Strategy { name: String, group: String },
    Baseline,
}

impl Producer {
    pub const BASELINE_NAME: &'static str = "baseline";
    pub const BASELINE_GROUP: &'static str = "native";

    fn of<S>(strategy: &dyn TargetStrategy<S>) -> Self {
        Producer::Strategy {
            name: strategy.name().to_owned(),
            group: strategy.group().to_owned(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Producer::Strategy { name, .. } => name,
            Producer::Baseline => Self::BASELINE_NAME,
        }
    }

    pub fn group(&self) -> &str {
        match self {
            Producer::Strategy { group, .. } => group,
            Producer::Baseline => Self::BASELINE_GROUP,
        }
    }

    pub fn is_baseline(&self) -> bool {
        matches!(self, Producer::Baseline)
    }
}

impl fmt::Display for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Producer::Strategy { name, group } => write!(f, "{name} ({group})"),
            Producer::Baseline => f.write_str(Self::BASELINE_NAME),
        }
    }
}

/// Result of one lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LookupOutcome {
    pub target: Option<GridCell>,
    pub producer: Option<Producer>,
}

impl LookupOutcome {
    pub const NONE: Self = Self {
        target: None,
        producer: None,
    };

    fn committed(cell: GridCell, producer: Producer) -> Self {
        Self {
            target: Some(cell),
            producer: Some(producer),
        }
    }

    pub fn is_found(&self) -> bool {
        self.target.is_some()
    }
}

/// Runs the targeting chain and remembers who won the last lookup.
#[derive(Debug, Default)]
pub struct DispatchController {
    state: DispatchState,
    last_producer: Option<Producer>,
}

impl DispatchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Producer of the most recent committed target, if any.
    pub fn last_producer(&self) -> Option<&Producer> {
        self.last_producer.as_ref()
    }

    /// Builds a context for `query` and runs the full chain.
    pub fn lookup<S, B>(
        &mut self,
        registry: &StrategyRegistry<S>,
        subject: S,
        query: &ReachQuery,
        config: &TargetingConfig,
        baseline: &mut B,
    ) -> LookupOutcome
    where
        B: Baseline<S> + ?Sized,
    {
        let mut ctx = TargetingContext::from_query(subject, query, config);
        self.run(registry, &mut ctx, baseline)
    }

    /// Runs the full chain against an existing context.
    ///
    /// The context's restriction set is left as the strategies filled it.
    pub fn run<S, B>(
        &mut self,
        registry: &StrategyRegistry<S>,
        ctx: &mut TargetingContext<S>,
        baseline: &mut B,
    ) -> LookupOutcome
    where
        B: Baseline<S> + ?Sized,
    {
        self.transition(DispatchState::RunningPreBaseline);
        if let Some(outcome) = self.run_phase(registry, ctx, ExecutionPhase::PreBaseline) {
            return self.resolve(outcome);
        }

        self.transition(DispatchState::RunningBaseline);
        if let Some(cell) = baseline.run(ctx) {
            if !ctx.is_restricted(cell) {
                return self.resolve(LookupOutcome::committed(cell, Producer::Baseline));
            }
            debug!(target: "targeting::dispatch", %cell, "baseline target restricted, reverting");
            baseline.revert(cell);
        }

        self.transition(DispatchState::RunningPostBaseline);
        if let Some(outcome) = self.run_phase(registry, ctx, ExecutionPhase::PostBaseline) {
            return self.resolve(outcome);
        }

        self.resolve(LookupOutcome::NONE)
    }

    /// Runs only the baseline, with no strategies and no restriction checks.
    pub fn run_baseline_only<S, B>(
        &mut self,
        ctx: &TargetingContext<S>,
        baseline: &mut B,
    ) -> LookupOutcome
    where
        B: Baseline<S> + ?Sized,
    {
        self.transition(DispatchState::RunningBaseline);
        let outcome = baseline
            .run(ctx)
            .map(|cell| LookupOutcome::committed(cell, Producer::Baseline))
            .unwrap_or(LookupOutcome::NONE);
        self.resolve(outcome)
    }

    fn run_phase<S>(
        &self,
        registry: &StrategyRegistry<S>,
        ctx: &mut TargetingContext<S>,
        phase: ExecutionPhase,
    ) -> Option<LookupOutcome> {
        for strategy in registry.resolve(&ctx.subject, phase) {
            let Some(cell) = strategy.find_target(ctx) else {
                trace!(
                    target: "targeting::dispatch",
                    strategy = strategy.name(),
                    %phase,
                    "no target"
                );
                continue;
            };

            if ctx.is_restricted(cell) {
                debug!(
                    target: "targeting::dispatch",
                    strategy = strategy.name(),
                    %phase,
                    %cell,
                    "target restricted, trying next strategy"
                );
                continue;
            }

            return Some(LookupOutcome::committed(cell, Producer::of(strategy.as_ref())));
        }
        None
    }

    fn resolve(&mut self, outcome: LookupOutcome) -> LookupOutcome {
        self.transition(DispatchState::Resolved);
        self.last_producer = outcome.producer.clone();

        match (&outcome.target, &outcome.producer) {
            (Some(cell), Some(producer)) => debug!(
                target: "targeting::dispatch",
                %cell,
                %producer,
                "target committed"
            ),
            _ => trace!(target: "targeting::dispatch", "no target"),
        }
        outcome
    }

    fn transition(&mut self, next: DispatchState) {
        trace!(target: "targeting::dispatch", from = %self.state, to = %next, "state transition");
        self.state = next;
    }
}
