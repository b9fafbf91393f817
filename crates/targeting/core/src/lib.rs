//! Deterministic spatial targeting: pick the best grid cell for an agent to act on.
//!
//! `targeting-core` holds the pure algorithms shared by the runtime and tools:
//! grid geometry, ring and line traversals, the strategy capability, the
//! priority registry, and the dispatch chain that composes strategies with the
//! host's baseline targeting. Nothing here performs I/O.
//!
//! A lookup flows through [`dispatch::DispatchController`], which consults the
//! [`registry::StrategyRegistry`] for strategies matching the lookup subject.
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod grid;
pub mod registry;
pub mod search;
pub mod strategy;

pub use config::TargetingConfig;
pub use context::{ReachQuery, TargetingContext};
pub use dispatch::{
    Baseline, DispatchController, DispatchState, LookupOutcome, NoBaseline, Producer,
};
pub use error::{ConfigError, ErrorSeverity, TargetingError};
pub use grid::{GridCell, Region, WorldPos};
pub use registry::{StrategyHandle, StrategyRegistry};
pub use search::{LineWalk, Ring, RingSearch, Topology, TrailingRing};
pub use strategy::{
    ExecutionPhase, FnStrategy, LineStrategy, TargetStrategy, nearest_valid_in_reach,
};
