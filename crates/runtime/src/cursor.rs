//! Cursor runtime: registry ownership, lookups, and configuration changes.

use std::sync::{Arc, RwLock};

use targeting_core::{
    Baseline, DispatchController, DispatchState, LookupOutcome, Producer, ReachQuery,
    StrategyHandle, StrategyRegistry, TargetStrategy, TargetingConfig, TargetingContext,
};
use tracing::{debug, info};

use crate::diagnostics::{DiagnosticInfo, DiagnosticSink};
use crate::error::{Result, RuntimeError};

/// Registry shared between setup code and the runtime.
pub type SharedRegistry<S> = Arc<RwLock<StrategyRegistry<S>>>;

/// Owns everything a host needs to answer "which cell should this act on?".
///
/// Lookups read the registry under a shared lock, so strategies can be
/// registered from another thread through [`registry`](Self::registry)
/// between lookups.
pub struct CursorRuntime<S> {
    registry: SharedRegistry<S>,
    controller: DispatchController,
    config: TargetingConfig,
    sink: Option<Box<dyn DiagnosticSink>>,
}

impl<S> CursorRuntime<S> {
    /// Creates a runtime with an empty registry.
    pub fn new(config: TargetingConfig) -> Result<Self> {
        Self::with_registry(config, Arc::new(RwLock::new(StrategyRegistry::new())))
    }

    /// Creates a runtime around an existing shared registry.
    pub fn with_registry(config: TargetingConfig, registry: SharedRegistry<S>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            registry,
            controller: DispatchController::new(),
            config,
            sink: None,
        })
    }

    /// Installs the sink that receives overlay information.
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn set_sink(&mut self, sink: impl DiagnosticSink + 'static) {
        self.sink = Some(Box::new(sink));
    }

    /// Clone of the shared registry handle.
    pub fn registry(&self) -> SharedRegistry<S> {
        Arc::clone(&self.registry)
    }

    pub fn config(&self) -> &TargetingConfig {
        &self.config
    }

    pub fn state(&self) -> DispatchState {
        self.controller.state()
    }

    pub fn last_producer(&self) -> Option<&Producer> {
        self.controller.last_producer()
    }

    pub fn register<P, T>(&self, predicate: P, strategy: T, priority: i32) -> Result<StrategyHandle>
    where
        P: Fn(&S) -> bool + Send + Sync + 'static,
        T: TargetStrategy<S> + 'static,
    {
        let mut registry = self
            .registry
            .write()
            .map_err(|_| RuntimeError::RegistryPoisoned)?;
        Ok(registry.register(predicate, strategy, priority))
    }

    /// Removes a registration. Returns `Ok(false)` for unknown handles.
    pub fn unregister(&self, handle: StrategyHandle) -> Result<bool> {
        let mut registry = self
            .registry
            .write()
            .map_err(|_| RuntimeError::RegistryPoisoned)?;
        Ok(registry.unregister(handle))
    }

    /// Drops every registration, e.g. when the host unloads.
    pub fn clear(&self) -> Result<()> {
        self.registry
            .write()
            .map_err(|_| RuntimeError::RegistryPoisoned)?
            .clear();
        Ok(())
    }

    /// Replaces the active configuration.
    ///
    /// The new config is validated first; on error the old one stays active.
    pub fn apply_config(&mut self, config: TargetingConfig) -> Result<()> {
        config.validate()?;
        if config == self.config {
            return Ok(());
        }

        info!(
            target: "runtime::cursor",
            enabled = config.enabled,
            overlay = config.show_diagnostic_overlay,
            range_x = config.range_x,
            range_y = config.range_y,
            trailing_ring = %config.trailing_ring,
            "targeting config changed"
        );
        self.config = config;
        Ok(())
    }

    /// Runs one lookup for `subject`.
    ///
    /// With targeting disabled only the baseline runs.
    pub fn lookup<B>(
        &mut self,
        subject: S,
        query: &ReachQuery,
        baseline: &mut B,
    ) -> Result<LookupOutcome>
    where
        B: Baseline<S> + ?Sized,
    {
        let outcome = if self.config.enabled {
            let registry = self
                .registry
                .read()
                .map_err(|_| RuntimeError::RegistryPoisoned)?;
            self.controller
                .lookup(&registry, subject, query, &self.config, baseline)
        } else {
            debug!(target: "runtime::cursor", "targeting disabled, running baseline only");
            let ctx = TargetingContext::from_query(subject, query, &self.config);
            self.controller.run_baseline_only(&ctx, baseline)
        };

        self.report(&outcome);
        Ok(outcome)
    }

    fn report(&mut self, outcome: &LookupOutcome) {
        if !self.config.show_diagnostic_overlay {
            return;
        }
        if let Some(sink) = self.sink.as_mut() {
            let info = DiagnosticInfo::from_outcome(outcome, self.config.cell_size);
            sink.on_lookup(info.as_ref());
        }
    }
}
