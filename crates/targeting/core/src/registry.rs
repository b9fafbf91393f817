//! Priority-ordered registry of targeting strategies.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::strategy::{ExecutionPhase, TargetStrategy};

type SubjectPredicate<S> = Box<dyn Fn(&S) -> bool + Send + Sync>;

/// Opaque token returned by [`StrategyRegistry::register`].
///
/// Handles are assigned in increasing order and never reused by the registry
/// that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StrategyHandle(u64);

impl fmt::Display for StrategyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "strategy#{}", self.0)
    }
}

struct Registration<S> {
    predicate: SubjectPredicate<S>,
    strategy: Arc<dyn TargetStrategy<S>>,
    handle: StrategyHandle,
}

/// Ordered collection of (subject predicate, strategy) registrations.
///
/// Registrations are grouped into priority buckets. Buckets are visited in
/// ascending order and, within a bucket, in registration order. Every
/// resolution honours this order; the dispatch chain relies on it.
pub struct StrategyRegistry<S> {
    buckets: BTreeMap<i32, Vec<Registration<S>>>,
    next_handle: u64,
}

impl<S> StrategyRegistry<S> {
    /// For highly specific or situational behaviour. Lower numbers run first.
    pub const PRIORITY_HIGH: i32 = 25;
    /// Default for most strategies.
    pub const PRIORITY_NORMAL: i32 = 50;
    /// For broad, generic behaviour that others should be able to override.
    pub const PRIORITY_LOW: i32 = 75;

    pub fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
            next_handle: 0,
        }
    }

    /// Registers `strategy` for subjects matching `predicate`.
    ///
    /// Any `priority` is accepted; the `PRIORITY_*` constants are conventions.
    pub fn register<P, T>(&mut self, predicate: P, strategy: T, priority: i32) -> StrategyHandle
    where
        P: Fn(&S) -> bool + Send + Sync + 'static,
        T: TargetStrategy<S> + 'static,
    {
        self.register_shared(predicate, Arc::new(strategy), priority)
    }

    /// Like [`register`](Self::register) for a strategy instance shared elsewhere.
    pub fn register_shared<P>(
        &mut self,
        predicate: P,
        strategy: Arc<dyn TargetStrategy<S>>,
        priority: i32,
    ) -> StrategyHandle
    where
        P: Fn(&S) -> bool + Send + Sync + 'static,
    {
        let handle = StrategyHandle(self.next_handle);
        self.next_handle += 1;

        debug!(
            target: "targeting::registry",
            %handle,
            strategy = strategy.name(),
            group = strategy.group(),
            phase = %strategy.phase(),
            priority,
            "registered strategy"
        );

        self.buckets.entry(priority).or_default().push(Registration {
            predicate: Box::new(predicate),
            strategy,
            handle,
        });
        handle
    }

    /// Removes the registration behind `handle`.
    ///
    /// Returns false if the handle is unknown or was already removed; that
    /// case is otherwise a no-op.
    pub fn unregister(&mut self, handle: StrategyHandle) -> bool {
        let found = self.buckets.iter().find_map(|(&priority, entries)| {
            entries
                .iter()
                .position(|entry| entry.handle == handle)
                .map(|index| (priority, index))
        });

        let Some((priority, index)) = found else {
            debug!(target: "targeting::registry", %handle, "unregister ignored, handle not found");
            return false;
        };

        if let Some(entries) = self.buckets.get_mut(&priority) {
            let removed = entries.remove(index);
            debug!(
                target: "targeting::registry",
                %handle,
                strategy = removed.strategy.name(),
                priority,
                "unregistered strategy"
            );
            if entries.is_empty() {
                self.buckets.remove(&priority);
            }
        }
        true
    }

    /// Strategies of `phase` whose predicate accepts `subject`, in execution order.
    pub fn resolve(&self, subject: &S, phase: ExecutionPhase) -> Vec<Arc<dyn TargetStrategy<S>>> {
        self.matching(subject)
            .filter(|strategy| strategy.phase() == phase)
            .cloned()
            .collect()
    }

    /// Every strategy whose predicate accepts `subject`, regardless of phase.
    pub fn resolve_all(&self, subject: &S) -> Vec<Arc<dyn TargetStrategy<S>>> {
        self.matching(subject).cloned().collect()
    }

    fn matching<'a>(
        &'a self,
        subject: &'a S,
    ) -> impl Iterator<Item = &'a Arc<dyn TargetStrategy<S>>> + 'a {
        self.buckets
            .values()
            .flatten()
            .filter(move |entry| (entry.predicate)(subject))
            .map(|entry| &entry.strategy)
    }

    /// Returns the number of registrations.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Removes every registration. Handles issued so far stay retired.
    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Returns `(priority, handle, strategy name)` in execution order (for debugging).
    pub fn entries(&self) -> impl Iterator<Item = (i32, StrategyHandle, &str)> + '_ {
        self.buckets.iter().flat_map(|(&priority, entries)| {
            entries
                .iter()
                .map(move |entry| (priority, entry.handle, entry.strategy.name()))
        })
    }
}

impl<S> Default for StrategyRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for StrategyRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("entries", &self.entries().collect::<Vec<_>>())
            .field("next_handle", &self.next_handle)
            .finish()
    }
}
