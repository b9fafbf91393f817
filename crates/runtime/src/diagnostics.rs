//! Diagnostic overlay support.
//!
//! After each lookup the runtime can tell a [`DiagnosticSink`] which producer
//! won and where to draw its label. Sinks only observe; nothing they do feeds
//! back into targeting.

use targeting_core::grid::cell_center;
use targeting_core::{GridCell, LookupOutcome, WorldPos};
use tracing::info;

/// Offset from the target cell centre to the overlay label, in world units.
pub const LABEL_OFFSET: WorldPos = WorldPos::new(24.0, -8.0);

/// Attribution of a committed target, ready to be drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct DiagnosticInfo {
    pub producer_name: String,
    pub producer_group: String,
    pub target: GridCell,
    pub label_pos: WorldPos,
}

impl DiagnosticInfo {
    /// Builds the overlay entry for `outcome`, or `None` when nothing was
    /// committed.
    pub fn from_outcome(outcome: &LookupOutcome, cell_size: u32) -> Option<Self> {
        let target = outcome.target?;
        let producer = outcome.producer.as_ref()?;
        Some(Self {
            producer_name: producer.name().to_owned(),
            producer_group: producer.group().to_owned(),
            target,
            label_pos: cell_center(target, cell_size) + LABEL_OFFSET,
        })
    }

    /// Two-line label: producer name, then its group.
    pub fn label(&self) -> String {
        format!("{}\n(Group: {})", self.producer_name, self.producer_group)
    }
}

/// Receives the result of every lookup while the overlay is enabled.
///
/// `None` means the lookup ended without a target.
pub trait DiagnosticSink: Send {
    fn on_lookup(&mut self, info: Option<&DiagnosticInfo>);
}

impl<F> DiagnosticSink for F
where
    F: FnMut(Option<&DiagnosticInfo>) + Send,
{
    fn on_lookup(&mut self, info: Option<&DiagnosticInfo>) {
        self(info)
    }
}

/// Sink that writes each label to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn on_lookup(&mut self, info: Option<&DiagnosticInfo>) {
        match info {
            Some(info) => info!(
                target: "runtime::cursor",
                target_cell = %info.target,
                label_pos = %info.label_pos,
                producer = %info.producer_name,
                group = %info.producer_group,
                "overlay"
            ),
            None => info!(target: "runtime::cursor", "overlay: no target"),
        }
    }
}
