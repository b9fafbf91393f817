//! Runtime orchestration around the targeting core.
//!
//! [`CursorRuntime`] owns the strategy registry and the dispatch controller so
//! hosts never reach for global state. Consumers register strategies through
//! it, run lookups, and push configuration changes with
//! [`CursorRuntime::apply_config`].
//!
//! Modules are organized by responsibility:
//! - [`cursor`] hosts the runtime itself
//! - [`diagnostics`] forwards the winning producer of a lookup to an overlay
//! - [`error`] defines the errors surfaced by the runtime API
pub mod cursor;
pub mod diagnostics;
pub mod error;

pub use cursor::{CursorRuntime, SharedRegistry};
pub use diagnostics::{DiagnosticInfo, DiagnosticSink, LogSink};
pub use error::{Result, RuntimeError};
