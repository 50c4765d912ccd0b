//! Generation pipeline.
//!
//! [`Pipeline`] moves a blueprint through validation, enhancement,
//! dependency resolution, rendering and compose synthesis. It provides:
//!
//! - Explicit phase boundaries with a [`Stage`] per request
//! - Plugin hooks before and after each phase
//! - Unified diagnostics collection in [`GenerationContext`]
//!
//! Packaging is not a phase: it needs the filesystem and lives in the
//! archive crate.

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;
mod stage;

pub use context::GenerationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use phases::{Lint, ValidatePhase, ValidationReport, validate};
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
pub use stage::Stage;
