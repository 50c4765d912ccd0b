//! Built-in pipeline phases.
//!
//! - [`ValidatePhase`] - runs lints and gates the request
//! - [`EnhancePhase`] - applies registry defaults, collects suggestions
//! - [`ResolvePhase`] - builds the dependency graph
//! - [`RenderPhase`] - renders every service
//! - [`SynthesizePhase`] - builds the compose descriptor

mod enhance;
mod render;
mod resolve;
mod synthesize;
mod validate;

pub use enhance::EnhancePhase;
pub use render::RenderPhase;
pub use resolve::ResolvePhase;
pub use synthesize::SynthesizePhase;
pub use validate::{
    DatabasePasswordLint, DuplicateIdLint, EmptyBlueprintLint, IsolatedServiceLint, Lint,
    LintInfo, MissingPortLint, NameCollisionLint, ServiceTypeLint, ValidatePhase,
    ValidationReport, validate,
};
