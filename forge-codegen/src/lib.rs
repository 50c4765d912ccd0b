//! Blueprint compilation for Stackforge.
//!
//! This crate turns a parsed [`Blueprint`](stackforge_blueprint::Blueprint)
//! into everything a project needs except the archive itself:
//!
//! - [`validate`] - lint-based validation and scoring
//! - [`enhance()`] - registry defaults and [`suggest_improvements`]
//! - [`graph`] - dependency sets derived from connections
//! - [`render`] - per-service templates and renderers
//! - [`compose`] - the compose descriptor
//! - [`pipeline`] - the phase pipeline tying them together

pub mod builder;
pub mod compose;
pub mod enhance;
pub mod generation;
pub mod graph;
pub mod pipeline;
pub mod render;

pub use compose::{ComposeFile, ComposeService, synthesize};
pub use enhance::{EnhancedBlueprint, Suggestion, enhance, suggest_improvements};
pub use graph::{DependencyGraph, dependencies_of};
pub use pipeline::{
    Diagnostic, GenerationContext, Pipeline, Severity, Stage, ValidationReport, validate,
};
pub use render::{RenderEngine, RenderError, RenderedService, TemplateError, TemplateRepository};
