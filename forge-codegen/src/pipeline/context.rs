//! State carried through the pipeline phases.

use stackforge_blueprint::Blueprint;

use super::{
    Stage,
    diagnostic::{Diagnostic, Severity},
    phases::ValidationReport,
};
use crate::{
    compose::ComposeFile,
    enhance::{EnhancedBlueprint, Suggestion},
    graph::DependencyGraph,
    render::RenderedService,
};

/// Context passed through all pipeline phases.
///
/// Each phase fills in its own output and advances [`stage`](Self::stage).
/// The input blueprint is never modified.
#[derive(Debug)]
pub struct GenerationContext {
    /// The blueprint as received.
    pub blueprint: Blueprint,
    pub stage: Stage,
    /// Validation result (populated by ValidatePhase).
    pub report: Option<ValidationReport>,
    /// Blueprint with defaults applied (populated by EnhancePhase).
    pub enhanced: Option<EnhancedBlueprint>,
    /// Advisory suggestions (populated by EnhancePhase).
    pub suggestions: Vec<Suggestion>,
    /// Dependency sets (populated by ResolvePhase).
    pub graph: Option<DependencyGraph>,
    /// One entry per service, in blueprint order (populated by RenderPhase).
    pub rendered: Vec<RenderedService>,
    /// Compose descriptor (populated by SynthesizePhase).
    pub descriptor: Option<ComposeFile>,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationContext {
    pub fn new(blueprint: Blueprint) -> Self {
        Self {
            blueprint,
            stage: Stage::Received,
            report: None,
            enhanced: None,
            suggestions: Vec::new(),
            graph: None,
            rendered: Vec::new(),
            descriptor: None,
            diagnostics: Vec::new(),
        }
    }

    /// Sanitized project name.
    pub fn project_slug(&self) -> String {
        self.blueprint.project_slug()
    }

    /// Check whether validation rejected the blueprint.
    pub fn is_rejected(&self) -> bool {
        self.stage == Stage::Rejected
    }

    /// Move the request to [`Stage::Failed`] after an unrecovered error.
    ///
    /// Requests that never got past validation, or already reached a
    /// terminal stage, keep their stage.
    pub fn fail(&mut self) {
        if self.stage != Stage::Received && !self.stage.is_terminal() {
            self.stage = Stage::Failed;
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    /// Add a diagnostic with a location.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Rendered services that fell back to default output.
    pub fn fallbacks(&self) -> impl Iterator<Item = &RenderedService> {
        self.rendered.iter().filter(|r| r.used_fallback())
    }
}
