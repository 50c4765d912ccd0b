//! Lint trait for blueprint validation.

use stackforge_blueprint::Blueprint;

use crate::pipeline::Diagnostic;

/// Information about a lint.
#[derive(Debug, Clone)]
pub struct LintInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A check that inspects the blueprint and reports issues.
///
/// Errors block generation, warnings only lower the score.
pub trait Lint: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Check the blueprint and add any diagnostics.
    fn check(&self, blueprint: &Blueprint, diagnostics: &mut Vec<Diagnostic>);

    fn info(&self) -> LintInfo {
        LintInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
