use stackforge_blueprint::Blueprint;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that blocks blueprints without any service.
pub struct EmptyBlueprintLint;

impl Lint for EmptyBlueprintLint {
    fn name(&self) -> &'static str {
        "empty-blueprint"
    }

    fn description(&self) -> &'static str {
        "Require at least one service"
    }

    fn check(&self, blueprint: &Blueprint, diagnostics: &mut Vec<Diagnostic>) {
        if blueprint.services.is_empty() {
            diagnostics.push(
                Diagnostic::error("validate", "blueprint must contain at least one service")
                    .at("services"),
            );
        }
    }
}
