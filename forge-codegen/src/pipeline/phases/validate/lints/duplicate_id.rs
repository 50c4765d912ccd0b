use indexmap::IndexSet;
use stackforge_blueprint::Blueprint;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that blocks services sharing an id.
///
/// One error is reported for every occurrence after the first.
pub struct DuplicateIdLint;

impl Lint for DuplicateIdLint {
    fn name(&self) -> &'static str {
        "duplicate-id"
    }

    fn description(&self) -> &'static str {
        "Require service ids to be unique"
    }

    fn check(&self, blueprint: &Blueprint, diagnostics: &mut Vec<Diagnostic>) {
        let mut seen = IndexSet::new();
        for (index, service) in blueprint.services.iter().enumerate() {
            if !seen.insert(service.id.as_str()) {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!("duplicate service id '{}'", service.id),
                    )
                    .at(format!("services[{}]", index)),
                );
            }
        }
    }
}
