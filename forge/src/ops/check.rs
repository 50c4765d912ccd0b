//! Check operation - blueprint validation.

use std::path::Path;

use stackforge_blueprint::Blueprint;
use stackforge_codegen::{suggest_improvements, validate};

use crate::reports::CheckReport;

/// Validate the blueprint and collect suggestions.
pub fn check(blueprint: &Blueprint, path: &Path) -> CheckReport {
    CheckReport {
        path: path.to_path_buf(),
        project: blueprint.metadata.name.clone(),
        service_count: blueprint.services.len(),
        validation: validate(blueprint),
        suggestions: suggest_improvements(blueprint),
    }
}
