use stackforge_blueprint::Blueprint;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns about databases configured without a password.
pub struct DatabasePasswordLint;

impl Lint for DatabasePasswordLint {
    fn name(&self) -> &'static str {
        "database-password"
    }

    fn description(&self) -> &'static str {
        "Warn when a database service has no password configured"
    }

    fn check(&self, blueprint: &Blueprint, diagnostics: &mut Vec<Diagnostic>) {
        let unprotected = blueprint.services.iter().filter(|s| {
            s.kind.as_deref().is_some_and(|tag| tag.contains("database"))
                && !s.config.has_password()
        });

        for service in unprotected {
            diagnostics.push(
                Diagnostic::warning(
                    "validate",
                    format!("database '{}' has no password configured", service.id),
                )
                .at_service(&service.id),
            );
        }
    }
}
