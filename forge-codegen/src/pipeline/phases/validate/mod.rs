//! Validate phase - runs lints on the blueprint and gates the request.

mod lint;
pub mod lints;
mod report;

use eyre::Result;
pub use lint::{Lint, LintInfo};
pub use lints::{
    DatabasePasswordLint, DuplicateIdLint, EmptyBlueprintLint, IsolatedServiceLint,
    MissingPortLint, NameCollisionLint, ServiceTypeLint,
};
pub use report::ValidationReport;
use stackforge_blueprint::Blueprint;

use crate::pipeline::{GenerationContext, Phase, Stage};

/// Validate a blueprint with the default lints.
///
/// Never fails: every problem ends up in the returned report.
pub fn validate(blueprint: &Blueprint) -> ValidationReport {
    ValidatePhase::new().check(blueprint)
}

/// Phase that validates the blueprint using configurable lints.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a new validate phase with default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(EmptyBlueprintLint),
                Box::new(ServiceTypeLint),
                Box::new(DuplicateIdLint),
                Box::new(NameCollisionLint),
                Box::new(MissingPortLint),
                Box::new(DatabasePasswordLint),
                Box::new(IsolatedServiceLint),
            ],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    /// Add a custom lint to the validation phase.
    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    /// Get the names of all lints that will be run.
    pub fn lint_names(&self) -> Vec<&'static str> {
        self.lints.iter().map(|l| l.name()).collect()
    }

    pub fn lint_info(&self) -> Vec<LintInfo> {
        self.lints.iter().map(|l| l.info()).collect()
    }

    /// Run every lint and build the report.
    pub fn check(&self, blueprint: &Blueprint) -> ValidationReport {
        let mut diagnostics = Vec::new();
        for lint in &self.lints {
            lint.check(blueprint, &mut diagnostics);
        }
        ValidationReport::from_diagnostics(blueprint, diagnostics)
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Check blueprint integrity and score it"
    }

    fn run(&self, ctx: &mut GenerationContext) -> Result<()> {
        let report = self.check(&ctx.blueprint);

        ctx.diagnostics.extend(report.blocking.iter().cloned());
        ctx.diagnostics.extend(report.warnings.iter().cloned());
        ctx.stage = if report.valid() {
            Stage::Validated
        } else {
            Stage::Rejected
        };
        ctx.report = Some(report);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use stackforge_blueprint::{ConnectionKind, ServiceNode};
    use stackforge_core::ServiceType;

    use super::*;
    use crate::pipeline::Diagnostic;

    #[test]
    fn test_zero_services_single_blocking_issue() {
        let report = validate(&Blueprint::new("p"));

        assert!(!report.valid());
        assert_eq!(report.blocking.len(), 1);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_single_backend_with_empty_config() {
        let blueprint = Blueprint::new("p")
            .with_service(ServiceNode::new("api", ServiceType::BackendRuntime, "API"));
        let report = validate(&blueprint);

        assert!(report.valid());
        assert!(report.blocking.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].message.contains("no port"));
        assert_eq!(report.score, 95);
    }

    #[test]
    fn test_connected_blueprint() {
        let blueprint = Blueprint::new("shop")
            .with_service(ServiceNode::new("api", ServiceType::BackendRuntime, "API").with_port(8080))
            .with_service(
                ServiceNode::new("db", ServiceType::RelationalDatabase, "DB")
                    .with_port(5432)
                    .with_env("POSTGRES_PASSWORD", "secret"),
            )
            .with_connection("api", "db", ConnectionKind::Database);
        let report = validate(&blueprint);

        assert!(report.valid());
        assert_eq!(report.issue_count(), 0);
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_dangling_connection_is_ignored() {
        let blueprint = Blueprint::new("shop")
            .with_service(ServiceNode::new("api", ServiceType::BackendRuntime, "API").with_port(8080))
            .with_service(ServiceNode::new("web", ServiceType::FrontendFramework, "Web").with_port(3000))
            .with_connection("api", "ghost", ConnectionKind::Api);
        let report = validate(&blueprint);

        let warnings: Vec<_> = report.warnings.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            warnings,
            ["service 'api' is isolated", "service 'web' is isolated"]
        );
        assert_eq!(report.score, 90);
    }

    #[test]
    fn test_phase_rejects_blocking_blueprint() {
        let mut ctx = GenerationContext::new(Blueprint::new("p"));
        ValidatePhase::new().run(&mut ctx).unwrap();

        assert_eq!(ctx.stage, Stage::Rejected);
        assert!(ctx.has_errors());
        assert!(ctx.report.is_some());
    }

    #[test]
    fn test_warnings_allowed() {
        let blueprint = Blueprint::new("p")
            .with_service(ServiceNode::new("api", ServiceType::BackendRuntime, "API"));
        let mut ctx = GenerationContext::new(blueprint);

        ValidatePhase::empty()
            .with_lint(MissingPortLint)
            .run(&mut ctx)
            .unwrap();

        assert_eq!(ctx.stage, Stage::Validated);
        assert!(ctx.has_warnings());
        assert!(!ctx.has_errors());
    }

    #[test]
    fn test_custom_lint() {
        struct NoCachesLint;
        impl Lint for NoCachesLint {
            fn name(&self) -> &'static str {
                "no-caches"
            }
            fn description(&self) -> &'static str {
                "Forbid caches"
            }
            fn check(&self, blueprint: &Blueprint, diagnostics: &mut Vec<Diagnostic>) {
                if blueprint.has_type(ServiceType::is_cache) {
                    diagnostics.push(Diagnostic::error("validate", "caches are forbidden"));
                }
            }
        }

        let blueprint =
            Blueprint::new("p").with_service(ServiceNode::new("c", ServiceType::Cache, "C").with_port(1));
        let phase = ValidatePhase::empty().with_lint(NoCachesLint);

        assert_eq!(phase.lint_names(), ["no-caches"]);
        assert!(!phase.check(&blueprint).valid());
    }
}
