use stackforge_blueprint::Blueprint;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns about services without an explicit port.
pub struct MissingPortLint;

impl Lint for MissingPortLint {
    fn name(&self) -> &'static str {
        "missing-port"
    }

    fn description(&self) -> &'static str {
        "Warn when a service relies on the default port of its type"
    }

    fn check(&self, blueprint: &Blueprint, diagnostics: &mut Vec<Diagnostic>) {
        for service in blueprint.services.iter().filter(|s| s.config.port.is_none()) {
            diagnostics.push(
                Diagnostic::warning(
                    "validate",
                    format!(
                        "service '{}' has no port; the default for its type will be used",
                        service.id
                    ),
                )
                .at_service(&service.id),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use stackforge_blueprint::ServiceNode;
    use stackforge_core::ServiceType;

    use super::*;

    #[test]
    fn test_missing_port_warns() {
        let blueprint = Blueprint::new("p")
            .with_service(ServiceNode::new("api", ServiceType::BackendRuntime, "API"))
            .with_service(ServiceNode::new("db", ServiceType::Cache, "DB").with_port(6379));

        let mut diagnostics = Vec::new();
        MissingPortLint.check(&blueprint, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_warning());
        assert_eq!(diagnostics[0].location.as_deref(), Some("services.api"));
    }
}
