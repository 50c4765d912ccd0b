use stackforge_blueprint::Blueprint;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns about services no connection touches. Connections with
/// an endpoint that names no service do not count.
///
/// A single-service blueprint has nothing to connect to and is never
/// reported.
pub struct IsolatedServiceLint;

impl Lint for IsolatedServiceLint {
    fn name(&self) -> &'static str {
        "isolated-service"
    }

    fn description(&self) -> &'static str {
        "Warn about services that are not connected to anything"
    }

    fn check(&self, blueprint: &Blueprint, diagnostics: &mut Vec<Diagnostic>) {
        if blueprint.services.len() <= 1 {
            return;
        }

        for service in blueprint.services.iter().filter(|s| !blueprint.is_connected(&s.id)) {
            diagnostics.push(
                Diagnostic::warning(
                    "validate",
                    format!("service '{}' is isolated", service.id),
                )
                .at_service(&service.id),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use stackforge_blueprint::{ConnectionKind, ServiceNode};
    use stackforge_core::ServiceType;

    use super::*;

    #[test]
    fn test_single_service_not_isolated() {
        let blueprint = Blueprint::new("p")
            .with_service(ServiceNode::new("api", ServiceType::BackendRuntime, "API"));

        let mut diagnostics = Vec::new();
        IsolatedServiceLint.check(&blueprint, &mut diagnostics);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unconnected_service_warns() {
        let blueprint = Blueprint::new("p")
            .with_service(ServiceNode::new("api", ServiceType::BackendRuntime, "API"))
            .with_service(ServiceNode::new("db", ServiceType::RelationalDatabase, "DB"))
            .with_service(ServiceNode::new("cache", ServiceType::Cache, "Cache"))
            .with_connection("api", "db", ConnectionKind::Database);

        let mut diagnostics = Vec::new();
        IsolatedServiceLint.check(&blueprint, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "service 'cache' is isolated");
    }

    #[test]
    fn test_dangling_connection_does_not_count() {
        let blueprint = Blueprint::new("p")
            .with_service(ServiceNode::new("api", ServiceType::BackendRuntime, "API"))
            .with_service(ServiceNode::new("web", ServiceType::FrontendFramework, "Web"))
            .with_connection("api", "ghost", ConnectionKind::Api);

        let mut diagnostics = Vec::new();
        IsolatedServiceLint.check(&blueprint, &mut diagnostics);

        let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            ["service 'api' is isolated", "service 'web' is isolated"]
        );
    }
}
