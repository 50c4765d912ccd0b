use indexmap::IndexMap;
use stackforge_blueprint::Blueprint;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that blocks services whose names sanitize to the same directory.
///
/// `"User API"` and `"user_api"` both become `user-api` and would overwrite
/// each other in the project tree and the compose file.
pub struct NameCollisionLint;

impl Lint for NameCollisionLint {
    fn name(&self) -> &'static str {
        "name-collision"
    }

    fn description(&self) -> &'static str {
        "Require service names to map to distinct directories"
    }

    fn check(&self, blueprint: &Blueprint, diagnostics: &mut Vec<Diagnostic>) {
        let mut owners: IndexMap<String, &str> = IndexMap::new();
        for service in &blueprint.services {
            let slug = service.slug();
            match owners.get(&slug) {
                Some(first) => diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!(
                            "services '{}' and '{}' both map to directory '{}'",
                            first, service.id, slug
                        ),
                    )
                    .at_service(&service.id),
                ),
                None => {
                    owners.insert(slug, service.id.as_str());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use stackforge_blueprint::ServiceNode;
    use stackforge_core::ServiceType;

    use super::*;

    #[test]
    fn test_colliding_names() {
        let blueprint = Blueprint::new("p")
            .with_service(ServiceNode::new("a", ServiceType::BackendRuntime, "User API"))
            .with_service(ServiceNode::new("b", ServiceType::BackendRuntime, "user_api"))
            .with_service(ServiceNode::new("c", ServiceType::Cache, "Cache"));

        let mut diagnostics = Vec::new();
        NameCollisionLint.check(&blueprint, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_error());
        assert_eq!(
            diagnostics[0].message,
            "services 'a' and 'b' both map to directory 'user-api'"
        );
    }

    #[test]
    fn test_distinct_names() {
        let blueprint = Blueprint::new("p")
            .with_service(ServiceNode::new("a", ServiceType::BackendRuntime, "api"))
            .with_service(ServiceNode::new("b", ServiceType::BackendRuntime, "api-2"));

        let mut diagnostics = Vec::new();
        NameCollisionLint.check(&blueprint, &mut diagnostics);
        assert!(diagnostics.is_empty());
    }
}
