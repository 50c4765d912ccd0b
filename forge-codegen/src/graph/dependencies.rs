//! Per-service dependency sets.
//!
//! A connection `source -> target` means the source depends on the target.
//! Connections whose endpoints do not name an existing service are skipped.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use stackforge_blueprint::{Blueprint, ServiceNode};

/// Targets of all connections leaving `service_id`, in connection order,
/// deduplicated by target id.
///
/// Returns an empty list for unknown ids. Never fails.
pub fn dependencies_of<'a>(blueprint: &'a Blueprint, service_id: &str) -> Vec<&'a ServiceNode> {
    if blueprint.service(service_id).is_none() {
        return Vec::new();
    }

    let mut seen = IndexSet::new();
    blueprint
        .connections
        .iter()
        .filter(|c| c.source == service_id)
        .filter_map(|c| blueprint.service(&c.target))
        .filter(|node| seen.insert(node.id.as_str()))
        .collect()
}

/// Dependency sets for every service of a blueprint.
///
/// Built once per request and shared by rendering and compose synthesis so
/// both see the same sets. Cycles are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencyGraph {
    edges: IndexMap<String, Vec<String>>,
}

impl DependencyGraph {
    pub fn build(blueprint: &Blueprint) -> Self {
        let edges = blueprint
            .services
            .iter()
            .map(|node| {
                let targets = dependencies_of(blueprint, &node.id)
                    .into_iter()
                    .map(|dep| dep.id.clone())
                    .collect();
                (node.id.clone(), targets)
            })
            .collect();
        Self { edges }
    }

    /// Ids of the services `service_id` depends on.
    pub fn dependency_ids(&self, service_id: &str) -> &[String] {
        self.edges
            .get(service_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Resolve the dependency set of `service_id` against `blueprint`.
    ///
    /// `blueprint` must be the blueprint the graph was built from, or one
    /// with the same ids (such as its enhanced form).
    pub fn dependencies<'a>(&self, blueprint: &'a Blueprint, service_id: &str) -> Vec<&'a ServiceNode> {
        self.dependency_ids(service_id)
            .iter()
            .filter_map(|id| blueprint.service(id))
            .collect()
    }

    /// Number of services in the graph.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Services that take part in at least one dependency cycle, in
    /// blueprint order. A self-connection counts as a cycle.
    pub fn cyclic_services(&self) -> Vec<&str> {
        self.edges
            .keys()
            .filter(|id| self.reaches(id, id))
            .map(String::as_str)
            .collect()
    }

    /// Check whether `to` is reachable from `from` through at least one edge.
    fn reaches(&self, from: &str, to: &str) -> bool {
        let mut visited = IndexSet::new();
        let mut stack: Vec<&str> = self.dependency_ids(from).iter().map(String::as_str).collect();

        while let Some(current) = stack.pop() {
            if current == to {
                return true;
            }
            if visited.insert(current) {
                stack.extend(self.dependency_ids(current).iter().map(String::as_str));
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use stackforge_blueprint::ConnectionKind;
    use stackforge_core::ServiceType;

    use super::*;

    fn node(id: &str, ty: ServiceType) -> ServiceNode {
        ServiceNode::new(id, ty, id)
    }

    fn shop() -> Blueprint {
        Blueprint::new("shop")
            .with_service(node("web", ServiceType::FrontendFramework))
            .with_service(node("api", ServiceType::BackendRuntime))
            .with_service(node("db", ServiceType::RelationalDatabase))
            .with_service(node("cache", ServiceType::Cache))
            .with_connection("web", "api", ConnectionKind::Api)
            .with_connection("api", "db", ConnectionKind::Database)
            .with_connection("api", "cache", ConnectionKind::Cache)
    }

    fn ids(nodes: Vec<&ServiceNode>) -> Vec<&str> {
        nodes.into_iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_dependencies_in_connection_order() {
        let blueprint = shop();
        assert_eq!(ids(dependencies_of(&blueprint, "api")), ["db", "cache"]);
        assert_eq!(ids(dependencies_of(&blueprint, "web")), ["api"]);
        assert!(dependencies_of(&blueprint, "db").is_empty());
    }

    #[test]
    fn test_duplicate_connections_deduplicated() {
        let blueprint = shop()
            .with_connection("api", "db", ConnectionKind::Default)
            .with_connection("api", "cache", ConnectionKind::Cache);
        assert_eq!(ids(dependencies_of(&blueprint, "api")), ["db", "cache"]);
    }

    #[test]
    fn test_dangling_endpoints_skipped() {
        let blueprint = shop()
            .with_connection("api", "ghost", ConnectionKind::Default)
            .with_connection("ghost", "db", ConnectionKind::Default);

        assert_eq!(ids(dependencies_of(&blueprint, "api")), ["db", "cache"]);
        assert!(dependencies_of(&blueprint, "ghost").is_empty());

        let graph = DependencyGraph::build(&blueprint);
        assert!(graph.dependency_ids("ghost").is_empty());
        assert_eq!(graph.len(), 4);
    }

    #[test]
    fn test_graph_matches_direct_resolution() {
        let blueprint = shop();
        let graph = DependencyGraph::build(&blueprint);
        for service in &blueprint.services {
            assert_eq!(
                ids(graph.dependencies(&blueprint, &service.id)),
                ids(dependencies_of(&blueprint, &service.id))
            );
        }
    }

    #[test]
    fn test_cycles_detected_not_broken() {
        let blueprint = shop().with_connection("db", "web", ConnectionKind::Default);
        let graph = DependencyGraph::build(&blueprint);

        assert_eq!(graph.cyclic_services(), ["web", "api", "db"]);
        assert_eq!(graph.dependency_ids("db"), ["web"]);
    }

    #[test]
    fn test_acyclic_graph() {
        let graph = DependencyGraph::build(&shop());
        assert!(graph.cyclic_services().is_empty());
    }

    #[test]
    fn test_self_connection_is_cycle() {
        let blueprint = shop().with_connection("cache", "cache", ConnectionKind::Default);
        let graph = DependencyGraph::build(&blueprint);
        assert_eq!(graph.cyclic_services(), ["cache"]);
    }
}
