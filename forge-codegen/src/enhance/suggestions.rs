//! Advisory architecture suggestions.

use serde::Serialize;
use stackforge_blueprint::Blueprint;
use stackforge_core::ServiceType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionKind {
    Monitoring,
    ReverseProxy,
    Caching,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// An improvement the author may want to make. Never applied automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub priority: Priority,
    pub description: String,
    pub impact: String,
}

impl Suggestion {
    fn new(
        kind: SuggestionKind,
        priority: Priority,
        description: &str,
        impact: &str,
    ) -> Self {
        Self {
            kind,
            priority,
            description: description.to_string(),
            impact: impact.to_string(),
        }
    }
}

/// Suggest services the blueprint is likely missing.
pub fn suggest_improvements(blueprint: &Blueprint) -> Vec<Suggestion> {
    let count = blueprint.services.len();
    let mut suggestions = Vec::new();

    if count > 3 && !blueprint.has_type(ServiceType::is_monitoring) {
        suggestions.push(Suggestion::new(
            SuggestionKind::Monitoring,
            Priority::Medium,
            "Add a monitoring service to collect metrics from your services",
            "Faster detection of failures and performance regressions",
        ));
    }

    if blueprint.has_type(ServiceType::is_frontend) && !blueprint.has_type(ServiceType::is_reverse_proxy)
    {
        suggestions.push(Suggestion::new(
            SuggestionKind::ReverseProxy,
            Priority::High,
            "Put a reverse proxy in front of the frontend",
            "Single entry point for TLS termination, routing and load balancing",
        ));
    }

    if blueprint.has_type(ServiceType::is_backend) && !blueprint.has_type(ServiceType::is_cache) && count > 2
    {
        suggestions.push(Suggestion::new(
            SuggestionKind::Caching,
            Priority::Medium,
            "Add a cache in front of frequently read data",
            "Lower response times and reduced database load",
        ));
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use stackforge_blueprint::ServiceNode;

    use super::*;

    fn with(types: &[ServiceType]) -> Blueprint {
        types
            .iter()
            .enumerate()
            .fold(Blueprint::new("p"), |bp, (i, ty)| {
                bp.with_service(ServiceNode::new(format!("s{i}"), *ty, format!("S{i}")))
            })
    }

    fn kinds(blueprint: &Blueprint) -> Vec<SuggestionKind> {
        suggest_improvements(blueprint).into_iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_monitoring_for_large_blueprints() {
        let bp = with(&[
            ServiceType::BackendRuntime,
            ServiceType::BackendRuntime,
            ServiceType::RelationalDatabase,
            ServiceType::Cache,
        ]);
        assert_eq!(kinds(&bp), [SuggestionKind::Monitoring]);

        let small = with(&[ServiceType::BackendRuntime, ServiceType::Cache]);
        assert!(kinds(&small).is_empty());
    }

    #[test]
    fn test_reverse_proxy_is_high_priority() {
        let bp = with(&[ServiceType::FrontendFramework]);
        let suggestions = suggest_improvements(&bp);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].kind, SuggestionKind::ReverseProxy);
        assert_eq!(suggestions[0].priority, Priority::High);

        let proxied = with(&[ServiceType::FrontendFramework, ServiceType::ReverseProxy]);
        assert!(kinds(&proxied).is_empty());
    }

    #[test]
    fn test_caching_needs_more_than_two_services() {
        let bp = with(&[
            ServiceType::BackendRuntime,
            ServiceType::RelationalDatabase,
            ServiceType::DocumentDatabase,
        ]);
        assert_eq!(kinds(&bp), [SuggestionKind::Caching]);

        let two = with(&[ServiceType::BackendRuntime, ServiceType::RelationalDatabase]);
        assert!(kinds(&two).is_empty());
    }

    #[test]
    fn test_all_rules_fire_in_order() {
        let bp = with(&[
            ServiceType::FrontendFramework,
            ServiceType::BackendRuntime,
            ServiceType::RelationalDatabase,
            ServiceType::DocumentDatabase,
        ]);
        assert_eq!(
            kinds(&bp),
            [
                SuggestionKind::Monitoring,
                SuggestionKind::ReverseProxy,
                SuggestionKind::Caching
            ]
        );
    }
}
