//! Static catalog of per-type service defaults.
//!
//! The registry is built once at startup and shared read-only between
//! requests.

use indexmap::IndexMap;

use crate::{HealthCheck, ResourceLimits, ServiceType};

const IDLE_COMMAND: &str = r#"CMD ["sh", "-c", "tail -f /dev/null"]"#;

/// Defaults applied to services of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDefaults {
    /// Port the service listens on when the blueprint sets none
    pub port: u16,
    /// Container base image
    pub image: String,
    pub health_check: HealthCheck,
    pub resources: ResourceLimits,
    /// Build script used verbatim when no template provides one
    pub build_script: String,
}

impl ServiceDefaults {
    pub fn new(
        port: u16,
        image: impl Into<String>,
        health_check: HealthCheck,
        resources: ResourceLimits,
    ) -> Self {
        let image = image.into();
        let build_script = format!("FROM {image}\n");
        Self {
            port,
            image,
            health_check,
            resources,
            build_script,
        }
    }

    /// Append a no-op startup command to the default build script.
    ///
    /// Used for bare runtime images that have no useful entrypoint of their own.
    pub fn idle(mut self) -> Self {
        self.build_script.push_str(IDLE_COMMAND);
        self.build_script.push('\n');
        self
    }
}

/// Catalog mapping each [`ServiceType`] to its [`ServiceDefaults`].
#[derive(Debug, Clone)]
pub struct ServiceTypeRegistry {
    entries: IndexMap<ServiceType, ServiceDefaults>,
    fallback: ServiceDefaults,
}

impl ServiceTypeRegistry {
    /// The built-in catalog covering every [`ServiceType`].
    pub fn builtin() -> Self {
        let mut entries = IndexMap::new();

        entries.insert(
            ServiceType::FrontendFramework,
            ServiceDefaults::new(
                3000,
                "node:18-alpine",
                HealthCheck::http("http://localhost:3000/"),
                ResourceLimits::new("0.5", "512M"),
            )
            .idle(),
        );
        entries.insert(
            ServiceType::BackendRuntime,
            ServiceDefaults::new(
                8080,
                "node:18-alpine",
                HealthCheck::http("http://localhost:8080/health"),
                ResourceLimits::new("1.0", "1G"),
            )
            .idle(),
        );
        entries.insert(
            ServiceType::RelationalDatabase,
            ServiceDefaults::new(
                5432,
                "postgres:15-alpine",
                HealthCheck::command("pg_isready -U postgres"),
                ResourceLimits::new("1.0", "1G"),
            ),
        );
        entries.insert(
            ServiceType::DocumentDatabase,
            ServiceDefaults::new(
                27017,
                "mongo:6",
                HealthCheck::command("mongosh --eval \"db.adminCommand('ping')\""),
                ResourceLimits::new("1.0", "1G"),
            ),
        );
        entries.insert(
            ServiceType::Cache,
            ServiceDefaults::new(
                6379,
                "redis:7-alpine",
                HealthCheck::command("redis-cli ping"),
                ResourceLimits::new("0.5", "256M"),
            ),
        );
        entries.insert(
            ServiceType::ReverseProxy,
            ServiceDefaults::new(
                80,
                "nginx:alpine",
                HealthCheck::http("http://localhost:80/"),
                ResourceLimits::new("0.5", "256M"),
            ),
        );
        entries.insert(
            ServiceType::Monitoring,
            ServiceDefaults::new(
                9090,
                "prom/prometheus:latest",
                HealthCheck::http("http://localhost:9090/-/healthy"),
                ResourceLimits::new("0.5", "512M"),
            ),
        );

        let fallback = ServiceDefaults::new(
            8080,
            "alpine:3.19",
            HealthCheck::command("exit 0"),
            ResourceLimits::new("0.25", "128M"),
        )
        .idle();

        Self { entries, fallback }
    }

    /// Replace the defaults for one service type.
    pub fn with_defaults(mut self, ty: ServiceType, defaults: ServiceDefaults) -> Self {
        self.entries.insert(ty, defaults);
        self
    }

    /// Defaults for `ty`.
    pub fn defaults(&self, ty: ServiceType) -> &ServiceDefaults {
        self.entries.get(&ty).unwrap_or(&self.fallback)
    }

    /// Defaults for a service whose type is missing or unknown.
    pub fn fallback(&self) -> &ServiceDefaults {
        &self.fallback
    }

    /// Defaults for an optional type, falling back when absent.
    pub fn lookup(&self, ty: Option<ServiceType>) -> &ServiceDefaults {
        ty.map(|ty| self.defaults(ty)).unwrap_or(&self.fallback)
    }

    /// Iterate over the catalog in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ServiceType, &ServiceDefaults)> {
        self.entries.iter().map(|(ty, defaults)| (*ty, defaults))
    }
}

impl Default for ServiceTypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_every_type() {
        let registry = ServiceTypeRegistry::builtin();
        for ty in ServiceType::ALL {
            assert!(registry.iter().any(|(t, _)| t == ty), "missing {ty}");
        }
    }

    #[test]
    fn test_known_defaults() {
        let registry = ServiceTypeRegistry::builtin();
        let postgres = registry.defaults(ServiceType::RelationalDatabase);
        assert_eq!(postgres.port, 5432);
        assert_eq!(postgres.image, "postgres:15-alpine");
        assert_eq!(postgres.build_script, "FROM postgres:15-alpine\n");
        assert_eq!(postgres.health_check.test[0], "CMD-SHELL");
    }

    #[test]
    fn test_runtime_images_idle() {
        let registry = ServiceTypeRegistry::builtin();
        let backend = registry.defaults(ServiceType::BackendRuntime);
        assert!(backend.build_script.starts_with("FROM node:18-alpine\n"));
        assert!(backend.build_script.contains("tail -f /dev/null"));
    }

    #[test]
    fn test_lookup_without_type_uses_fallback() {
        let registry = ServiceTypeRegistry::builtin();
        assert_eq!(registry.lookup(None).image, "alpine:3.19");
        assert_eq!(registry.lookup(Some(ServiceType::Cache)).port, 6379);
    }

    #[test]
    fn test_with_defaults_overrides() {
        let registry = ServiceTypeRegistry::builtin().with_defaults(
            ServiceType::Cache,
            ServiceDefaults::new(
                11211,
                "memcached:1.6",
                HealthCheck::command("true"),
                ResourceLimits::new("0.25", "64M"),
            ),
        );
        assert_eq!(registry.defaults(ServiceType::Cache).image, "memcached:1.6");
    }
}
