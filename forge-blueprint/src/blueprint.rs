use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use stackforge_core::{
    HealthCheck, ResourceLimits, ServiceType, ServiceTypeRegistry, sanitize_name,
};

/// Network name used when the blueprint names none.
pub const DEFAULT_NETWORK: &str = "app-network";

/// Orchestration descriptor schema version used when the blueprint names none.
pub const DEFAULT_SCHEMA_VERSION: &str = "3.8";

/// Root of a blueprint document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    /// Service nodes
    #[serde(default)]
    pub services: Vec<ServiceNode>,

    /// Directed connections, in editor order
    #[serde(default)]
    pub connections: Vec<Connection>,

    /// Project metadata
    #[serde(default)]
    pub metadata: Metadata,
}

impl Blueprint {
    /// Create an empty blueprint for the named project.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            metadata: Metadata {
                name: name.into(),
                ..Metadata::default()
            },
            ..Self::default()
        }
    }

    /// Add a service node.
    pub fn with_service(mut self, service: ServiceNode) -> Self {
        self.services.push(service);
        self
    }

    /// Add a connection stating that `source` depends on `target`.
    pub fn with_connection(
        mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        kind: ConnectionKind,
    ) -> Self {
        let id = format!("c{}", self.connections.len() + 1);
        self.connections.push(Connection {
            id,
            source: source.into(),
            target: target.into(),
            kind,
        });
        self
    }

    /// Look up a service node by id.
    pub fn service(&self, id: &str) -> Option<&ServiceNode> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Connections whose both endpoints name an existing service.
    pub fn resolved_connections(&self) -> impl Iterator<Item = &Connection> + '_ {
        self.connections
            .iter()
            .filter(|c| self.service(&c.source).is_some() && self.service(&c.target).is_some())
    }

    /// Check whether any resolved connection touches the given service id.
    pub fn is_connected(&self, id: &str) -> bool {
        self.resolved_connections()
            .any(|c| c.source == id || c.target == id)
    }

    /// Iterate over the parsed types of all services, skipping unknown ones.
    pub fn service_types(&self) -> impl Iterator<Item = ServiceType> + '_ {
        self.services.iter().filter_map(ServiceNode::service_type)
    }

    /// Check whether any service has the given type.
    pub fn has_type(&self, predicate: impl Fn(&ServiceType) -> bool) -> bool {
        self.service_types().any(|ty| predicate(&ty))
    }

    /// Sanitized project name used for the archive and its root directory.
    pub fn project_slug(&self) -> String {
        sanitize_name(&self.metadata.name)
    }
}

/// Project metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Project name
    #[serde(default = "default_project_name")]
    pub name: String,

    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Network all services join
    #[serde(default = "default_network")]
    pub network_name: String,

    /// Orchestration descriptor schema version
    #[serde(default = "default_schema_version")]
    pub version: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            name: default_project_name(),
            description: None,
            network_name: default_network(),
            version: default_schema_version(),
        }
    }
}

fn default_project_name() -> String {
    "untitled-project".to_string()
}

fn default_network() -> String {
    DEFAULT_NETWORK.to_string()
}

fn default_schema_version() -> String {
    DEFAULT_SCHEMA_VERSION.to_string()
}

/// One service in the blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceNode {
    /// Unique id within the blueprint
    pub id: String,

    /// Raw service type tag; parsed lazily so unknown tags can be reported
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Display label, also used for directory and compose names
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub config: ServiceConfig,

    /// Editor layout hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl ServiceNode {
    pub fn new(id: impl Into<String>, ty: ServiceType, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: Some(ty.as_str().to_string()),
            name: name.into(),
            config: ServiceConfig::default(),
            position: None,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.config.port = Some(port);
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.environment.insert(key.into(), value.into());
        self
    }

    pub fn with_volume(mut self, volume: impl Into<String>) -> Self {
        self.config.volumes.push(volume.into());
        self
    }

    /// The parsed service type, or `None` when missing or unknown.
    pub fn service_type(&self) -> Option<ServiceType> {
        self.kind.as_deref().and_then(|tag| tag.parse().ok())
    }

    /// Label shown to people: the name, or the id when the name is blank.
    pub fn label(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Sanitized name used for the service directory and compose key.
    pub fn slug(&self) -> String {
        sanitize_name(self.label())
    }

    /// Configured port, or the registry default for the service type.
    pub fn port(&self, registry: &ServiceTypeRegistry) -> u16 {
        self.config
            .port
            .unwrap_or_else(|| registry.lookup(self.service_type()).port)
    }
}

/// Per-service configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::string_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub environment: IndexMap<String, String>,

    /// Mount specs, e.g. `db-data:/var/lib/postgresql/data`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheck>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceLimits>,

    /// Settings this crate does not interpret, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ServiceConfig {
    /// Check whether a password is configured, either as an environment
    /// variable or as a `password` setting.
    pub fn has_password(&self) -> bool {
        self.environment
            .keys()
            .any(|key| key.to_ascii_uppercase().contains("PASSWORD"))
            || self
                .extra
                .keys()
                .any(|key| key.eq_ignore_ascii_case("password"))
    }
}

/// Editor layout position. Carries no meaning for generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Directed edge: `source` depends on `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    #[serde(default)]
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, alias = "type")]
    pub kind: ConnectionKind,
}

/// What a connection carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionKind {
    Api,
    Database,
    Cache,
    #[default]
    Default,
}

impl ConnectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Database => "database",
            Self::Cache => "cache",
            Self::Default => "default",
        }
    }
}

impl std::fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
