use std::{fmt, str::FromStr};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported service types.
///
/// The set is closed: every variant has an entry in the
/// [`ServiceTypeRegistry`](crate::ServiceTypeRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    FrontendFramework,
    BackendRuntime,
    RelationalDatabase,
    DocumentDatabase,
    Cache,
    ReverseProxy,
    Monitoring,
}

impl ServiceType {
    /// Every supported service type, in catalog order.
    pub const ALL: [ServiceType; 7] = [
        ServiceType::FrontendFramework,
        ServiceType::BackendRuntime,
        ServiceType::RelationalDatabase,
        ServiceType::DocumentDatabase,
        ServiceType::Cache,
        ServiceType::ReverseProxy,
        ServiceType::Monitoring,
    ];

    /// The kebab-case tag used in blueprints and template directories.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FrontendFramework => "frontend-framework",
            Self::BackendRuntime => "backend-runtime",
            Self::RelationalDatabase => "relational-database",
            Self::DocumentDatabase => "document-database",
            Self::Cache => "cache",
            Self::ReverseProxy => "reverse-proxy",
            Self::Monitoring => "monitoring",
        }
    }

    pub fn is_database(&self) -> bool {
        matches!(self, Self::RelationalDatabase | Self::DocumentDatabase)
    }

    pub fn is_cache(&self) -> bool {
        matches!(self, Self::Cache)
    }

    /// Whether other services talk to this one over HTTP.
    pub fn is_api(&self) -> bool {
        matches!(self, Self::BackendRuntime)
    }

    pub fn is_frontend(&self) -> bool {
        matches!(self, Self::FrontendFramework)
    }

    pub fn is_backend(&self) -> bool {
        matches!(self, Self::BackendRuntime)
    }

    pub fn is_monitoring(&self) -> bool {
        matches!(self, Self::Monitoring)
    }

    pub fn is_reverse_proxy(&self) -> bool {
        matches!(self, Self::ReverseProxy)
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a service type tag is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("unknown service type '{tag}'")]
#[diagnostic(
    code(stackforge::unknown_service_type),
    help(
        "valid types are: frontend-framework, backend-runtime, relational-database, document-database, cache, reverse-proxy, monitoring"
    )
)]
pub struct ParseServiceTypeError {
    pub tag: String,
}

impl FromStr for ServiceType {
    type Err = ParseServiceTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| ParseServiceTypeError { tag: s.to_string() })
    }
}
