//! Best-practice enhancement of blueprints.
//!
//! [`enhance`] fills health checks, resource limits and restart policies from
//! the [`ServiceTypeRegistry`]. Values the author set are never replaced.

mod suggestions;

use std::ops::Deref;

use serde::Serialize;
use stackforge_blueprint::{Blueprint, ServiceNode};
use stackforge_core::{DEFAULT_RESTART_POLICY, ServiceTypeRegistry};
pub use suggestions::{Priority, Suggestion, SuggestionKind, suggest_improvements};

/// A blueprint whose every service carries a health check, resource limits
/// and a restart policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EnhancedBlueprint(Blueprint);

impl EnhancedBlueprint {
    pub fn as_blueprint(&self) -> &Blueprint {
        &self.0
    }

    pub fn into_inner(self) -> Blueprint {
        self.0
    }
}

impl Deref for EnhancedBlueprint {
    type Target = Blueprint;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Blueprint> for EnhancedBlueprint {
    fn as_ref(&self) -> &Blueprint {
        &self.0
    }
}

/// Apply registry defaults to every service, leaving set fields untouched.
///
/// Pure and idempotent: enhancing an enhanced blueprint changes nothing.
pub fn enhance(blueprint: &Blueprint, registry: &ServiceTypeRegistry) -> EnhancedBlueprint {
    let mut enhanced = blueprint.clone();
    for node in &mut enhanced.services {
        enhance_node(node, registry);
    }
    EnhancedBlueprint(enhanced)
}

fn enhance_node(node: &mut ServiceNode, registry: &ServiceTypeRegistry) {
    let defaults = registry.lookup(node.service_type());
    let config = &mut node.config;

    if config.health_check.is_none() {
        config.health_check = Some(defaults.health_check.clone());
    }
    if config.resources.is_none() {
        config.resources = Some(defaults.resources.clone());
    }
    if config.restart.is_none() {
        config.restart = Some(DEFAULT_RESTART_POLICY.to_string());
    }
}
