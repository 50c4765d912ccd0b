use stackforge_blueprint::Blueprint;
use stackforge_core::ServiceType;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that blocks services whose type is missing or not in the catalog.
pub struct ServiceTypeLint;

impl Lint for ServiceTypeLint {
    fn name(&self) -> &'static str {
        "service-type"
    }

    fn description(&self) -> &'static str {
        "Require every service to have a supported type"
    }

    fn check(&self, blueprint: &Blueprint, diagnostics: &mut Vec<Diagnostic>) {
        for service in &blueprint.services {
            let message = match service.kind.as_deref() {
                None => format!("service '{}' has no type", service.id),
                Some(tag) if tag.trim().is_empty() => {
                    format!("service '{}' has no type", service.id)
                }
                Some(tag) => match tag.parse::<ServiceType>() {
                    Ok(_) => continue,
                    Err(err) => format!("service '{}': {}", service.id, err),
                },
            };
            diagnostics.push(Diagnostic::error("validate", message).at_service(&service.id));
        }
    }
}
