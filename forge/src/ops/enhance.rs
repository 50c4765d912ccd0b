//! Enhance operation - registry defaults and suggestions.

use std::path::Path;

use eyre::{Context, Result};
use stackforge_blueprint::{Blueprint, ServiceConfig};
use stackforge_codegen::suggest_improvements;
use stackforge_core::{ServiceTypeRegistry, write_file};

use crate::reports::{EnhanceReport, FilledDefaults};

/// Enhance the blueprint, writing the result to `output` when given.
pub fn enhance(blueprint: &Blueprint, output: Option<&Path>) -> Result<EnhanceReport> {
    let registry = ServiceTypeRegistry::builtin();
    let enhanced = stackforge_codegen::enhance(blueprint, &registry);

    let filled = blueprint
        .services
        .iter()
        .zip(&enhanced.services)
        .filter_map(|(before, after)| {
            let keys = filled_keys(&before.config, &after.config);
            (!keys.is_empty()).then(|| FilledDefaults {
                service: before.label().to_string(),
                keys,
            })
        })
        .collect();

    let json = enhanced.as_blueprint().to_json();
    if let Some(path) = output {
        write_file(path, &format!("{json}\n"))
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;
    }

    Ok(EnhanceReport {
        written_to: output.map(Path::to_path_buf),
        json,
        filled,
        suggestions: suggest_improvements(blueprint),
    })
}

fn filled_keys(before: &ServiceConfig, after: &ServiceConfig) -> Vec<&'static str> {
    [
        ("restart", before.restart.is_none() && after.restart.is_some()),
        (
            "healthCheck",
            before.health_check.is_none() && after.health_check.is_some(),
        ),
        (
            "resources",
            before.resources.is_none() && after.resources.is_some(),
        ),
    ]
    .into_iter()
    .filter_map(|(key, filled)| filled.then_some(key))
    .collect()
}
