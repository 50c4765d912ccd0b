//! Generate operation - blueprint to delivered archive.

use std::path::Path;

use eyre::{Context, Result};
use stackforge_archive::{GenerationError, Generator, GeneratorConfig};
use stackforge_blueprint::Blueprint;
use stackforge_codegen::{
    GenerationContext, pipeline::SnapshotPlugin, render::Fallback,
};

use crate::reports::{
    CheckReport, GenerateReport, GenerateResult, PackagedResult, ServiceLine, located,
};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Path of the blueprint file, for reporting.
    pub blueprint_path: &'a Path,
    /// Directory the archive is delivered to.
    pub output_dir: &'a Path,
    pub config: &'a GeneratorConfig,
    /// Directory for pipeline snapshots, if requested.
    pub snapshots: Option<&'a Path>,
}

/// Execute the generate operation.
///
/// A rejected blueprint is reported, not returned as an error.
pub fn generate(blueprint: Blueprint, opts: GenerateOptions) -> Result<GenerateReport> {
    let mut generator =
        Generator::from_config(opts.config).wrap_err("Failed to load templates")?;
    if let Some(dir) = opts.snapshots {
        generator = generator.with_plugin(SnapshotPlugin::with_output_dir(dir));
    }

    match generator.sweep_expired(opts.config.retention()) {
        Ok(removed) => tracing::debug!(removed, "swept archive directory"),
        Err(err) => tracing::warn!(error = %err, "failed to sweep archive directory"),
    }

    let project = blueprint.metadata.name.clone();
    let service_count = blueprint.services.len();

    let generated = match generator.run(blueprint) {
        Ok(generated) => generated,
        Err(GenerationError::ValidationBlocked(validation)) => {
            return Ok(GenerateReport {
                project: project.clone(),
                warnings: Vec::new(),
                result: GenerateResult::Rejected(CheckReport {
                    path: opts.blueprint_path.to_path_buf(),
                    project,
                    service_count,
                    validation: *validation,
                    suggestions: Vec::new(),
                }),
            });
        }
        Err(err) => return Err(err).wrap_err("Generation failed"),
    };

    let services = service_lines(&generated.context);
    let warnings = generated.context.warnings().map(located).collect();
    let size = generated.archive.size();
    let delivered = generated
        .deliver_to(opts.output_dir)
        .map_err(|undelivered| undelivered.error)
        .wrap_err("Failed to deliver archive")?;
    tracing::info!(archive = %delivered.path.display(), stage = %delivered.context.stage, "archive delivered");
    let archive = delivered.path;

    Ok(GenerateReport {
        project,
        warnings,
        result: GenerateResult::Packaged(PackagedResult {
            archive,
            size,
            services,
            snapshots: opts.snapshots.map(Path::to_path_buf),
        }),
    })
}

fn service_lines(ctx: &GenerationContext) -> Vec<ServiceLine> {
    ctx.rendered
        .iter()
        .map(|rendered| ServiceLine {
            slug: rendered.slug.clone(),
            service_type: rendered
                .service_type
                .map_or("unknown", |ty| ty.as_str())
                .to_string(),
            fallback: rendered.fallback.as_ref().map(|fallback| match fallback {
                Fallback::MissingTemplates => "registry defaults, no templates".to_string(),
                Fallback::RenderFailed { reason } => {
                    format!("registry defaults, render failed: {reason}")
                }
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use stackforge_archive::OutputConfig;
    use stackforge_blueprint::{ConnectionKind, ServiceNode};
    use stackforge_core::ServiceType;
    use tempfile::TempDir;

    use super::*;

    fn config(temp: &TempDir) -> GeneratorConfig {
        GeneratorConfig {
            output: OutputConfig {
                work_dir: temp.path().join("work"),
                archive_dir: temp.path().join("archives"),
                ..OutputConfig::default()
            },
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_generate_delivers_archive() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        let blueprint = Blueprint::new("shop")
            .with_service(ServiceNode::new("api", ServiceType::BackendRuntime, "API").with_port(8080))
            .with_service(ServiceNode::new("metrics", ServiceType::Monitoring, "Metrics").with_port(9090))
            .with_connection("metrics", "api", ConnectionKind::Default);
        let snapshots = temp.path().join("snapshots");

        let report = generate(
            blueprint,
            GenerateOptions {
                blueprint_path: Path::new("shop.json"),
                output_dir: &out,
                config: &config(&temp),
                snapshots: Some(&snapshots),
            },
        )
        .unwrap();

        let GenerateResult::Packaged(packaged) = report.result else {
            panic!("expected an archive");
        };
        assert!(packaged.archive.starts_with(&out));
        assert!(packaged.archive.exists());
        assert_eq!(packaged.services.len(), 2);
        assert!(packaged.services[1].fallback.is_some());
        assert!(snapshots.is_dir());
    }

    #[test]
    fn test_generate_reports_rejection() {
        let temp = TempDir::new().unwrap();

        let report = generate(
            Blueprint::new("empty"),
            GenerateOptions {
                blueprint_path: Path::new("empty.json"),
                output_dir: temp.path(),
                config: &config(&temp),
                snapshots: None,
            },
        )
        .unwrap();

        assert!(!report.is_packaged());
        assert!(!temp.path().join("work").exists());
    }
}
