//! Pipeline snapshot plugin for debugging.
//!
//! Captures the context after each phase and optionally writes it as
//! `<phase>.json` into a directory.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use eyre::{Result, WrapErr};
use serde::Serialize;

use super::{Diagnostic, GenerationContext, Plugin, Stage, phases::ValidationReport};
use crate::{
    compose::ComposeFile,
    enhance::{EnhancedBlueprint, Suggestion},
    graph::DependencyGraph,
    render::RenderedService,
};

/// The pipeline state right after a phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    pub phase: String,
    pub stage: Stage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ValidationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhanced: Option<EnhancedBlueprint>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<DependencyGraph>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rendered: Vec<RenderedService>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<ComposeFile>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PhaseSnapshot {
    fn capture(phase: &str, ctx: &GenerationContext) -> Self {
        Self {
            phase: phase.to_string(),
            stage: ctx.stage,
            report: ctx.report.clone(),
            enhanced: ctx.enhanced.clone(),
            suggestions: ctx.suggestions.clone(),
            graph: ctx.graph.clone(),
            rendered: ctx.rendered.clone(),
            descriptor: ctx.descriptor.clone(),
            diagnostics: ctx.diagnostics.clone(),
        }
    }

    fn write(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("failed to create {}", dir.display()))?;
        let path = dir.join(format!("{}.json", self.phase));
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json).wrap_err_with(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// A plugin that captures pipeline state after each phase.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use stackforge_blueprint::{Blueprint, ServiceNode};
/// use stackforge_codegen::pipeline::{Pipeline, SnapshotPlugin};
/// use stackforge_core::ServiceType;
///
/// let snapshots = Arc::new(SnapshotPlugin::new());
/// let pipeline = Pipeline::default().plugin(Arc::clone(&snapshots));
/// pipeline
///     .run(Blueprint::new("p").with_service(ServiceNode::new("c", ServiceType::Cache, "C")))
///     .unwrap();
///
/// assert_eq!(snapshots.snapshots().len(), 5);
/// ```
#[derive(Debug, Default)]
pub struct SnapshotPlugin {
    snapshots: RwLock<Vec<PhaseSnapshot>>,
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a snapshot plugin that writes each snapshot to `output_dir`.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    /// Get all collected snapshots.
    pub fn snapshots(&self) -> Vec<PhaseSnapshot> {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Write all snapshots to `dir`.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        let snapshots = self.snapshots.read().unwrap_or_else(PoisonError::into_inner);
        for snapshot in snapshots.iter() {
            snapshot.write(dir.as_ref())?;
        }
        Ok(())
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut GenerationContext) -> Result<()> {
        let snapshot = PhaseSnapshot::capture(phase, ctx);

        if let Some(dir) = &self.output_dir {
            snapshot.write(dir)?;
        }

        self.snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(snapshot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use stackforge_blueprint::{Blueprint, ServiceNode};
    use stackforge_core::ServiceType;
    use tempfile::TempDir;

    use super::*;
    use crate::pipeline::Pipeline;

    fn blueprint() -> Blueprint {
        Blueprint::new("p").with_service(ServiceNode::new("c", ServiceType::Cache, "C"))
    }

    #[test]
    fn test_snapshot_plugin_creation() {
        let plugin = SnapshotPlugin::new();
        assert!(plugin.snapshots().is_empty());
    }

    #[test]
    fn test_writes_one_file_per_phase() {
        let temp = TempDir::new().unwrap();
        let pipeline = Pipeline::default().plugin(SnapshotPlugin::with_output_dir(temp.path()));
        pipeline.run(blueprint()).unwrap();

        for phase in ["validate", "enhance", "resolve", "render", "synthesize"] {
            assert!(temp.path().join(format!("{phase}.json")).exists(), "{phase}");
        }

        let json = fs::read_to_string(temp.path().join("validate.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["stage"], "validated");
        assert!(value.get("enhanced").is_none());
    }

    #[test]
    fn test_write_to_dir() {
        let plugin = std::sync::Arc::new(SnapshotPlugin::new());
        Pipeline::default()
            .plugin(plugin.clone())
            .run(blueprint())
            .unwrap();

        let temp = TempDir::new().unwrap();
        plugin.write_to_dir(temp.path()).unwrap();

        let json = fs::read_to_string(temp.path().join("synthesize.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["descriptor"]["services"]["c"]["build"], "./c");
    }
}
