//! Pipeline orchestrator.

use std::sync::Arc;

use eyre::Result;
use stackforge_blueprint::Blueprint;

use super::{
    GenerationContext, Phase, Plugin,
    phases::{EnhancePhase, RenderPhase, ResolvePhase, SynthesizePhase, ValidatePhase},
};
use crate::render::RenderEngine;

/// The generation pipeline.
///
/// Runs validate, enhance, resolve, render and synthesize, followed by any
/// custom phases, calling plugin hooks around each phase. A blueprint that
/// fails validation stops the run after the validate phase.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use stackforge_blueprint::{Blueprint, ServiceNode};
/// use stackforge_codegen::{pipeline::Pipeline, render::RenderEngine};
/// use stackforge_core::ServiceType;
///
/// let blueprint = Blueprint::new("shop")
///     .with_service(ServiceNode::new("api", ServiceType::BackendRuntime, "API"));
///
/// let ctx = Pipeline::new(Arc::new(RenderEngine::builtin()))
///     .run(blueprint)
///     .unwrap();
/// assert!(ctx.descriptor.is_some());
/// ```
pub struct Pipeline {
    builtin: Vec<Box<dyn Phase>>,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a pipeline with the built-in phases.
    pub fn new(engine: Arc<RenderEngine>) -> Self {
        let registry = Arc::clone(engine.registry());
        Self {
            builtin: vec![
                Box::new(ValidatePhase::new()),
                Box::new(EnhancePhase::new(Arc::clone(&registry))),
                Box::new(ResolvePhase),
                Box::new(RenderPhase::new(engine)),
                Box::new(SynthesizePhase::new(registry)),
            ],
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Replace the built-in validate phase, e.g. to add custom lints.
    pub fn validator(mut self, validate: ValidatePhase) -> Self {
        self.builtin[0] = Box::new(validate);
        self
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Names of all phases, in execution order.
    pub fn phase_names(&self) -> Vec<&'static str> {
        self.builtin
            .iter()
            .chain(&self.phases)
            .map(|phase| phase.name())
            .collect()
    }

    /// Run the pipeline on a blueprint.
    ///
    /// A rejected blueprint is not an error: the returned context carries the
    /// report and [`Stage::Rejected`](super::Stage::Rejected).
    ///
    /// # Errors
    ///
    /// Returns an error if a phase or plugin fails fatally.
    pub fn run(&self, blueprint: Blueprint) -> Result<GenerationContext> {
        let mut ctx = GenerationContext::new(blueprint);
        self.execute(&mut ctx)?;
        Ok(ctx)
    }

    /// Run the pipeline on an existing context.
    ///
    /// On error past validation the context is left at
    /// [`Stage::Failed`](super::Stage::Failed) with everything produced so
    /// far.
    pub fn execute(&self, ctx: &mut GenerationContext) -> Result<()> {
        for phase in self.builtin.iter().chain(&self.phases) {
            if let Err(err) = self.run_phase(phase.as_ref(), ctx) {
                ctx.fail();
                tracing::warn!(phase = phase.name(), stage = %ctx.stage, "phase failed");
                return Err(err);
            }
            if ctx.is_rejected() {
                tracing::debug!(
                    blocking = ctx.error_count(),
                    "blueprint rejected, stopping pipeline"
                );
                break;
            }
        }

        Ok(())
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut GenerationContext) -> Result<()> {
        let phase_name = phase.name();
        tracing::debug!(phase = phase_name, "starting phase");

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        tracing::debug!(phase = phase_name, stage = %ctx.stage, "finished phase");
        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Arc::new(RenderEngine::builtin()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use stackforge_blueprint::{ConnectionKind, ServiceNode};
    use stackforge_core::ServiceType;

    use super::*;
    use crate::pipeline::{Diagnostic, Lint, Stage};

    struct CountingPlugin {
        before_count: Arc<AtomicUsize>,
        after_count: Arc<AtomicUsize>,
    }

    impl CountingPlugin {
        fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let before = Arc::new(AtomicUsize::new(0));
            let after = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    before_count: before.clone(),
                    after_count: after.clone(),
                },
                before,
                after,
            )
        }
    }

    impl Plugin for CountingPlugin {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_before_phase(&self, _phase: &str, _ctx: &mut GenerationContext) -> Result<()> {
            self.before_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_after_phase(&self, _phase: &str, _ctx: &mut GenerationContext) -> Result<()> {
            self.after_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct StagePlugin(Arc<Mutex<Vec<Stage>>>);

    impl Plugin for StagePlugin {
        fn name(&self) -> &'static str {
            "stages"
        }

        fn on_after_phase(&self, _phase: &str, ctx: &mut GenerationContext) -> Result<()> {
            self.0.lock().unwrap().push(ctx.stage);
            Ok(())
        }
    }

    fn shop() -> Blueprint {
        Blueprint::new("shop")
            .with_service(ServiceNode::new("api", ServiceType::BackendRuntime, "API"))
            .with_service(ServiceNode::new("db", ServiceType::RelationalDatabase, "DB"))
            .with_connection("api", "db", ConnectionKind::Database)
    }

    #[test]
    fn test_pipeline_runs_phases() {
        let ctx = Pipeline::default().run(shop()).expect("pipeline should succeed");

        assert_eq!(ctx.stage, Stage::Synthesized);
        assert!(ctx.report.as_ref().unwrap().valid());
        assert!(ctx.enhanced.is_some());
        assert!(ctx.graph.is_some());
        assert_eq!(ctx.rendered.len(), 2);
        assert_eq!(ctx.descriptor.unwrap().services["api"].depends_on, ["db"]);
    }

    #[test]
    fn test_pipeline_plugin_hooks() {
        let (plugin, before_count, after_count) = CountingPlugin::new();

        let pipeline = Pipeline::default().plugin(plugin);
        pipeline.run(shop()).expect("pipeline should succeed");

        assert_eq!(before_count.load(Ordering::SeqCst), 5);
        assert_eq!(after_count.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_stage_progression() {
        let stages = Arc::new(Mutex::new(Vec::new()));
        Pipeline::default()
            .plugin(StagePlugin(stages.clone()))
            .run(shop())
            .unwrap();

        assert_eq!(
            *stages.lock().unwrap(),
            [
                Stage::Validated,
                Stage::Enhanced,
                Stage::Enhanced,
                Stage::Rendered,
                Stage::Synthesized
            ]
        );
    }

    #[test]
    fn test_rejected_blueprint_stops_after_validate() {
        let (plugin, before_count, _) = CountingPlugin::new();
        let ctx = Pipeline::default()
            .plugin(plugin)
            .run(Blueprint::new("empty"))
            .unwrap();

        assert_eq!(ctx.stage, Stage::Rejected);
        assert_eq!(before_count.load(Ordering::SeqCst), 1);
        assert!(ctx.enhanced.is_none());
        assert!(ctx.rendered.is_empty());
    }

    #[test]
    fn test_custom_validator_and_phase() {
        struct NoDatabases;
        impl Lint for NoDatabases {
            fn name(&self) -> &'static str {
                "no-databases"
            }
            fn description(&self) -> &'static str {
                "Forbid databases"
            }
            fn check(&self, blueprint: &Blueprint, diagnostics: &mut Vec<Diagnostic>) {
                if blueprint.has_type(ServiceType::is_database) {
                    diagnostics.push(Diagnostic::error("validate", "databases are forbidden"));
                }
            }
        }

        struct Marker;
        impl Phase for Marker {
            fn name(&self) -> &'static str {
                "marker"
            }
            fn description(&self) -> &'static str {
                "Leave a note"
            }
            fn run(&self, ctx: &mut GenerationContext) -> Result<()> {
                ctx.add_info("marker", "done");
                Ok(())
            }
        }

        let pipeline = Pipeline::default().phase(Marker);
        assert_eq!(
            pipeline.phase_names(),
            ["validate", "enhance", "resolve", "render", "synthesize", "marker"]
        );
        let ctx = pipeline.run(shop()).unwrap();
        assert!(ctx.diagnostics.iter().any(|d| d.phase == "marker"));

        let strict = Pipeline::default().validator(ValidatePhase::new().with_lint(NoDatabases));
        assert!(strict.run(shop()).unwrap().is_rejected());
    }

    #[test]
    fn test_failing_phase_marks_context_failed() {
        struct Broken;
        impl Phase for Broken {
            fn name(&self) -> &'static str {
                "broken"
            }
            fn description(&self) -> &'static str {
                "Always fails"
            }
            fn run(&self, _ctx: &mut GenerationContext) -> Result<()> {
                Err(eyre::eyre!("disk on fire"))
            }
        }

        let mut ctx = GenerationContext::new(shop());
        let err = Pipeline::default()
            .phase(Broken)
            .execute(&mut ctx)
            .unwrap_err();

        assert_eq!(err.to_string(), "disk on fire");
        assert_eq!(ctx.stage, Stage::Failed);
        assert!(ctx.descriptor.is_some());
    }

    #[test]
    fn test_cycle_reported_as_info() {
        let blueprint = shop().with_connection("db", "api", ConnectionKind::Default);
        let ctx = Pipeline::default().run(blueprint).unwrap();

        assert_eq!(ctx.stage, Stage::Synthesized);
        assert!(
            ctx.diagnostics
                .iter()
                .any(|d| d.phase == "resolve" && d.message.contains("api, db"))
        );
    }
}
