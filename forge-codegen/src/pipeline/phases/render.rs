//! Render phase - renders every service through the render engine.

use std::sync::Arc;

use eyre::{Result, eyre};

use crate::{
    pipeline::{Diagnostic, GenerationContext, Phase, Stage},
    render::{Fallback, RenderEngine},
};

/// Phase that renders each service with its dependency set.
///
/// Services that fall back to registry defaults are reported; a failing
/// service never affects its siblings.
pub struct RenderPhase {
    engine: Arc<RenderEngine>,
}

impl RenderPhase {
    pub fn new(engine: Arc<RenderEngine>) -> Self {
        Self { engine }
    }
}

impl Phase for RenderPhase {
    fn name(&self) -> &'static str {
        "render"
    }

    fn description(&self) -> &'static str {
        "Render build scripts and service files from templates"
    }

    fn run(&self, ctx: &mut GenerationContext) -> Result<()> {
        let project = ctx.project_slug();
        let (Some(enhanced), Some(graph)) = (&ctx.enhanced, &ctx.graph) else {
            return Err(eyre!("render requires an enhanced blueprint and its dependency graph"));
        };

        let rendered: Vec<_> = enhanced
            .services
            .iter()
            .map(|node| {
                let dependencies = graph.dependencies(enhanced, &node.id);
                self.engine.render(node, &dependencies, &project)
            })
            .collect();

        for service in &rendered {
            let diagnostic = match &service.fallback {
                None => continue,
                Some(Fallback::MissingTemplates) => Diagnostic::info(
                    self.name(),
                    format!("no templates for '{}', using the default build script", service.service_id),
                ),
                Some(Fallback::RenderFailed { reason }) => Diagnostic::warning(
                    self.name(),
                    format!("rendering '{}' failed, using defaults: {}", service.service_id, reason),
                ),
            };
            ctx.diagnostics.push(diagnostic.at_service(&service.service_id));
        }

        ctx.rendered = rendered;
        ctx.stage = Stage::Rendered;
        Ok(())
    }
}
