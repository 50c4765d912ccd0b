//! Resolve phase - builds the dependency graph.

use eyre::{Result, eyre};

use crate::{
    graph::DependencyGraph,
    pipeline::{Diagnostic, GenerationContext, Phase},
};

/// Phase that resolves every service's dependency set.
///
/// Cycles are reported as info diagnostics and left in place.
pub struct ResolvePhase;

impl Phase for ResolvePhase {
    fn name(&self) -> &'static str {
        "resolve"
    }

    fn description(&self) -> &'static str {
        "Resolve service dependencies from connections"
    }

    fn run(&self, ctx: &mut GenerationContext) -> Result<()> {
        let enhanced = ctx
            .enhanced
            .as_ref()
            .ok_or_else(|| eyre!("resolve requires an enhanced blueprint"))?;
        let graph = DependencyGraph::build(enhanced);

        let cyclic = graph.cyclic_services();
        if !cyclic.is_empty() {
            let diagnostic = Diagnostic::info(
                self.name(),
                format!("dependency cycle between services: {}", cyclic.join(", ")),
            )
            .at("connections");
            ctx.diagnostics.push(diagnostic);
        }

        ctx.graph = Some(graph);
        Ok(())
    }
}
