//! Synthesize phase - builds the compose descriptor.

use std::sync::Arc;

use eyre::{Result, eyre};
use stackforge_core::ServiceTypeRegistry;

use crate::{
    compose::synthesize,
    pipeline::{GenerationContext, Phase, Stage},
};

pub struct SynthesizePhase {
    registry: Arc<ServiceTypeRegistry>,
}

impl SynthesizePhase {
    pub fn new(registry: Arc<ServiceTypeRegistry>) -> Self {
        Self { registry }
    }
}

impl Phase for SynthesizePhase {
    fn name(&self) -> &'static str {
        "synthesize"
    }

    fn description(&self) -> &'static str {
        "Build the compose descriptor wiring services together"
    }

    fn run(&self, ctx: &mut GenerationContext) -> Result<()> {
        let (Some(enhanced), Some(graph)) = (&ctx.enhanced, &ctx.graph) else {
            return Err(eyre!("synthesize requires an enhanced blueprint and its dependency graph"));
        };

        ctx.descriptor = Some(synthesize(enhanced, graph, &ctx.rendered, &self.registry));
        ctx.stage = Stage::Synthesized;
        Ok(())
    }
}
