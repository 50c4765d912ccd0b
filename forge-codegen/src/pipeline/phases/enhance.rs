//! Enhance phase - applies registry defaults.

use std::sync::Arc;

use eyre::Result;
use stackforge_core::ServiceTypeRegistry;

use crate::{
    enhance::{enhance, suggest_improvements},
    pipeline::{GenerationContext, Phase, Stage},
};

/// Phase that fills health checks, resources and restart policies, and
/// records improvement suggestions.
pub struct EnhancePhase {
    registry: Arc<ServiceTypeRegistry>,
}

impl EnhancePhase {
    pub fn new(registry: Arc<ServiceTypeRegistry>) -> Self {
        Self { registry }
    }
}

impl Phase for EnhancePhase {
    fn name(&self) -> &'static str {
        "enhance"
    }

    fn description(&self) -> &'static str {
        "Apply service type defaults and suggest improvements"
    }

    fn run(&self, ctx: &mut GenerationContext) -> Result<()> {
        ctx.enhanced = Some(enhance(&ctx.blueprint, &self.registry));
        ctx.suggestions = suggest_improvements(&ctx.blueprint);
        ctx.stage = Stage::Enhanced;
        Ok(())
    }
}
