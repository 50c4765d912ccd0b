//! Pipeline plugin trait.

use std::sync::Arc;

use eyre::Result;

use super::GenerationContext;

/// A plugin that hooks into the generation pipeline.
///
/// Plugins receive callbacks before and after each phase runs and may
/// inspect or modify the context.
///
/// # Example
///
/// ```
/// use eyre::Result;
/// use stackforge_codegen::pipeline::{GenerationContext, Plugin};
///
/// struct TracePlugin;
///
/// impl Plugin for TracePlugin {
///     fn name(&self) -> &'static str {
///         "trace"
///     }
///
///     fn on_after_phase(&self, phase: &str, ctx: &mut GenerationContext) -> Result<()> {
///         println!("{phase} -> {}", ctx.stage);
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Called before a phase runs. Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut GenerationContext) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes. Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut GenerationContext) -> Result<()> {
        Ok(())
    }
}

/// Lets a shared plugin be registered while the caller keeps a handle.
impl<P: Plugin + ?Sized> Plugin for Arc<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn on_before_phase(&self, phase: &str, ctx: &mut GenerationContext) -> Result<()> {
        (**self).on_before_phase(phase, ctx)
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut GenerationContext) -> Result<()> {
        (**self).on_after_phase(phase, ctx)
    }
}
