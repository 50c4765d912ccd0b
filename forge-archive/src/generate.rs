//! End-to-end generation: pipeline, then packaging.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use stackforge_blueprint::Blueprint;
use stackforge_codegen::{
    GenerationContext, Pipeline, RenderEngine, Stage, TemplateRepository, validate,
    pipeline::Plugin,
};
use stackforge_core::ServiceTypeRegistry;

use crate::{
    archive::{Archive, sweep_expired},
    config::GeneratorConfig,
    error::GenerationError,
    files::Summary,
    packager::Packager,
};

/// A successful generation: the archive plus the pipeline context that
/// produced it.
#[derive(Debug)]
pub struct Generated {
    pub archive: Archive,
    pub context: GenerationContext,
}

impl Generated {
    /// Hand the archive over by copying it into `dir`.
    ///
    /// # Errors
    ///
    /// Returns the error together with the context, now at
    /// [`Stage::Failed`]. The archive file is removed either way.
    pub fn deliver_to(self, dir: impl AsRef<Path>) -> Result<Delivered, Box<Undelivered>> {
        let Self {
            archive,
            mut context,
        } = self;
        match archive.deliver_to(dir) {
            Ok(path) => {
                context.stage = Stage::Delivered;
                Ok(Delivered { path, context })
            }
            Err(error) => {
                context.fail();
                Err(Box::new(Undelivered { error, context }))
            }
        }
    }
}

/// An archive copied to its destination.
#[derive(Debug)]
pub struct Delivered {
    pub path: PathBuf,
    /// Context at [`Stage::Delivered`].
    pub context: GenerationContext,
}

/// A delivery that failed.
#[derive(Debug)]
pub struct Undelivered {
    pub error: GenerationError,
    /// Context at [`Stage::Failed`].
    pub context: GenerationContext,
}

/// Turns blueprints into archives.
///
/// Holds no per-request state, so one generator can serve concurrent
/// requests from several threads.
pub struct Generator {
    pipeline: Pipeline,
    packager: Packager,
    registry: Arc<ServiceTypeRegistry>,
}

impl Generator {
    pub fn new(engine: Arc<RenderEngine>, packager: Packager) -> Self {
        let registry = Arc::clone(engine.registry());
        Self {
            pipeline: Pipeline::new(engine),
            packager,
            registry,
        }
    }

    /// Build a generator from `forge.toml` settings.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Templates`] when the configured template
    /// directory cannot be loaded.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, GenerationError> {
        let templates = match &config.templates.dir {
            Some(dir) => TemplateRepository::from_dir(dir)?,
            None => TemplateRepository::builtin(),
        };
        let engine = RenderEngine::new(
            Arc::new(ServiceTypeRegistry::builtin()),
            Arc::new(templates),
        );
        Ok(Self::new(
            Arc::new(engine),
            Packager::from_config(&config.output),
        ))
    }

    /// Add a pipeline plugin.
    pub fn with_plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.pipeline = self.pipeline.plugin(plugin);
        self
    }

    pub fn packager(&self) -> &Packager {
        &self.packager
    }

    /// Generate the project archive for `blueprint`.
    pub fn generate(&self, blueprint: Blueprint) -> Result<Archive, GenerationError> {
        self.run(blueprint).map(|generated| generated.archive)
    }

    /// Like [`generate`](Self::generate), also returning the pipeline context
    /// with its diagnostics.
    ///
    /// # Errors
    ///
    /// [`GenerationError::ValidationBlocked`] when validation finds blocking
    /// issues, in which case nothing has been written. Any other error leaves
    /// neither a working directory nor an archive behind.
    pub fn run(&self, blueprint: Blueprint) -> Result<Generated, GenerationError> {
        let mut context = GenerationContext::new(blueprint);
        let archive = self.run_in(&mut context)?;
        Ok(Generated { archive, context })
    }

    /// Run a request on a caller-owned context.
    ///
    /// On success the context is at [`Stage::Packaged`]. Any error past
    /// validation leaves it at [`Stage::Failed`] with whatever the pipeline
    /// produced before the failure.
    pub fn run_in(&self, ctx: &mut GenerationContext) -> Result<Archive, GenerationError> {
        self.pipeline
            .execute(ctx)
            .map_err(|err| GenerationError::Pipeline(format!("{err:#}")))?;

        if ctx.is_rejected() {
            let report = ctx.report.clone().unwrap_or_else(|| validate(&ctx.blueprint));
            tracing::info!(blocking = report.blocking.len(), "blueprint rejected");
            return Err(GenerationError::ValidationBlocked(Box::new(report)));
        }

        let (Some(enhanced), Some(descriptor)) = (&ctx.enhanced, &ctx.descriptor) else {
            let stage = ctx.stage;
            ctx.fail();
            return Err(GenerationError::Pipeline(format!(
                "pipeline stopped at stage '{stage}' without a descriptor"
            )));
        };

        let project = ctx.project_slug();
        let summary = Summary::new(enhanced, &self.registry);
        match self
            .packager
            .package(&project, descriptor, &ctx.rendered, &summary)
        {
            Ok(archive) => {
                ctx.stage = Stage::Packaged;
                Ok(archive)
            }
            Err(err) => {
                ctx.fail();
                Err(err)
            }
        }
    }

    /// Remove archives older than `retention` from the archive directory.
    pub fn sweep_expired(&self, retention: Duration) -> Result<usize, GenerationError> {
        sweep_expired(self.packager.archive_dir(), retention)
    }
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("phases", &self.pipeline.phase_names())
            .field("packager", &self.packager)
            .finish()
    }
}
