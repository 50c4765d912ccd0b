//! Template render engine.
//!
//! [`RenderEngine`] turns one service node and its dependency set into a
//! [`RenderedService`]: a build script plus the files of the service
//! directory. Rendering never fails. A service whose renderer errors is
//! rendered from the registry defaults instead and marked with a
//! [`Fallback`].

mod error;
mod renderer;
pub mod renderers;
mod repository;
mod request;
mod template;

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use stackforge_blueprint::ServiceNode;
use stackforge_core::{ServiceType, ServiceTypeRegistry};

pub use error::{RenderError, TemplateError};
pub use renderer::{RendererRegistry, ServiceRenderer};
pub use repository::{BUILD_SCRIPT, TemplateRepository, TemplateSet};
pub use request::RenderRequest;
pub use template::{Template, TemplateContext};

use crate::generation::{FileCategory, FileEntry, FileRegistry};

/// Why a service was rendered from defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Fallback {
    /// The repository has no template set for the service type.
    MissingTemplates,
    /// The renderer failed.
    RenderFailed { reason: String },
}

/// Rendered output for one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedService {
    pub service_id: String,
    /// Directory name inside the project.
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<ServiceType>,
    /// Contents of the service's `Dockerfile`.
    pub build_script: String,
    pub files: FileRegistry,
    /// Variables the renderer wants in the service environment.
    pub environment: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<Fallback>,
}

impl RenderedService {
    /// Registry-default output: the default build script and no files.
    pub fn fallback(node: &ServiceNode, registry: &ServiceTypeRegistry, fallback: Fallback) -> Self {
        let service_type = node.service_type();
        Self {
            service_id: node.id.clone(),
            slug: node.slug(),
            service_type,
            build_script: registry.lookup(service_type).build_script.clone(),
            files: FileRegistry::new(),
            environment: IndexMap::new(),
            fallback: Some(fallback),
        }
    }

    pub fn used_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn config_files(&self) -> impl Iterator<Item = &FileEntry> {
        self.files.entries_by_category(FileCategory::Config)
    }

    pub fn source_files(&self) -> impl Iterator<Item = &FileEntry> {
        self.files.entries_by_category(FileCategory::Source)
    }
}

/// Shared rendering machinery.
///
/// Built once and shared between requests through an [`Arc`].
#[derive(Debug)]
pub struct RenderEngine {
    registry: Arc<ServiceTypeRegistry>,
    templates: Arc<TemplateRepository>,
    renderers: RendererRegistry,
}

impl RenderEngine {
    /// Engine with the built-in renderers.
    pub fn new(registry: Arc<ServiceTypeRegistry>, templates: Arc<TemplateRepository>) -> Self {
        Self {
            registry,
            templates,
            renderers: RendererRegistry::builtin(),
        }
    }

    /// Engine with the built-in registry, templates and renderers.
    pub fn builtin() -> Self {
        Self::new(
            Arc::new(ServiceTypeRegistry::builtin()),
            Arc::new(TemplateRepository::builtin()),
        )
    }

    /// Register a renderer, replacing the renderer for its type.
    pub fn with_renderer(mut self, renderer: impl ServiceRenderer + 'static) -> Self {
        self.renderers.register(renderer);
        self
    }

    pub fn registry(&self) -> &Arc<ServiceTypeRegistry> {
        &self.registry
    }

    pub fn templates(&self) -> &Arc<TemplateRepository> {
        &self.templates
    }

    /// Render one service.
    ///
    /// `project` is the sanitized project name.
    pub fn render(
        &self,
        node: &ServiceNode,
        dependencies: &[&ServiceNode],
        project: &str,
    ) -> RenderedService {
        let Some(service_type) = node.service_type() else {
            return self.fail(node, RenderError::Untyped);
        };

        let request = RenderRequest {
            node,
            service_type,
            dependencies,
            registry: &self.registry,
            templates: &self.templates,
            project,
        };

        let result = match self.renderers.get(service_type) {
            Some(renderer) => renderer.render(&request),
            None => Err(RenderError::MissingRenderer(service_type)),
        };

        match result {
            Ok(rendered) => rendered,
            Err(RenderError::MissingTemplates(ty)) => {
                tracing::debug!(service = %node.id, service_type = %ty, "no templates, using registry defaults");
                request.fallback(Fallback::MissingTemplates)
            }
            Err(err) => self.fail(node, err),
        }
    }

    fn fail(&self, node: &ServiceNode, err: RenderError) -> RenderedService {
        tracing::warn!(service = %node.id, error = %err, "render failed, using registry defaults");
        RenderedService::fallback(
            node,
            &self.registry,
            Fallback::RenderFailed {
                reason: err.to_string(),
            },
        )
    }
}

impl Default for RenderEngine {
    fn default() -> Self {
        Self::builtin()
    }
}
