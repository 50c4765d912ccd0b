use indexmap::IndexMap;
use stackforge_core::ServiceType;

use super::{
    RenderError, RenderRequest, RenderedService,
    renderers::{BackendRenderer, FrontendRenderer, GenericRenderer},
};

/// Renders the files of one service type.
///
/// Supporting a new service type means implementing this trait and
/// registering the implementation in a [`RendererRegistry`].
pub trait ServiceRenderer: Send + Sync {
    /// The type this renderer handles.
    fn service_type(&self) -> ServiceType;

    fn render(&self, request: &RenderRequest<'_>) -> Result<RenderedService, RenderError>;
}

/// Renderers keyed by service type.
pub struct RendererRegistry {
    renderers: IndexMap<ServiceType, Box<dyn ServiceRenderer>>,
}

impl RendererRegistry {
    pub fn empty() -> Self {
        Self {
            renderers: IndexMap::new(),
        }
    }

    /// Renderers for every built-in service type.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(FrontendRenderer);
        registry.register(BackendRenderer);
        for ty in [
            ServiceType::RelationalDatabase,
            ServiceType::DocumentDatabase,
            ServiceType::Cache,
            ServiceType::ReverseProxy,
            ServiceType::Monitoring,
        ] {
            registry.register(GenericRenderer::new(ty));
        }
        registry
    }

    /// Register a renderer, replacing any renderer for the same type.
    pub fn register(&mut self, renderer: impl ServiceRenderer + 'static) {
        self.renderers
            .insert(renderer.service_type(), Box::new(renderer));
    }

    pub fn get(&self, ty: ServiceType) -> Option<&dyn ServiceRenderer> {
        self.renderers.get(&ty).map(Box::as_ref)
    }

    pub fn service_types(&self) -> impl Iterator<Item = ServiceType> + '_ {
        self.renderers.keys().copied()
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("service_types", &self.renderers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_every_type() {
        let registry = RendererRegistry::builtin();
        for ty in ServiceType::ALL {
            let renderer = registry.get(ty).unwrap();
            assert_eq!(renderer.service_type(), ty);
        }
    }

    #[test]
    fn test_empty_registry() {
        assert!(RendererRegistry::empty().get(ServiceType::Cache).is_none());
    }
}
