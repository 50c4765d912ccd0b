use serde_json::Value;
use stackforge_blueprint::ServiceNode;
use stackforge_core::{ServiceDefaults, ServiceType, ServiceTypeRegistry};

use super::{Fallback, RenderError, RenderedService, TemplateContext, TemplateRepository};
use crate::generation::{FileEntry, FileRegistry};

/// Everything a renderer needs to render one service.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub node: &'a ServiceNode,
    pub service_type: ServiceType,
    /// Resolved dependency set, in connection order.
    pub dependencies: &'a [&'a ServiceNode],
    pub registry: &'a ServiceTypeRegistry,
    pub templates: &'a TemplateRepository,
    /// Sanitized project name.
    pub project: &'a str,
}

impl<'a> RenderRequest<'a> {
    pub fn defaults(&self) -> &'a ServiceDefaults {
        self.registry.defaults(self.service_type)
    }

    pub fn slug(&self) -> String {
        self.node.slug()
    }

    pub fn port(&self) -> u16 {
        self.node.port(self.registry)
    }

    /// First dependency whose type satisfies `predicate`.
    pub fn dependency(&self, predicate: impl Fn(&ServiceType) -> bool) -> Option<&'a ServiceNode> {
        self.dependencies
            .iter()
            .copied()
            .find(|dep| dep.service_type().is_some_and(|ty| predicate(&ty)))
    }

    /// `host:port` of a dependency on the project network.
    pub fn endpoint(&self, dependency: &ServiceNode) -> String {
        format!("{}:{}", dependency.slug(), dependency.port(self.registry))
    }

    /// Placeholder values for this service's templates.
    pub fn context(&self) -> TemplateContext {
        let dependencies: Vec<_> = self.dependencies.iter().map(|d| d.slug()).collect();
        let upstream = match self.dependencies.first() {
            Some(dep) => self.endpoint(dep),
            None => format!(
                "localhost:{}",
                self.registry.defaults(ServiceType::BackendRuntime).port
            ),
        };

        let name = self.node.label();
        TemplateContext::new()
            .with("name", name)
            .with("name_js", Value::String(name.to_string()))
            .with("name_html", escape_html(name))
            .with("slug", self.slug())
            .with("port", self.port())
            .with("image", &self.defaults().image)
            .with("project", self.project)
            .with("dependencies", dependencies.join(","))
            .with("upstream", upstream)
    }

    /// Render the template set of this service's type.
    ///
    /// The set's build script replaces the registry default when present.
    ///
    /// # Errors
    ///
    /// [`RenderError::MissingTemplates`] when the repository has no set for
    /// the type, or a template error.
    pub fn base(&self) -> Result<RenderedService, RenderError> {
        let set = self
            .templates
            .set(self.service_type)
            .ok_or(RenderError::MissingTemplates(self.service_type))?;
        let context = self.context();

        let build_script = match &set.build_script {
            Some(template) => template.render(&context)?,
            None => self.defaults().build_script.clone(),
        };

        let mut files = FileRegistry::new();
        for template in &set.files {
            files.register(FileEntry::classified(template.name(), template.render(&context)?));
        }

        Ok(RenderedService {
            service_id: self.node.id.clone(),
            slug: self.slug(),
            service_type: Some(self.service_type),
            build_script,
            files,
            environment: Default::default(),
            fallback: None,
        })
    }

    /// Default output used when rendering this request failed.
    pub fn fallback(&self, fallback: Fallback) -> RenderedService {
        RenderedService::fallback(self.node, self.registry, fallback)
    }
}

/// Escape text for HTML element content and attribute values.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
