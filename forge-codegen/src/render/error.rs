use std::path::PathBuf;

use miette::Diagnostic;
use stackforge_core::ServiceType;
use thiserror::Error;

/// Errors raised while loading or expanding templates.
#[derive(Debug, Error, Diagnostic)]
pub enum TemplateError {
    #[error("template '{template}' uses unknown placeholder '{key}'")]
    #[diagnostic(
        code(stackforge::unknown_placeholder),
        help("available placeholders: name, slug, port, image, project, dependencies, upstream")
    )]
    UnknownPlaceholder { template: String, key: String },

    #[error("template '{template}' has an unterminated placeholder at byte {offset}")]
    #[diagnostic(code(stackforge::unterminated_placeholder))]
    Unterminated { template: String, offset: usize },

    #[error("failed to read template '{path}'")]
    #[diagnostic(code(stackforge::template_io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by a [`ServiceRenderer`](super::ServiceRenderer).
///
/// The render engine never propagates these: it logs them and falls back to
/// the registry defaults for the affected service.
#[derive(Debug, Error, Diagnostic)]
pub enum RenderError {
    #[error("no templates for service type '{0}'")]
    #[diagnostic(code(stackforge::missing_templates))]
    MissingTemplates(ServiceType),

    #[error("no renderer registered for service type '{0}'")]
    #[diagnostic(code(stackforge::missing_renderer))]
    MissingRenderer(ServiceType),

    #[error("service has no usable type")]
    #[diagnostic(code(stackforge::untyped_service))]
    Untyped,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Template(#[from] TemplateError),

    #[error("rendered '{path}' is not a valid package manifest")]
    #[diagnostic(code(stackforge::invalid_package_manifest))]
    Manifest {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
