use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use stackforge_codegen::{TemplateError, ValidationReport};
use thiserror::Error;

/// Errors from [`Generator::generate`](crate::Generator::generate) and the
/// packager.
///
/// Whenever one of these is returned, the working directory and any partial
/// archive have already been removed.
#[derive(Debug, Error, Diagnostic)]
pub enum GenerationError {
    /// Validation found blocking issues. No file was written.
    #[error("blueprint has {} blocking issue(s)", .0.blocking.len())]
    #[diagnostic(
        code(stackforge::validation_blocked),
        help("run `forge check` to list every issue")
    )]
    ValidationBlocked(Box<ValidationReport>),

    #[error("generation pipeline failed: {0}")]
    #[diagnostic(code(stackforge::pipeline))]
    Pipeline(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Templates(#[from] TemplateError),

    #[error("failed to write '{path}'")]
    #[diagnostic(code(stackforge::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write archive '{path}'")]
    #[diagnostic(code(stackforge::archive))]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("generation was cancelled")]
    #[diagnostic(code(stackforge::cancelled))]
    Cancelled,
}

impl GenerationError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }

    /// The validation report, when generation was blocked by validation.
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            Self::ValidationBlocked(report) => Some(report),
            _ => None,
        }
    }
}

/// Errors raised while loading `forge.toml`.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config '{path}'")]
    #[diagnostic(code(stackforge::config_io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    #[diagnostic(code(stackforge::config_parse))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("compression_level must be between 0 and 9, got {0}")]
    #[diagnostic(
        code(stackforge::compression_level),
        help("9 gives the smallest archives")
    )]
    CompressionLevel(i64),
}
