//! Template sets per service type.
//!
//! The built-in sets are compiled into the crate. A template directory can
//! replace the set of any type:
//!
//! ```text
//! <root>/
//!   backend-runtime/
//!     Dockerfile        -> build script
//!     package.json      -> extra file
//!     src/index.js      -> extra file
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use stackforge_core::ServiceType;

use super::{Template, TemplateError};

/// File name of the build script template inside a set.
pub const BUILD_SCRIPT: &str = "Dockerfile";

macro_rules! builtin {
    ($ty:literal, $path:literal) => {
        Template::new(
            $path,
            include_str!(concat!("../../templates/", $ty, "/", $path)),
        )
    };
}

/// Templates for one service type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSet {
    /// Replaces the registry build script when present.
    pub build_script: Option<Template>,
    /// Additional files, named by their path in the service directory.
    pub files: Vec<Template>,
}

impl TemplateSet {
    pub fn new(build_script: Option<Template>, files: Vec<Template>) -> Self {
        Self {
            build_script,
            files,
        }
    }

    /// Load a set from a directory. `Dockerfile` at the top level becomes the
    /// build script; every other file is an additional file.
    pub fn from_dir(dir: &Path) -> Result<Self, TemplateError> {
        let mut paths = Vec::new();
        collect_files(dir, &mut paths)?;
        paths.sort();

        let mut set = Self::default();
        for path in paths {
            let name = relative_name(dir, &path);
            let source = fs::read_to_string(&path).map_err(|source| TemplateError::Io {
                path: path.clone(),
                source,
            })?;
            let template = Template::new(name, source);
            if template.name() == BUILD_SCRIPT {
                set.build_script = Some(template);
            } else {
                set.files.push(template);
            }
        }
        Ok(set)
    }
}

/// Shared, read-only collection of template sets.
#[derive(Debug, Clone, Default)]
pub struct TemplateRepository {
    sets: IndexMap<ServiceType, TemplateSet>,
}

impl TemplateRepository {
    /// A repository without any template set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The template sets shipped with the crate.
    ///
    /// Monitoring has no built-in set and renders from registry defaults.
    pub fn builtin() -> Self {
        Self::empty()
            .with_set(
                ServiceType::FrontendFramework,
                TemplateSet::new(
                    Some(builtin!("frontend-framework", "Dockerfile")),
                    vec![
                        builtin!("frontend-framework", "package.json"),
                        builtin!("frontend-framework", "src/index.js"),
                        builtin!("frontend-framework", "public/index.html"),
                    ],
                ),
            )
            .with_set(
                ServiceType::BackendRuntime,
                TemplateSet::new(
                    Some(builtin!("backend-runtime", "Dockerfile")),
                    vec![
                        builtin!("backend-runtime", "package.json"),
                        builtin!("backend-runtime", "src/index.js"),
                    ],
                ),
            )
            .with_set(
                ServiceType::RelationalDatabase,
                TemplateSet::new(
                    Some(builtin!("relational-database", "Dockerfile")),
                    vec![builtin!("relational-database", "init.sql")],
                ),
            )
            .with_set(
                ServiceType::DocumentDatabase,
                TemplateSet::new(
                    Some(builtin!("document-database", "Dockerfile")),
                    vec![builtin!("document-database", "init-mongo.js")],
                ),
            )
            .with_set(
                ServiceType::Cache,
                TemplateSet::new(
                    Some(builtin!("cache", "Dockerfile")),
                    vec![builtin!("cache", "redis.conf")],
                ),
            )
            .with_set(
                ServiceType::ReverseProxy,
                TemplateSet::new(
                    Some(builtin!("reverse-proxy", "Dockerfile")),
                    vec![builtin!("reverse-proxy", "nginx.conf")],
                ),
            )
    }

    /// Built-in sets overridden by `<root>/<service-type>/` directories.
    ///
    /// A missing root or type directory keeps the built-in set.
    pub fn from_dir(root: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let root = root.as_ref();
        let mut repository = Self::builtin();

        if !root.is_dir() {
            tracing::warn!(
                root = %root.display(),
                "template directory not found, using built-in templates"
            );
            return Ok(repository);
        }

        for ty in ServiceType::ALL {
            let dir = root.join(ty.as_str());
            if dir.is_dir() {
                tracing::debug!(service_type = %ty, dir = %dir.display(), "loading template overrides");
                repository.sets.insert(ty, TemplateSet::from_dir(&dir)?);
            } else {
                tracing::debug!(service_type = %ty, "no template overrides, using built-ins");
            }
        }
        Ok(repository)
    }

    /// Replace the template set for one service type.
    pub fn with_set(mut self, ty: ServiceType, set: TemplateSet) -> Self {
        self.sets.insert(ty, set);
        self
    }

    pub fn set(&self, ty: ServiceType) -> Option<&TemplateSet> {
        self.sets.get(&ty)
    }

    pub fn has_set(&self, ty: ServiceType) -> bool {
        self.sets.contains_key(&ty)
    }
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), TemplateError> {
    let io_err = |source: std::io::Error| TemplateError::Io {
        path: dir.to_path_buf(),
        source,
    };

    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_dir() {
            collect_files(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}

/// `/`-separated path of `path` below `dir`.
fn relative_name(dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(dir).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
