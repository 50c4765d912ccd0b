use std::path::{Path, PathBuf};

use crate::{Blueprint, Result, parse::parse_blueprint};

/// On-disk encoding of a blueprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Editor export (the default)
    Json,
    /// Hand-written blueprints
    Toml,
}

impl Format {
    /// Pick a format from a file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Format::Toml,
            _ => Format::Json,
        }
    }
}

/// Represents a blueprint file with both raw content and parsed blueprint.
#[derive(Debug)]
pub struct BlueprintFile {
    path: PathBuf,
    content: String,
    blueprint: Blueprint,
}

impl BlueprintFile {
    /// Open and parse a blueprint file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let blueprint = parse_blueprint(&content, &filename, Format::from_path(&path))?;

        Ok(Self {
            path,
            content,
            blueprint,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed blueprint.
    pub fn blueprint(&self) -> &Blueprint {
        &self.blueprint
    }

    /// Take ownership of the parsed blueprint.
    pub fn into_blueprint(self) -> Blueprint {
        self.blueprint
    }
}
