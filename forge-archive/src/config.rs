//! `forge.toml` loading.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use miette::{NamedSource, SourceSpan};
use serde::Deserialize;

use crate::error::ConfigError;

/// Root schema for `forge.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub output: OutputConfig,
    pub templates: TemplatesConfig,
}

/// `[output]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Per-request working directories are created here.
    pub work_dir: PathBuf,
    /// Finished archives are written here.
    pub archive_dir: PathBuf,
    /// Seconds an undelivered archive is kept.
    pub retention_secs: u64,
    /// Deflate level, 0 to 9.
    pub compression_level: i64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        let root = std::env::temp_dir().join("stackforge");
        Self {
            archive_dir: root.join("archives"),
            work_dir: root,
            retention_secs: 3600,
            compression_level: 9,
        }
    }
}

/// `[templates]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplatesConfig {
    /// Template directory replacing the built-in sets it covers.
    pub dir: Option<PathBuf>,
}

impl GeneratorConfig {
    /// Load a config file. Relative paths inside it resolve against the file's
    /// directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<ConfigError>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::parse(&content, &path.display().to_string())?;
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    /// Parse config text. `filename` is only used for error reporting.
    pub fn parse(content: &str, filename: &str) -> Result<Self, Box<ConfigError>> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            src: NamedSource::new(filename, content.to_string()),
            span: source.span().map(SourceSpan::from),
            source,
        })?;

        let level = config.output.compression_level;
        if !(0..=9).contains(&level) {
            return Err(Box::new(ConfigError::CompressionLevel(level)));
        }
        Ok(config)
    }

    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.output.retention_secs)
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.output.work_dir);
        resolve(&mut self.output.archive_dir);
        if let Some(dir) = self.templates.dir.as_mut() {
            resolve(dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = GeneratorConfig::parse("", "forge.toml").unwrap();

        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.output.compression_level, 9);
        assert_eq!(config.retention(), Duration::from_secs(3600));
        assert!(config.output.archive_dir.starts_with(&config.output.work_dir));
    }

    #[test]
    fn test_partial_output_section() {
        let config = GeneratorConfig::parse(
            "[output]\narchive_dir = \"/srv/archives\"\nretention_secs = 60\n",
            "forge.toml",
        )
        .unwrap();

        assert_eq!(config.output.archive_dir, PathBuf::from("/srv/archives"));
        assert_eq!(config.retention(), Duration::from_secs(60));
        assert_eq!(config.output.work_dir, OutputConfig::default().work_dir);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = GeneratorConfig::parse("[output]\nzip_level = 3\n", "forge.toml").unwrap_err();
        assert!(matches!(*err, ConfigError::Parse { .. }), "{err:?}");
    }

    #[test]
    fn test_compression_level_out_of_range() {
        let err = GeneratorConfig::parse("[output]\ncompression_level = 12\n", "forge.toml")
            .unwrap_err();
        assert!(matches!(*err, ConfigError::CompressionLevel(12)));
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("forge.toml");
        std::fs::write(
            &path,
            "[output]\nwork_dir = \"work\"\n\n[templates]\ndir = \"/abs/templates\"\n",
        )
        .unwrap();

        let config = GeneratorConfig::load(&path).unwrap();

        assert_eq!(config.output.work_dir, temp.path().join("work"));
        assert_eq!(config.templates.dir, Some(PathBuf::from("/abs/templates")));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GeneratorConfig::load("/definitely/not/here/forge.toml").unwrap_err();
        assert!(matches!(*err, ConfigError::Io { .. }));
    }
}
