//! File registration for rendered services.
//!
//! Renderers register every file they produce in a [`FileRegistry`] instead
//! of writing to disk. The packager later copies the entries into the
//! service directory, configuration files first.
//!
//! # Example
//!
//! ```
//! use stackforge_codegen::generation::{FileEntry, FileRegistry};
//!
//! let mut registry = FileRegistry::new();
//! registry.register(FileEntry::source("src/index.js", "console.log('hi');\n"));
//! registry.register(FileEntry::config("package.json", "{}\n"));
//!
//! let paths: Vec<_> = registry.entries().map(|e| e.path.as_str()).collect();
//! assert_eq!(paths, ["package.json", "src/index.js"]);
//! ```

use serde::Serialize;

/// Category of a generated file, determining write order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// Build and runtime configuration (package.json, nginx.conf, .env)
    Config,
    /// Application source (src/, public/)
    Source,
}

impl FileCategory {
    /// Classify a relative path.
    ///
    /// Anything under `src/` or `public/` is source, everything else is
    /// configuration.
    pub fn for_path(path: &str) -> Self {
        if path.starts_with("src/") || path.starts_with("public/") {
            Self::Source
        } else {
            Self::Config
        }
    }
}

/// An entry in the file registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Path relative to the service directory, `/`-separated.
    pub path: String,
    pub content: String,
    pub category: FileCategory,
}

impl FileEntry {
    pub fn new(
        path: impl Into<String>,
        content: impl Into<String>,
        category: FileCategory,
    ) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            category,
        }
    }

    /// Create a configuration file entry.
    pub fn config(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileCategory::Config)
    }

    /// Create a source file entry.
    pub fn source(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileCategory::Source)
    }

    /// Create an entry whose category is inferred from its path.
    pub fn classified(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        let category = FileCategory::for_path(&path);
        Self::new(path, content, category)
    }
}

/// Registry collecting the files of one rendered service.
///
/// Registering a path twice replaces the earlier entry, so later stages can
/// rewrite a file a template produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FileRegistry {
    entries: Vec<FileEntry>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file entry, replacing any entry with the same path.
    pub fn register(&mut self, entry: FileEntry) {
        match self.entries.iter_mut().find(|e| e.path == entry.path) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Look up an entry by path.
    pub fn get(&self, path: &str) -> Option<&FileEntry> {
        self.entries.iter().find(|e| e.path == path)
    }

    /// Check whether an entry exists for the path.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Get all registered entries, sorted by category.
    pub fn entries(&self) -> impl Iterator<Item = &FileEntry> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.category);
        sorted.into_iter()
    }

    /// Mutable access to the entries, in registration order.
    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut FileEntry> {
        self.entries.iter_mut()
    }

    /// Get entries for a specific category.
    pub fn entries_by_category(&self, category: FileCategory) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_for_path() {
        assert_eq!(FileCategory::for_path("src/db.js"), FileCategory::Source);
        assert_eq!(FileCategory::for_path("public/index.html"), FileCategory::Source);
        assert_eq!(FileCategory::for_path("package.json"), FileCategory::Config);
        assert_eq!(FileCategory::for_path(".env"), FileCategory::Config);
    }

    #[test]
    fn test_registry_ordering() {
        let mut registry = FileRegistry::new();

        registry.register(FileEntry::source("src/index.js", ""));
        registry.register(FileEntry::config("package.json", ""));
        registry.register(FileEntry::source("src/db.js", ""));
        registry.register(FileEntry::config(".env", ""));

        let paths: Vec<_> = registry.entries().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["package.json", ".env", "src/index.js", "src/db.js"]);
    }

    #[test]
    fn test_register_replaces_same_path() {
        let mut registry = FileRegistry::new();
        registry.register(FileEntry::config("package.json", "old"));
        registry.register(FileEntry::config("package.json", "new"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("package.json").unwrap().content, "new");
    }

    #[test]
    fn test_entries_by_category() {
        let mut registry = FileRegistry::new();
        registry.register(FileEntry::classified("init.sql", ""));
        registry.register(FileEntry::classified("src/cache.js", ""));

        assert_eq!(registry.entries_by_category(FileCategory::Config).count(), 1);
        assert_eq!(registry.entries_by_category(FileCategory::Source).count(), 1);
    }
}
