//! Finished archives and their lifecycle.

use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::GenerationError;

/// Extension of every archive the packager writes.
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Why an archive is being released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionSignal {
    /// The consumer has the file.
    Delivered,
    /// Nobody collected it in time.
    RetentionElapsed,
}

/// A packaged project on disk.
///
/// The archive owns its file: dropping it without [`deliver_to`] or
/// [`complete`] removes the file.
///
/// [`deliver_to`]: Archive::deliver_to
/// [`complete`]: Archive::complete
#[derive(Debug)]
pub struct Archive {
    id: Uuid,
    path: PathBuf,
    size: u64,
    created_at: DateTime<Utc>,
    released: bool,
}

impl Archive {
    pub(crate) fn new(id: Uuid, path: PathBuf, size: u64) -> Self {
        Self {
            id,
            path,
            size,
            created_at: Utc::now(),
            released: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name, `<project>-<uuid>.zip`.
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_expired(&self, retention: Duration) -> bool {
        let age = Utc::now().signed_duration_since(self.created_at);
        age.to_std().is_ok_and(|age| age >= retention)
    }

    /// Copy the archive into `dir` and release it.
    ///
    /// Returns the path of the copy. On failure the archive is dropped and
    /// its file removed.
    pub fn deliver_to(self, dir: impl AsRef<Path>) -> Result<PathBuf, GenerationError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(GenerationError::io(dir))?;

        let target = dir.join(self.file_name());
        fs::copy(&self.path, &target).map_err(GenerationError::io(&target))?;
        tracing::debug!(archive = %self.path.display(), target = %target.display(), "archive delivered");

        self.complete(CompletionSignal::Delivered);
        Ok(target)
    }

    /// Release the archive and remove its file.
    pub fn complete(mut self, signal: CompletionSignal) {
        tracing::debug!(archive = %self.path.display(), ?signal, "releasing archive");
        self.release();
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(err) = fs::remove_file(&self.path) {
            tracing::warn!(archive = %self.path.display(), error = %err, "failed to remove archive");
        }
    }
}

impl Drop for Archive {
    fn drop(&mut self) {
        self.release();
    }
}

/// Remove archives in `archive_dir` older than `retention`.
///
/// Catches archives left behind by processes that died before releasing
/// them. A missing directory counts as empty. Returns the number removed.
pub fn sweep_expired(archive_dir: impl AsRef<Path>, retention: Duration) -> Result<usize, GenerationError> {
    let archive_dir = archive_dir.as_ref();
    let entries = match fs::read_dir(archive_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(err) => return Err(GenerationError::io(archive_dir)(err)),
    };

    let now = SystemTime::now();
    let mut removed = 0;
    for entry in entries {
        let entry = entry.map_err(GenerationError::io(archive_dir))?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(ARCHIVE_EXTENSION) {
            continue;
        }

        let metadata = entry.metadata().map_err(GenerationError::io(&path))?;
        if !metadata.is_file() {
            continue;
        }
        let age = metadata
            .modified()
            .ok()
            .and_then(|modified| now.duration_since(modified).ok())
            .unwrap_or_default();
        if age < retention {
            continue;
        }

        match fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(GenerationError::io(&path)(err)),
        }
    }

    if removed > 0 {
        tracing::info!(dir = %archive_dir.display(), removed, "swept expired archives");
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn archive_in(dir: &Path, name: &str) -> Archive {
        let path = dir.join(name);
        fs::write(&path, b"PK").unwrap();
        Archive::new(Uuid::new_v4(), path, 2)
    }

    #[test]
    fn test_drop_removes_file() {
        let temp = TempDir::new().unwrap();
        let archive = archive_in(temp.path(), "a.zip");
        let path = archive.path().to_path_buf();

        drop(archive);

        assert!(!path.exists());
    }

    #[test]
    fn test_deliver_copies_then_releases() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        let archive = archive_in(temp.path(), "shop-1.zip");
        let original = archive.path().to_path_buf();

        let delivered = archive.deliver_to(&out).unwrap();

        assert_eq!(delivered, out.join("shop-1.zip"));
        assert_eq!(fs::read(&delivered).unwrap(), b"PK");
        assert!(!original.exists());
    }

    #[test]
    fn test_complete_on_retention() {
        let temp = TempDir::new().unwrap();
        let archive = archive_in(temp.path(), "a.zip");
        let path = archive.path().to_path_buf();

        assert!(archive.is_expired(Duration::ZERO));
        assert!(!archive.is_expired(Duration::from_secs(3600)));
        archive.complete(CompletionSignal::RetentionElapsed);

        assert!(!path.exists());
    }

    #[test]
    fn test_sweep_expired() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("old.zip"), b"PK").unwrap();
        fs::write(temp.path().join("notes.txt"), b"keep").unwrap();

        assert_eq!(sweep_expired(temp.path(), Duration::from_secs(3600)).unwrap(), 0);
        assert_eq!(sweep_expired(temp.path(), Duration::ZERO).unwrap(), 1);
        assert!(!temp.path().join("old.zip").exists());
        assert!(temp.path().join("notes.txt").exists());
    }

    #[test]
    fn test_sweep_missing_dir() {
        let temp = TempDir::new().unwrap();
        assert_eq!(sweep_expired(temp.path().join("nope"), Duration::ZERO).unwrap(), 0);
    }
}
