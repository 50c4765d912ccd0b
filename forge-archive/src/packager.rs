//! Writing a project tree and compressing it into an archive.

use std::{
    fs::{self, File},
    io,
    path::{Component, Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use stackforge_codegen::{ComposeFile, RenderedService, render::BUILD_SCRIPT};
use stackforge_core::{GeneratedFile, write_file};
use uuid::Uuid;
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use crate::{
    archive::{ARCHIVE_EXTENSION, Archive},
    config::OutputConfig,
    error::GenerationError,
    files::{EnvTemplate, Summary},
};

/// Highest Deflate level.
pub const MAX_COMPRESSION_LEVEL: i64 = 9;

/// One file of the project tree, named relative to the working directory
/// with `/` separators.
#[derive(Debug)]
struct ProjectFile {
    name: String,
    content: String,
}

impl ProjectFile {
    fn generated(base: &str, file: &impl GeneratedFile) -> Self {
        Self {
            name: entry_name(&file.path(Path::new(base))),
            content: file.render(),
        }
    }

    fn path_in(&self, root: &Path) -> PathBuf {
        self.name.split('/').fold(root.to_path_buf(), |p, c| p.join(c))
    }
}

fn entry_name(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Removes a partially written archive unless disarmed.
struct PartialArchive<'a> {
    path: &'a Path,
    armed: bool,
}

impl<'a> PartialArchive<'a> {
    fn new(path: &'a Path) -> Self {
        Self { path, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }

    /// Run the last cleanup step and keep the archive only if it succeeds.
    fn keep_if<E>(self, cleanup: impl FnOnce() -> Result<(), E>) -> Result<(), E> {
        cleanup()?;
        self.disarm();
        Ok(())
    }
}

impl Drop for PartialArchive<'_> {
    fn drop(&mut self) {
        if self.armed && self.path.exists() {
            tracing::debug!(archive = %self.path.display(), "removing partial archive");
            let _ = fs::remove_file(self.path);
        }
    }
}

/// Writes project trees into scoped working directories and compresses them.
///
/// Every call to [`package`](Packager::package) gets its own
/// `<work_root>/<project>-<uuid>/` directory, which is gone by the time the
/// call returns, whatever the outcome.
#[derive(Debug, Clone)]
pub struct Packager {
    work_root: PathBuf,
    archive_dir: PathBuf,
    compression_level: i64,
    cancel: Option<Arc<AtomicBool>>,
}

impl Packager {
    pub fn new(work_root: impl Into<PathBuf>, archive_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_root: work_root.into(),
            archive_dir: archive_dir.into(),
            compression_level: MAX_COMPRESSION_LEVEL,
            cancel: None,
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(&config.work_dir, &config.archive_dir)
            .with_compression_level(config.compression_level)
    }

    /// Set the Deflate level, clamped to `0..=9`.
    pub fn with_compression_level(mut self, level: i64) -> Self {
        self.compression_level = level.clamp(0, MAX_COMPRESSION_LEVEL);
        self
    }

    /// Abort packaging with [`GenerationError::Cancelled`] once `flag` is set.
    /// The flag is checked between files.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn work_root(&self) -> &Path {
        &self.work_root
    }

    pub fn archive_dir(&self) -> &Path {
        &self.archive_dir
    }

    /// Write the project tree for `project` (a sanitized name) and compress
    /// it into `<archive_dir>/<project>-<uuid>.zip`.
    pub fn package(
        &self,
        project: &str,
        descriptor: &ComposeFile,
        rendered: &[RenderedService],
        summary: &Summary,
    ) -> Result<Archive, GenerationError> {
        let id = Uuid::new_v4();
        let stem = format!("{project}-{id}");

        fs::create_dir_all(&self.work_root).map_err(GenerationError::io(&self.work_root))?;
        let workdir = tempfile::Builder::new()
            .prefix(&stem)
            .rand_bytes(0)
            .tempdir_in(&self.work_root)
            .map_err(GenerationError::io(self.work_root.join(&stem)))?;
        tracing::debug!(workdir = %workdir.path().display(), "allocated working directory");

        let files = project_files(project, descriptor, rendered, summary);
        for file in &files {
            self.check_cancelled()?;
            let path = file.path_in(workdir.path());
            write_file(&path, &file.content).map_err(GenerationError::io(&path))?;
        }

        fs::create_dir_all(&self.archive_dir).map_err(GenerationError::io(&self.archive_dir))?;
        let archive_path = self.archive_dir.join(format!("{stem}.{ARCHIVE_EXTENSION}"));
        let guard = PartialArchive::new(&archive_path);
        let size = self.compress(workdir.path(), &files, &archive_path)?;

        let workdir_path = workdir.path().to_path_buf();
        guard.keep_if(|| workdir.close().map_err(GenerationError::io(workdir_path)))?;

        tracing::info!(
            archive = %archive_path.display(),
            files = files.len(),
            size,
            "archive created"
        );
        Ok(Archive::new(id, archive_path, size))
    }

    fn compress(
        &self,
        root: &Path,
        files: &[ProjectFile],
        archive_path: &Path,
    ) -> Result<u64, GenerationError> {
        let zip_err = |source: zip::result::ZipError| GenerationError::Archive {
            path: archive_path.to_path_buf(),
            source,
        };

        let file = File::create(archive_path).map_err(GenerationError::io(archive_path))?;
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(self.compression_level));

        for entry in files {
            self.check_cancelled()?;
            zip.start_file(entry.name.as_str(), options).map_err(zip_err)?;
            let path = entry.path_in(root);
            let mut source = File::open(&path).map_err(GenerationError::io(&path))?;
            io::copy(&mut source, &mut zip).map_err(GenerationError::io(archive_path))?;
        }

        let file = zip.finish().map_err(zip_err)?;
        file.sync_all().map_err(GenerationError::io(archive_path))?;
        let size = file
            .metadata()
            .map_err(GenerationError::io(archive_path))?
            .len();
        Ok(size)
    }

    fn check_cancelled(&self) -> Result<(), GenerationError> {
        match &self.cancel {
            Some(flag) if flag.load(Ordering::Acquire) => Err(GenerationError::Cancelled),
            _ => Ok(()),
        }
    }
}

/// Every file of the project, in archive order.
fn project_files(
    project: &str,
    descriptor: &ComposeFile,
    rendered: &[RenderedService],
    summary: &Summary,
) -> Vec<ProjectFile> {
    let mut files = vec![ProjectFile::generated(project, descriptor)];

    for service in rendered {
        let dir = format!("{project}/{}", service.slug);
        files.push(ProjectFile {
            name: format!("{dir}/{BUILD_SCRIPT}"),
            content: service.build_script.clone(),
        });
        files.extend(service.files.entries().map(|entry| ProjectFile {
            name: format!("{dir}/{}", entry.path),
            content: entry.content.clone(),
        }));
    }

    files.push(ProjectFile::generated(project, &EnvTemplate::new(descriptor)));
    files.push(ProjectFile::generated(project, summary));
    files
}
