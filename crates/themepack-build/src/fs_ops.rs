//! Filesystem operations used by the pipeline.
//!
//! Relative paths are resolved against the project root. Glob patterns use
//! forward slashes and `globset` syntax (`*`, `**`, `{a,b}`), with `*` never
//! crossing a directory boundary.

use crate::error::{BuildError, FileOperation, Result};
use async_trait::async_trait;
use globset::GlobBuilder;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

#[async_trait]
pub trait FileOps: Send + Sync {
    /// Remove a directory and its contents. A missing directory is not an error.
    async fn clear_directory(&self, path: &Path) -> Result<()>;

    /// Copy every file matching `pattern` into `destination`, keeping paths
    /// relative to the pattern's literal prefix. Returns the number of files
    /// copied; zero matches is not an error.
    async fn copy_matching(&self, pattern: &str, destination: &Path) -> Result<usize>;

    /// Create a fresh, uniquely named directory. The caller owns its removal.
    async fn create_temp_directory(&self, prefix: &str) -> Result<PathBuf>;

    async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<()>;

    async fn remove_file(&self, path: &Path) -> Result<()>;

    async fn remove_directory(&self, path: &Path) -> Result<()>;
}

/// [`FileOps`] backed by the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalFileOps {
    root: PathBuf,
}

impl LocalFileOps {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

#[async_trait]
impl FileOps for LocalFileOps {
    async fn clear_directory(&self, path: &Path) -> Result<()> {
        let path = self.resolve(path);
        debug!(path = %path.display(), "clearing directory");
        match tokio::fs::remove_dir_all(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BuildError::file_operation(FileOperation::Clear, path, e)),
        }
    }

    async fn copy_matching(&self, pattern: &str, destination: &Path) -> Result<usize> {
        let root = self.root.clone();
        let pattern = pattern.to_string();
        let destination = self.resolve(destination);

        let copied = tokio::task::spawn_blocking(move || copy_glob(&root, &pattern, &destination))
            .await
            .map_err(|e| {
                BuildError::file_operation(
                    FileOperation::Copy,
                    &self.root,
                    std::io::Error::other(e),
                )
            })??;

        debug!(copied, "copied matching files");
        Ok(copied)
    }

    async fn create_temp_directory(&self, prefix: &str) -> Result<PathBuf> {
        let prefix = prefix.to_string();
        let path = tokio::task::spawn_blocking(move || {
            tempfile::Builder::new()
                .prefix(&prefix)
                .tempdir()
                .map(|dir| dir.keep())
        })
        .await
        .map_err(std::io::Error::other)
        .and_then(|created| created)
        .map_err(|e| {
            BuildError::file_operation(FileOperation::CreateTempDir, std::env::temp_dir(), e)
        })?;
        debug!(path = %path.display(), "created temporary directory");
        Ok(path)
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let path = self.resolve(path);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| BuildError::file_operation(FileOperation::Write, parent, e))?;
        }
        tokio::fs::write(&path, contents)
            .await
            .map_err(|e| BuildError::file_operation(FileOperation::Write, &path, e))
    }

    async fn remove_file(&self, path: &Path) -> Result<()> {
        let path = self.resolve(path);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BuildError::file_operation(FileOperation::RemoveFile, path, e)),
        }
    }

    async fn remove_directory(&self, path: &Path) -> Result<()> {
        let path = self.resolve(path);
        match tokio::fs::remove_dir_all(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BuildError::file_operation(FileOperation::RemoveDir, path, e)),
        }
    }
}

/// Split a pattern into its literal directory prefix and the glob remainder.
///
/// `src/my-theme/*.{d.ts,css}` becomes (`src/my-theme`, `*.{d.ts,css}`).
fn split_pattern(pattern: &str) -> (PathBuf, String) {
    let segments: Vec<&str> = pattern.split('/').collect();
    let first_glob = segments
        .iter()
        .position(|s| s.contains(['*', '?', '[', '{']))
        .unwrap_or(segments.len().saturating_sub(1));

    let base: PathBuf = segments[..first_glob].iter().collect();
    let rest = segments[first_glob..].join("/");
    (base, rest)
}

fn copy_glob(root: &Path, pattern: &str, destination: &Path) -> Result<usize> {
    let (base, rest) = split_pattern(pattern);
    let base = if base.is_absolute() {
        base
    } else {
        root.join(base)
    };

    let matcher = GlobBuilder::new(&rest)
        .literal_separator(true)
        .build()
        .map_err(|e| {
            BuildError::file_operation(
                FileOperation::Copy,
                &base,
                std::io::Error::new(ErrorKind::InvalidInput, e),
            )
        })?
        .compile_matcher();

    if !base.is_dir() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(&base).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| base.clone());
            BuildError::file_operation(FileOperation::Copy, path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(&base) else {
            continue;
        };
        if !matcher.is_match(relative) {
            continue;
        }

        let target = destination.join(relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| BuildError::file_operation(FileOperation::Copy, parent, e))?;
        }
        std::fs::copy(entry.path(), &target)
            .map_err(|e| BuildError::file_operation(FileOperation::Copy, entry.path(), e))?;
        copied += 1;
    }

    Ok(copied)
}
