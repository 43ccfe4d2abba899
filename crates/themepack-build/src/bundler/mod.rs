//! The bundler collaborator.
//!
//! A [`Bundler`] receives one finished [`BundleConfig`] and runs it to
//! completion. Plugins listed in the configuration are applied to a
//! [`Compilation`] before any output is written; the bundler asks the
//! compilation for every chunk's final file name.

mod compilation;
mod esbuild;

pub use compilation::{AssetPathHook, BundlePlugin, ChunkInfo, Compilation, SharedPlugin};
pub use esbuild::EsbuildBundler;

use crate::config::BundleConfig;
use crate::error::{BuildError, FileOperation, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[async_trait]
pub trait Bundler: Send + Sync {
    async fn run(&self, config: BundleConfig) -> Result<BundleStats>;
}

/// A file found in the output directory after bundling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedFile {
    /// Path relative to the output directory, with forward slashes.
    pub path: String,
    pub size: u64,
}

/// What a bundler run left in the output directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BundleStats {
    pub output_dir: PathBuf,
    pub files: Vec<EmittedFile>,
}

impl BundleStats {
    /// List every file below `output_dir`, sorted by path.
    pub fn collect(output_dir: &Path) -> Result<Self> {
        let mut files = Vec::new();
        if output_dir.is_dir() {
            for entry in WalkDir::new(output_dir).sort_by_file_name() {
                let entry = entry.map_err(|e| {
                    BuildError::file_operation(FileOperation::Read, output_dir, e.into())
                })?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let size = entry
                    .metadata()
                    .map_err(|e| BuildError::file_operation(FileOperation::Read, entry.path(), e.into()))?
                    .len();
                let relative = entry
                    .path()
                    .strip_prefix(output_dir)
                    .unwrap_or(entry.path())
                    .to_string_lossy()
                    .replace('\\', "/");
                files.push(EmittedFile {
                    path: relative,
                    size,
                });
            }
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            files,
        })
    }

    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.iter().any(|f| f.path == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collect_lists_nested_files() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("dist");
        std::fs::create_dir_all(out.join("assets")).unwrap();
        std::fs::write(out.join("index.js"), "abc").unwrap();
        std::fs::write(out.join("assets").join("Ab12Cd34.png"), "12345").unwrap();

        let stats = BundleStats::collect(&out).unwrap();
        assert_eq!(stats.files.len(), 2);
        assert!(stats.contains("index.js"));
        assert!(stats.contains("assets/Ab12Cd34.png"));
        assert_eq!(stats.total_size(), 8);
    }

    #[test]
    fn test_collect_missing_directory() {
        let temp = TempDir::new().unwrap();
        let stats = BundleStats::collect(&temp.path().join("missing")).unwrap();
        assert!(stats.files.is_empty());
    }
}
