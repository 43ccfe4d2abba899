//! Scoped project descriptor for the declaration compiler.
//!
//! The declaration compiler needs a project file narrowed to a single theme.
//! A [`ScopedTempProject`] writes one into a private temporary directory;
//! the pipeline releases it on every exit path.

use crate::error::{BuildError, Result};
use crate::fs_ops::FileOps;
use crate::layout::{glob_in, slashed, ProjectLayout};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const DESCRIPTOR_FILE: &str = "tsconfig.json";
const TEMP_PREFIX: &str = "themepack-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    pub declaration: bool,
    pub emit_declaration_only: bool,
    pub root_dir: String,
}

/// A project descriptor that extends the base one and includes only the
/// theme's own sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescriptor {
    pub extends: String,
    pub compiler_options: CompilerOptions,
    pub include: Vec<String>,
}

impl ProjectDescriptor {
    pub fn for_theme(layout: &ProjectLayout, theme: &str) -> Self {
        let theme_dir = layout.resolve(layout.theme_source_dir(theme));
        Self {
            extends: slashed(&layout.base_descriptor()),
            compiler_options: CompilerOptions {
                declaration: true,
                emit_declaration_only: true,
                root_dir: slashed(&theme_dir),
            },
            include: vec![glob_in(&theme_dir, "**/*.ts")],
        }
    }
}

/// A descriptor written to its own temporary directory.
#[derive(Debug)]
pub struct ScopedTempProject {
    dir: PathBuf,
    descriptor_path: PathBuf,
}

impl ScopedTempProject {
    /// Create the directory and write the descriptor into it.
    ///
    /// When writing fails the directory is removed before returning.
    pub async fn create(fs: &dyn FileOps, descriptor: &ProjectDescriptor) -> Result<Self> {
        let dir = fs.create_temp_directory(TEMP_PREFIX).await?;
        let descriptor_path = dir.join(DESCRIPTOR_FILE);

        let contents = serde_json::to_vec_pretty(descriptor).map_err(|e| {
            BuildError::config_resolution(format!("failed to serialize project descriptor: {}", e))
        });
        let written = match contents {
            Ok(contents) => fs.write_file(&descriptor_path, &contents).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            if let Err(cleanup) = fs.remove_directory(&dir).await {
                warn!(path = %dir.display(), error = %cleanup, "failed to remove temporary directory");
            }
            return Err(e);
        }

        debug!(path = %descriptor_path.display(), "wrote scoped project descriptor");
        Ok(Self {
            dir,
            descriptor_path,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn descriptor_path(&self) -> &Path {
        &self.descriptor_path
    }

    /// Remove the descriptor, then the directory. Failures are logged and
    /// swallowed so they never replace the build outcome.
    pub async fn release(self, fs: &dyn FileOps) {
        if let Err(e) = fs.remove_file(&self.descriptor_path).await {
            warn!(path = %self.descriptor_path.display(), error = %e, "failed to remove project descriptor");
        }
        if let Err(e) = fs.remove_directory(&self.dir).await {
            warn!(path = %self.dir.display(), error = %e, "failed to remove temporary directory");
        }
        debug!(path = %self.dir.display(), "released scoped project");
    }
}
