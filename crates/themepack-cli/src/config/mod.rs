//! Themepack configuration.
//!
//! [`ThemepackConfig`] is assembled by [`ThemepackConfig::load`] from, in
//! increasing priority:
//!
//! 1. built-in defaults
//! 2. `themepack.config.json` in the project root, or `--config <file>`
//! 3. `THEMEPACK_*` environment variables (`THEMEPACK_NAME`,
//!    `THEMEPACK_SRC_DIR`, ...), mapped onto the camelCase field names
//! 4. command-line flags
//!
//! The file is only ever read.

mod defaults;
mod loading;
mod validation;


pub use loading::{CONFIG_FILE_NAME, ENV_PREFIX};

use defaults::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use themepack_build::{BuildRequest, PipelineSettings, ProjectLayout};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThemepackConfig {
    /// Theme to build; a directory under `srcDir`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Version for the custom-element artifacts. Falls back to package.json.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,

    /// Project root, relative to the invocation directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,

    #[serde(default = "default_src_dir")]
    pub src_dir: PathBuf,

    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    #[serde(default = "default_bin_dir")]
    pub bin_dir: PathBuf,

    /// Base TypeScript project file the declaration build extends.
    #[serde(default = "default_tsconfig")]
    pub tsconfig: PathBuf,

    #[serde(default = "default_style_codegen")]
    pub style_codegen: String,

    #[serde(default = "default_declaration_compiler")]
    pub declaration_compiler: String,

    #[serde(default = "default_bundler")]
    pub bundler: String,

    #[serde(default = "default_true")]
    pub minify: bool,

    #[serde(default = "default_true")]
    pub sourcemap: bool,

    #[serde(default = "default_true")]
    pub copy_assets: bool,
}

impl Default for ThemepackConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl ThemepackConfig {
    /// The project root: `cwd` resolved against `base`, or `base` itself.
    pub fn project_root(&self, base: &Path) -> PathBuf {
        match &self.cwd {
            Some(cwd) if cwd.is_absolute() => cwd.clone(),
            Some(cwd) => base.join(cwd),
            None => base.to_path_buf(),
        }
    }

    pub fn layout(&self, root: impl Into<PathBuf>) -> ProjectLayout {
        ProjectLayout::new(root)
            .with_src_dir(&self.src_dir)
            .with_out_dir(&self.out_dir)
            .with_bin_dir(&self.bin_dir)
            .with_base_descriptor(&self.tsconfig)
    }

    /// Build request for the configured theme. Call [`Self::validate`] first.
    pub fn request(&self) -> crate::error::Result<BuildRequest> {
        let name = self.name.clone().unwrap_or_default();
        Ok(BuildRequest::new(name, self.release.clone())?)
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            style_codegen: self.style_codegen.clone(),
            declaration_compiler: self.declaration_compiler.clone(),
            copy_assets: self.copy_assets,
            minify: self.minify,
            sourcemap: self.sourcemap,
        }
    }
}
