//! Shared helpers for commands.

use crate::cli::ThemeArgs;
use crate::config::ThemepackConfig;
use crate::error::{CliError, Result};
use std::path::{Path, PathBuf};
use themepack_build::{BuildRequest, ProjectLayout};
use tracing::debug;

/// A validated theme target: configuration, project layout and request.
pub(crate) struct ResolvedTheme {
    pub config: ThemepackConfig,
    pub layout: ProjectLayout,
    pub request: BuildRequest,
}

/// Load and validate configuration for the theme named by `args`.
pub(crate) async fn resolve_theme(args: &ThemeArgs) -> Result<ResolvedTheme> {
    let base = get_cwd()?;
    let config = ThemepackConfig::load(args, &base)?;
    config.validate()?;

    let root = config.project_root(&base);
    let root_is_dir = tokio::fs::metadata(&root)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);
    if !root_is_dir {
        return Err(CliError::InvalidArgument(format!(
            "Project root is not a directory: {}",
            root.display()
        )));
    }

    let layout = config.layout(root);
    config.validate_project(&layout).await?;
    let request = config.request()?;
    debug!(root = %layout.root().display(), theme = request.theme_name(), "resolved theme");

    Ok(ResolvedTheme {
        config,
        layout,
        request,
    })
}

/// Resolve a path relative to a base directory.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Create `dir` if missing; fail if it exists as something else.
pub async fn ensure_output_dir(dir: &Path) -> Result<()> {
    match tokio::fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(CliError::InvalidArgument(format!(
            "Output path exists but is not a directory: {}",
            dir.display()
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tokio::fs::create_dir_all(dir).await?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to get current directory: {}", e),
        ))
    })
}
