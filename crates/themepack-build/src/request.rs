//! The immutable input of one pipeline run.

use crate::error::{BuildError, Result};
use crate::layout::ProjectLayout;
use serde::{Deserialize, Serialize};

/// Which theme to build, and optionally under which release version.
///
/// Construct with [`BuildRequest::new`], which rejects names that cannot be
/// used as a directory or file-name component. Without a release the version
/// is taken from `package.json` when the bundle configuration is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRequest {
    theme_name: String,
    release_version: Option<String>,
}

impl BuildRequest {
    pub fn new(theme_name: impl Into<String>, release_version: Option<String>) -> Result<Self> {
        let theme_name = theme_name.into();
        validate_theme_name(&theme_name)?;
        if let Some(release) = &release_version {
            validate_release(release)?;
        }
        Ok(Self {
            theme_name,
            release_version,
        })
    }

    pub fn theme_name(&self) -> &str {
        &self.theme_name
    }

    pub fn release_version(&self) -> Option<&str> {
        self.release_version.as_deref()
    }

    /// Entry/chunk name of the library bundle.
    pub fn library_chunk(&self) -> &str {
        &self.theme_name
    }

    /// Entry/chunk name of the self-registering bundle.
    pub fn custom_element_chunk(&self) -> String {
        format!("{}-custom-element", self.theme_name)
    }

    /// Human-readable label used for progress reporting.
    pub fn label(&self) -> String {
        format!("building {} theme", self.theme_name)
    }

    /// Fail unless `src/<theme>` exists as a directory.
    pub async fn ensure_theme_exists(&self, layout: &ProjectLayout) -> Result<()> {
        let dir = layout.resolve(layout.theme_source_dir(&self.theme_name));
        let is_dir = tokio::fs::metadata(&dir)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if is_dir {
            Ok(())
        } else {
            Err(BuildError::ThemeNotFound {
                name: self.theme_name.clone(),
                path: dir,
            })
        }
    }
}

/// Check that `name` can be used as a directory under the source root.
pub fn validate_theme_name(name: &str) -> Result<()> {
    validate_component("theme name", name)
}

/// Check that `release` can be used inside an artifact file name.
///
/// Shared by every source of a release: flags, configuration and
/// `package.json`.
pub fn validate_release(release: &str) -> Result<()> {
    validate_component("release version", release)?;
    if release.chars().any(char::is_whitespace) {
        return Err(BuildError::InvalidRequest(format!(
            "release version '{}' must not contain whitespace",
            release
        )));
    }
    Ok(())
}

fn validate_component(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BuildError::InvalidRequest(format!("{} cannot be empty", what)));
    }
    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(BuildError::InvalidRequest(format!(
            "{} '{}' must not contain path separators",
            what, value
        )));
    }
    Ok(())
}
