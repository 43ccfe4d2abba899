//! Release version resolution.

use crate::error::{BuildError, Result};
use crate::request::{validate_release, BuildRequest};
use std::path::Path;

/// The version used in the custom-element file name.
///
/// An explicit release wins; otherwise the `version` field of the project's
/// `package.json` is used, subject to the same checks as `--release`.
pub async fn resolve_release_version(
    request: &BuildRequest,
    package_json: &Path,
) -> Result<String> {
    if let Some(release) = request.release_version() {
        return Ok(release.to_string());
    }

    let content = match tokio::fs::read_to_string(package_json).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(BuildError::config_resolution(format!(
                "no release given and {} does not exist",
                package_json.display()
            )));
        }
        Err(e) => {
            return Err(BuildError::config_resolution(format!(
                "failed to read {}: {}",
                package_json.display(),
                e
            )));
        }
    };
    let manifest: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
        BuildError::config_resolution(format!("invalid JSON in {}: {}", package_json.display(), e))
    })?;

    let version = manifest
        .get("version")
        .and_then(|v| v.as_str())
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            BuildError::config_resolution(format!(
                "{} has no \"version\" field",
                package_json.display()
            ))
        })?;
    validate_release(version).map_err(|e| {
        BuildError::config_resolution(format!("{} in {}", e, package_json.display()))
    })?;
    Ok(version.to_string())
}
