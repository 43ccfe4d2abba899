//! Value parsers for command-line arguments.
//!
//! Both defer to the request validators in `themepack-build`, so a value
//! rejected here is also rejected when it comes from the config file or the
//! environment.

use themepack_build::BuildError;
use themepack_build::request::{validate_release, validate_theme_name};

fn reason(err: BuildError) -> String {
    match err {
        BuildError::InvalidRequest(msg) => msg,
        other => other.to_string(),
    }
}

/// Validate a theme name.
///
/// The name becomes a directory under `src/` and part of a file name, so it
/// must be a single non-empty path component.
pub fn parse_theme_name(s: &str) -> Result<String, String> {
    validate_theme_name(s).map_err(reason)?;
    Ok(s.to_string())
}

/// Validate a release version.
pub fn parse_release(s: &str) -> Result<String, String> {
    validate_release(s).map_err(reason)?;
    Ok(s.to_string())
}
