//! Error types for the themepack CLI.
//!
//! [`CliError`] is the top-level error returned by every command. Pipeline
//! errors from `themepack-build` are carried through unchanged so that their
//! diagnostics (codes, help text with tool output) reach the terminal intact.
//!
//! # Example
//!
//! ```rust,no_run
//! use themepack_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_package_json(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).context(path.display())
//! }
//! ```

mod diagnostics;

pub use diagnostics::cli_error_to_miette;

use std::path::PathBuf;
use themepack_build::{BuildError, StageFailure};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// A pipeline stage failed. Displays as the stage's failure message.
    #[error("{0}")]
    Pipeline(#[from] StageFailure),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}\n\nHint: Create a themepack.config.json file or drop the --config argument", .0.display())]
    NotFound(PathBuf),

    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField { field: String, hint: String },

    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        field: String,
        value: String,
        hint: String,
    },
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Attach context information to an error.
pub trait ResultExt<T> {
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}
