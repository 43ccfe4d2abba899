//! Error types for the theme build pipeline.
//!
//! Variants follow the failure points of a build: spawning a tool, a tool
//! exiting non-zero, a filesystem operation, resolving configuration, and
//! the bundler itself. Stage context (which step failed, and the message the
//! user sees) is attached one level up by [`crate::pipeline::StageFailure`].

use miette::Diagnostic;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias with [`BuildError`] as the default error.
pub type Result<T, E = BuildError> = std::result::Result<T, E>;

/// The filesystem operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOperation {
    Clear,
    Copy,
    CreateTempDir,
    Write,
    RemoveFile,
    RemoveDir,
    Read,
}

impl fmt::Display for FileOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Clear => "clear",
            Self::Copy => "copy",
            Self::CreateTempDir => "create temporary directory",
            Self::Write => "write",
            Self::RemoveFile => "remove file",
            Self::RemoveDir => "remove directory",
            Self::Read => "read",
        };
        f.write_str(verb)
    }
}

/// Errors raised by build collaborators.
#[derive(Debug, Error, Diagnostic)]
pub enum BuildError {
    /// The executable could not be started at all.
    #[error("Failed to spawn `{tool}` ({}): {source}", .path.display())]
    #[diagnostic(
        code(themepack::tool_spawn),
        help("Install the project's dev dependencies so the tool exists in node_modules/.bin")
    )]
    ToolSpawn {
        tool: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The executable ran and exited unsuccessfully.
    #[error("`{tool}` exited with {}", describe_exit(.exit_code))]
    #[diagnostic(code(themepack::tool_execution))]
    ToolExecution {
        tool: String,
        /// `None` when the process was terminated by a signal.
        exit_code: Option<i32>,
        /// Trailing output of the tool, shown as the diagnostic help.
        #[help]
        message: String,
    },

    #[error("Failed to {operation} {}: {source}", .path.display())]
    #[diagnostic(
        code(themepack::file_operation),
        help("Check permissions and free space for the project directory")
    )]
    FileOperation {
        operation: FileOperation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Package metadata or another configuration input could not be resolved.
    #[error("Could not resolve build configuration: {message}")]
    #[diagnostic(
        code(themepack::config_resolution),
        help("Pass --release explicitly or add a \"version\" field to package.json")
    )]
    ConfigResolution { message: String },

    #[error("Invalid build request: {0}")]
    #[diagnostic(code(themepack::invalid_request))]
    InvalidRequest(String),

    #[error("Theme '{name}' not found: {} is not a directory", .path.display())]
    #[diagnostic(
        code(themepack::theme_not_found),
        help("Themes are read from <src>/<name>/; check --name and the configured src_dir")
    )]
    ThemeNotFound { name: String, path: PathBuf },

    #[error("Bundler failed: {message}")]
    #[diagnostic(code(themepack::bundler))]
    Bundler { message: String },
}

impl BuildError {
    pub fn tool_spawn(tool: impl Into<String>, path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::ToolSpawn {
            tool: tool.into(),
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn tool_execution(
        tool: impl Into<String>,
        exit_code: Option<i32>,
        message: impl Into<String>,
    ) -> Self {
        Self::ToolExecution {
            tool: tool.into(),
            exit_code,
            message: message.into(),
        }
    }

    pub fn file_operation(
        operation: FileOperation,
        path: impl AsRef<Path>,
        source: std::io::Error,
    ) -> Self {
        Self::FileOperation {
            operation,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn config_resolution(message: impl Into<String>) -> Self {
        Self::ConfigResolution {
            message: message.into(),
        }
    }

    pub fn bundler(message: impl Into<String>) -> Self {
        Self::Bundler {
            message: message.into(),
        }
    }
}

fn describe_exit(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("code {}", code),
        None => "a signal".to_string(),
    }
}
