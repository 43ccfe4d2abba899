//! Spawning project-local tools.

use crate::error::{BuildError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Trailing lines of tool output kept for error messages.
const OUTPUT_TAIL_LINES: usize = 20;

/// Runs a named executable with arguments in a working directory.
///
/// Resolves only when the process has exited: `Ok` on success, otherwise
/// [`BuildError::ToolSpawn`] or [`BuildError::ToolExecution`].
#[async_trait]
pub trait ToolRunner: Send + Sync {
    async fn run(&self, tool: &str, args: &[String], cwd: &Path) -> Result<()>;
}

/// Runs executables from a project's `node_modules/.bin`.
#[derive(Debug, Clone)]
pub struct LocalToolRunner {
    bin_dir: PathBuf,
}

impl LocalToolRunner {
    pub fn new(bin_dir: impl Into<PathBuf>) -> Self {
        Self {
            bin_dir: bin_dir.into(),
        }
    }

    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }

    /// Path of `tool` inside the bin directory.
    ///
    /// On Windows package managers install `.cmd` shims next to the
    /// extension-less scripts; the shim is preferred when present.
    pub fn executable(&self, tool: &str) -> PathBuf {
        let plain = self.bin_dir.join(tool);
        if cfg!(windows) {
            let shim = self.bin_dir.join(format!("{}.cmd", tool));
            if shim.exists() {
                return shim;
            }
        }
        plain
    }
}

#[async_trait]
impl ToolRunner for LocalToolRunner {
    async fn run(&self, tool: &str, args: &[String], cwd: &Path) -> Result<()> {
        let executable = self.executable(tool);
        debug!(tool, ?args, cwd = %cwd.display(), "spawning tool");

        let output = Command::new(&executable)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| BuildError::tool_spawn(tool, &executable, e))?;

        if output.status.success() {
            debug!(tool, "tool finished");
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let message = if stderr.trim().is_empty() {
            tail(&stdout)
        } else {
            tail(&stderr)
        };
        Err(BuildError::tool_execution(tool, output.status.code(), message))
    }
}

fn tail(output: &str) -> String {
    let lines: Vec<&str> = output.trim_end().lines().collect();
    let start = lines.len().saturating_sub(OUTPUT_TAIL_LINES);
    lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_tail_keeps_last_lines() {
        let output: String = (0..30).map(|i| format!("line {}\n", i)).collect();
        let tail = tail(&output);
        assert!(tail.starts_with("line 10"));
        assert!(tail.ends_with("line 29"));
        assert_eq!(tail.lines().count(), OUTPUT_TAIL_LINES);
    }

    #[tokio::test]
    async fn test_missing_tool_is_spawn_error() {
        let temp = TempDir::new().unwrap();
        let runner = LocalToolRunner::new(temp.path().join("node_modules/.bin"));
        let err = runner.run("tcm", &[], temp.path()).await.unwrap_err();
        assert!(matches!(err, BuildError::ToolSpawn { .. }));
    }

    #[cfg(unix)]
    fn write_script(dir: &Path, name: &str, body: &str) {
        use std::os::unix::fs::PermissionsExt;
        std::fs::create_dir_all(dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_runs_in_working_directory() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        write_script(&bin, "touch-marker", "touch \"$1\"");
        let runner = LocalToolRunner::new(&bin);

        runner
            .run("touch-marker", &["marker.txt".to_string()], temp.path())
            .await
            .unwrap();
        assert!(temp.path().join("marker.txt").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_carries_stderr() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        write_script(&bin, "tsc", "echo 'error TS2307: cannot find module' >&2\nexit 2");
        let runner = LocalToolRunner::new(&bin);

        let err = runner.run("tsc", &[], temp.path()).await.unwrap_err();
        match err {
            BuildError::ToolExecution {
                tool,
                exit_code,
                message,
            } => {
                assert_eq!(tool, "tsc");
                assert_eq!(exit_code, Some(2));
                assert!(message.contains("TS2307"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
