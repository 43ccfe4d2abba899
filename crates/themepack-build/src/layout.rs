//! Project directory layout.
//!
//! All paths handed to external tools are relative to the project root (the
//! tools run with the root as their working directory); file operations get
//! absolute paths via [`ProjectLayout::resolve`].

use std::path::{Path, PathBuf};

/// Where a project keeps its themes, outputs and tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    src_dir: PathBuf,
    out_dir: PathBuf,
    bin_dir: PathBuf,
    base_descriptor: PathBuf,
}

impl ProjectLayout {
    /// Layout with the conventional directories: `src`, `dist/src`,
    /// `node_modules/.bin` and `tsconfig.json`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            src_dir: PathBuf::from("src"),
            out_dir: PathBuf::from("dist").join("src"),
            bin_dir: PathBuf::from("node_modules").join(".bin"),
            base_descriptor: PathBuf::from("tsconfig.json"),
        }
    }

    pub fn with_src_dir(mut self, src_dir: impl Into<PathBuf>) -> Self {
        self.src_dir = src_dir.into();
        self
    }

    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    pub fn with_bin_dir(mut self, bin_dir: impl Into<PathBuf>) -> Self {
        self.bin_dir = bin_dir.into();
        self
    }

    pub fn with_base_descriptor(mut self, base_descriptor: impl Into<PathBuf>) -> Self {
        self.base_descriptor = base_descriptor.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a root-relative path. Absolute paths are returned unchanged.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// `src/<theme>`, relative to the root.
    pub fn theme_source_dir(&self, theme: &str) -> PathBuf {
        self.src_dir.join(theme)
    }

    /// `dist/src/<theme>`, relative to the root.
    pub fn theme_output_dir(&self, theme: &str) -> PathBuf {
        self.out_dir.join(theme)
    }

    /// Absolute directory holding the project-local tool executables.
    pub fn bin_dir(&self) -> PathBuf {
        self.resolve(&self.bin_dir)
    }

    /// Absolute path of the project descriptor scoped descriptors extend.
    pub fn base_descriptor(&self) -> PathBuf {
        self.resolve(&self.base_descriptor)
    }

    pub fn package_json(&self) -> PathBuf {
        self.root.join("package.json")
    }
}

/// A path as a string with forward slashes, the form external tools expect.
pub(crate) fn slashed(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Join a directory and a glob with forward slashes, whatever the platform.
pub(crate) fn glob_in(dir: &Path, pattern: &str) -> String {
    let mut glob = slashed(dir);
    if !glob.is_empty() && !glob.ends_with('/') {
        glob.push('/');
    }
    glob.push_str(pattern);
    glob
}
