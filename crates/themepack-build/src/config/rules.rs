//! Per-file-type transformation rules.

use crate::error::{BuildError, Result};
use regex::Regex;
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

/// Files a rule applies to, and the chain of transformations run on them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRule {
    #[serde(serialize_with = "serialize_regex")]
    pub test: Regex,
    /// Only files below this directory are matched.
    pub include: PathBuf,
    /// Extensions covered by `test`, for bundlers that configure loaders per
    /// extension rather than per pattern.
    pub extensions: Vec<String>,
    #[serde(rename = "use")]
    pub uses: Vec<RuleUse>,
}

impl ModuleRule {
    pub fn new(
        test: &str,
        include: impl Into<PathBuf>,
        extensions: &[&str],
        uses: Vec<RuleUse>,
    ) -> Result<Self> {
        let test = Regex::new(test).map_err(|e| {
            BuildError::config_resolution(format!("invalid module rule pattern '{}': {}", test, e))
        })?;
        Ok(Self {
            test,
            include: include.into(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            uses,
        })
    }

    pub fn matches(&self, path: &Path) -> bool {
        path.starts_with(&self.include) && self.test.is_match(&path.to_string_lossy())
    }
}

fn serialize_regex<S: Serializer>(regex: &Regex, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(regex.as_str())
}

/// One step of a rule's transformation chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "loader", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RuleUse {
    /// Compile TypeScript. Declarations come from a separate stage.
    TypeScript { instance: String, declaration: bool },

    /// Emit the file as-is under a content-hashed name.
    File {
        hash_algorithm: String,
        digest: String,
        name: String,
        output_path: String,
        public_path: String,
    },

    /// Attach scoping metadata to each style module.
    StyleModuleDecorator,

    /// Scope class names and export the computed mapping.
    StyleModules {
        modules: bool,
        source_map: bool,
        import_loaders: u8,
        local_ident_name: String,
    },

    /// Post-process stylesheets.
    PostProcess { plugins: Vec<PostProcessPlugin> },

    /// Pull all style output into a single file named by `filename`.
    ExtractStyles { filename: String, fallback: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "name", rename_all = "kebab-case")]
pub enum PostProcessPlugin {
    /// Inline nested `@import`s.
    Import,
    /// Lower modern syntax and add vendor prefixes for `browsers`.
    PresetEnv { browsers: Vec<String> },
}
