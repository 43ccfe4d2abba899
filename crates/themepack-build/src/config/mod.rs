//! Bundle configuration.
//!
//! A [`BundleConfig`] is built fresh for every pipeline run by
//! [`BundleConfigBuilder`] and handed to the [`Bundler`](crate::Bundler)
//! unchanged. It serializes to JSON so it can be inspected or ejected.

mod builder;
mod rules;
pub mod shim;

pub use builder::BundleConfigBuilder;
pub use rules::{ModuleRule, PostProcessPlugin, RuleUse};

use crate::bundler::{Compilation, SharedPlugin};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Placeholder in output templates rewritten per chunk.
pub const OUTPUT_PLACEHOLDER: &str = "[custom]";

/// A source module the bundler starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EntryPoint {
    /// Bundle the module directly.
    Module { path: PathBuf },
    /// Bundle `module` behind a shim that registers it under `theme_name`.
    SelfRegistering { module: PathBuf, theme_name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryTarget {
    Umd,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    /// Script file template, containing [`OUTPUT_PLACEHOLDER`].
    pub filename: String,
    pub path: PathBuf,
    /// Global name template; `[name]` is the chunk name.
    pub library: String,
    pub library_target: LibraryTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOutput {
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveOptions {
    pub modules: Vec<PathBuf>,
    pub extensions: Vec<String>,
    pub alias: BTreeMap<String, PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleConfig {
    /// Chunk name to entry point, in emission order.
    pub entry: IndexMap<String, EntryPoint>,
    pub output: OutputOptions,
    pub style_output: StyleOutput,
    pub resolve: ResolveOptions,
    pub sourcemap: bool,
    pub minify: bool,
    #[serde(serialize_with = "serialize_plugin_names")]
    pub plugins: Vec<SharedPlugin>,
    pub module_rules: Vec<ModuleRule>,
}

impl BundleConfig {
    /// A compilation with every configured plugin applied.
    pub fn compilation(&self) -> Compilation {
        Compilation::from_plugins(&self.plugins)
    }

    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }
}

fn serialize_plugin_names<S: Serializer>(
    plugins: &[SharedPlugin],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(plugins.iter().map(|p| p.name()))
}
