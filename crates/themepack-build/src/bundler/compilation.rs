//! Plugin hooks a bundler exposes while it compiles.

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Identity of the chunk whose output path is being finalised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkInfo {
    pub name: String,
}

impl ChunkInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Rewrites an output-path template for a chunk.
///
/// Receives the template as produced by the previous hook (or the raw
/// template for the first one) and returns the rewritten template.
pub type AssetPathHook = Arc<dyn Fn(&str, &ChunkInfo) -> String + Send + Sync>;

/// A plugin applied once per compilation.
pub trait BundlePlugin: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Register hooks on a compilation that is about to start.
    fn apply(&self, compilation: &mut Compilation);
}

pub type SharedPlugin = Arc<dyn BundlePlugin>;

/// Hooks and definitions collected from plugins for a single compilation.
#[derive(Default, Clone)]
pub struct Compilation {
    asset_path_hooks: Vec<AssetPathHook>,
    definitions: IndexMap<String, String>,
}

impl Compilation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a compilation with every plugin applied, in order.
    pub fn from_plugins(plugins: &[SharedPlugin]) -> Self {
        let mut compilation = Self::new();
        for plugin in plugins {
            tracing::debug!(plugin = plugin.name(), "applying plugin");
            plugin.apply(&mut compilation);
        }
        compilation
    }

    pub fn on_asset_path<F>(&mut self, hook: F)
    where
        F: Fn(&str, &ChunkInfo) -> String + Send + Sync + 'static,
    {
        self.asset_path_hooks.push(Arc::new(hook));
    }

    /// Run every asset-path hook over `template` in registration order.
    pub fn asset_path(&self, template: &str, chunk: &ChunkInfo) -> String {
        self.asset_path_hooks
            .iter()
            .fold(template.to_string(), |path, hook| hook(&path, chunk))
    }

    /// Define a global replaced at compile time. `value` is a JS expression.
    pub fn define(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.definitions.insert(key.into(), value.into());
    }

    pub fn definitions(&self) -> &IndexMap<String, String> {
        &self.definitions
    }
}

impl fmt::Debug for Compilation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compilation")
            .field("asset_path_hooks", &self.asset_path_hooks.len())
            .field("definitions", &self.definitions)
            .finish()
    }
}
