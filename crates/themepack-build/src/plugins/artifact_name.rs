//! Per-chunk output naming.
//!
//! Both bundles share one output template, `[custom].js` (and `[custom].css`
//! for styles). When the bundler finalises a chunk's file name, this plugin
//! replaces the placeholder:
//!
//! | chunk                          | replacement                |
//! |--------------------------------|----------------------------|
//! | `<theme>-custom-element`       | `<theme>-<release>`        |
//! | anything else                  | `index`                    |
//!
//! Templates without the placeholder pass through unchanged.

use crate::bundler::{BundlePlugin, ChunkInfo, Compilation};
use crate::config::OUTPUT_PLACEHOLDER;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNamePlugin {
    custom_element_chunk: String,
    custom_element_name: String,
}

impl ArtifactNamePlugin {
    pub fn new(theme_name: &str, release_version: &str) -> Self {
        Self {
            custom_element_chunk: format!("{}-custom-element", theme_name),
            custom_element_name: format!("{}-{}", theme_name, release_version),
        }
    }

    /// The string the placeholder becomes for `chunk`.
    pub fn replacement(&self, chunk: &ChunkInfo) -> &str {
        if chunk.name == self.custom_element_chunk {
            &self.custom_element_name
        } else {
            "index"
        }
    }

    pub fn rewrite(&self, template: &str, chunk: &ChunkInfo) -> String {
        if !template.contains(OUTPUT_PLACEHOLDER) {
            return template.to_string();
        }
        template.replacen(OUTPUT_PLACEHOLDER, self.replacement(chunk), 1)
    }
}

impl BundlePlugin for ArtifactNamePlugin {
    fn name(&self) -> &str {
        "artifact-name"
    }

    fn apply(&self, compilation: &mut Compilation) {
        let plugin = self.clone();
        compilation.on_asset_path(move |template, chunk| plugin.rewrite(template, chunk));
    }
}
