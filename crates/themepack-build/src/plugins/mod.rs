//! Built-in bundle plugins.

mod artifact_name;
mod define;

pub use crate::config::OUTPUT_PLACEHOLDER;
pub use artifact_name::ArtifactNamePlugin;
pub use define::DefinePlugin;
