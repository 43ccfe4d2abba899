use crate::error::BuildError;
use crate::layout::ProjectLayout;
use crate::request::BuildRequest;
use std::fmt;
use thiserror::Error;

/// Where a pipeline is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    ClearingOutput,
    GeneratingStyleTypes,
    CompilingDeclarations,
    CopyingArtifacts,
    Bundling,
    Succeeded,
    Failed,
}

impl PipelineState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::ClearingOutput => "clearing output",
            Self::GeneratingStyleTypes => "generating style types",
            Self::CompilingDeclarations => "compiling declarations",
            Self::CopyingArtifacts => "copying artifacts",
            Self::Bundling => "bundling",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    ClearOutput,
    StyleTypes,
    Declarations,
    CopyArtifacts,
    Bundle,
}

impl StageKind {
    /// The state the pipeline is in while this stage runs.
    pub fn state(self) -> PipelineState {
        match self {
            Self::ClearOutput => PipelineState::ClearingOutput,
            Self::StyleTypes => PipelineState::GeneratingStyleTypes,
            Self::Declarations => PipelineState::CompilingDeclarations,
            Self::CopyArtifacts => PipelineState::CopyingArtifacts,
            Self::Bundle => PipelineState::Bundling,
        }
    }
}

/// One step of a build, with the message reported if it fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub kind: StageKind,
    pub name: &'static str,
    pub failure_message: String,
}

impl Stage {
    /// The fixed stage order for `request`.
    pub fn sequence(request: &BuildRequest, layout: &ProjectLayout) -> Vec<Stage> {
        let theme = request.theme_name();
        vec![
            Stage {
                kind: StageKind::ClearOutput,
                name: "clearing output",
                failure_message: format!(
                    "Failed to clear output directory {}",
                    layout.theme_output_dir(theme).display()
                ),
            },
            Stage {
                kind: StageKind::StyleTypes,
                name: "building CSS modules",
                failure_message: "Failed to build CSS modules".to_string(),
            },
            Stage {
                kind: StageKind::Declarations,
                name: "building declarations",
                failure_message: format!("Failed to build {}/index.d.ts", theme),
            },
            Stage {
                kind: StageKind::CopyArtifacts,
                name: "copying declarations and styles",
                failure_message: format!("Failed to copy {} declaration and style files", theme),
            },
            Stage {
                kind: StageKind::Bundle,
                name: "bundling",
                failure_message: format!("Failed to build {} theme bundles", theme),
            },
        ]
    }
}

/// The stage that stopped a pipeline, and why.
///
/// Displays as the stage's failure message; the collaborator error is the
/// source.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StageFailure {
    pub stage: StageKind,
    pub message: String,
    #[source]
    pub error: BuildError,
}
