//! The build orchestrator.
//!
//! [`BuildPipeline`] runs an ordered list of [`Stage`]s through a single
//! driver loop. Each stage returns a `Result`; the first error moves the
//! pipeline to [`PipelineState::Failed`] and no later stage runs. The scoped
//! project descriptor used by the declaration stage is released before the
//! outcome is reported, whatever that outcome is.

mod progress;
mod stage;

#[cfg(test)]
mod tests;

pub use progress::{ProgressReporter, TracingReporter};
pub use stage::{PipelineState, Stage, StageFailure, StageKind};

use crate::bundler::{BundleStats, Bundler};
use crate::config::BundleConfigBuilder;
use crate::error::Result;
use crate::fs_ops::FileOps;
use crate::layout::{glob_in, slashed, ProjectLayout};
use crate::request::BuildRequest;
use crate::runner::ToolRunner;
use crate::temp_project::{ProjectDescriptor, ScopedTempProject};
use std::sync::Arc;
use tracing::{debug, info};

/// Tool names and switches for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    pub style_codegen: String,
    pub declaration_compiler: String,
    /// Also copy `src/<theme>/assets/**` into the output directory.
    pub copy_assets: bool,
    pub minify: bool,
    pub sourcemap: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            style_codegen: "tcm".to_string(),
            declaration_compiler: "tsc".to_string(),
            copy_assets: true,
            minify: true,
            sourcemap: true,
        }
    }
}

#[derive(Debug)]
pub enum PipelineOutcome {
    Succeeded { stats: BundleStats },
    Failed(StageFailure),
}

impl PipelineOutcome {
    pub fn state(&self) -> PipelineState {
        match self {
            Self::Succeeded { .. } => PipelineState::Succeeded,
            Self::Failed(_) => PipelineState::Failed,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    pub fn into_result(self) -> std::result::Result<BundleStats, StageFailure> {
        match self {
            Self::Succeeded { stats } => Ok(stats),
            Self::Failed(failure) => Err(failure),
        }
    }
}

/// A single-use build of one theme.
pub struct BuildPipeline {
    request: BuildRequest,
    layout: ProjectLayout,
    runner: Arc<dyn ToolRunner>,
    fs: Arc<dyn FileOps>,
    bundler: Arc<dyn Bundler>,
    reporter: Arc<dyn ProgressReporter>,
    settings: PipelineSettings,
    state: PipelineState,
    temp_project: Option<ScopedTempProject>,
    stats: Option<BundleStats>,
}

impl BuildPipeline {
    pub fn new(
        request: BuildRequest,
        layout: ProjectLayout,
        runner: Arc<dyn ToolRunner>,
        fs: Arc<dyn FileOps>,
        bundler: Arc<dyn Bundler>,
    ) -> Self {
        Self {
            request,
            layout,
            runner,
            fs,
            bundler,
            reporter: Arc::new(TracingReporter),
            settings: PipelineSettings::default(),
            state: PipelineState::Idle,
            temp_project: None,
            stats: None,
        }
    }

    pub fn with_settings(mut self, settings: PipelineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Run every stage to a terminal state.
    pub async fn run(mut self) -> PipelineOutcome {
        let label = self.request.label();
        self.reporter.started(&label);

        let mut failure = None;
        for stage in Stage::sequence(&self.request, &self.layout) {
            self.transition(stage.kind.state());
            self.reporter.stage(&label, &stage);

            if let Err(error) = self.execute(stage.kind).await {
                failure = Some(StageFailure {
                    stage: stage.kind,
                    message: stage.failure_message,
                    error,
                });
                break;
            }
        }

        self.release_temp_project().await;

        match failure {
            Some(failure) => {
                self.transition(PipelineState::Failed);
                debug!(error = %failure.error, "stage failed");
                self.reporter.failed(&label, &failure.message);
                PipelineOutcome::Failed(failure)
            }
            None => {
                self.transition(PipelineState::Succeeded);
                self.reporter.succeeded(&label);
                PipelineOutcome::Succeeded {
                    stats: self.stats.take().unwrap_or_default(),
                }
            }
        }
    }

    fn transition(&mut self, next: PipelineState) {
        debug!(from = %self.state, to = %next, "pipeline transition");
        self.state = next;
    }

    async fn execute(&mut self, kind: StageKind) -> Result<()> {
        match kind {
            StageKind::ClearOutput => self.clear_output().await,
            StageKind::StyleTypes => self.generate_style_types().await,
            StageKind::Declarations => self.compile_declarations().await,
            StageKind::CopyArtifacts => self.copy_artifacts().await,
            StageKind::Bundle => self.bundle().await,
        }
    }

    async fn clear_output(&self) -> Result<()> {
        let out_dir = self.layout.theme_output_dir(self.request.theme_name());
        self.fs.clear_directory(&out_dir).await
    }

    async fn generate_style_types(&self) -> Result<()> {
        let src_dir = self.layout.theme_source_dir(self.request.theme_name());
        let args = vec![format!("-p={}", glob_in(&src_dir, "*.m.css"))];
        self.runner
            .run(&self.settings.style_codegen, &args, self.layout.root())
            .await
    }

    async fn compile_declarations(&mut self) -> Result<()> {
        let theme = self.request.theme_name();
        let descriptor = ProjectDescriptor::for_theme(&self.layout, theme);
        let project = ScopedTempProject::create(self.fs.as_ref(), &descriptor).await?;
        let descriptor_path = slashed(project.descriptor_path());
        self.temp_project = Some(project);

        let args = vec![
            "--outDir".to_string(),
            slashed(&self.layout.theme_output_dir(theme)),
            "--project".to_string(),
            descriptor_path,
        ];
        self.runner
            .run(&self.settings.declaration_compiler, &args, self.layout.root())
            .await
    }

    async fn copy_artifacts(&self) -> Result<()> {
        let theme = self.request.theme_name();
        let src_dir = self.layout.theme_source_dir(theme);
        let out_dir = self.layout.theme_output_dir(theme);

        let copied = self
            .fs
            .copy_matching(&glob_in(&src_dir, "*.{d.ts,css}"), &out_dir)
            .await?;
        debug!(copied, "copied declaration and style files");

        if self.settings.copy_assets {
            let copied = self
                .fs
                .copy_matching(&glob_in(&src_dir, "assets/**/*"), &out_dir.join("assets"))
                .await?;
            debug!(copied, "copied static assets");
        }
        Ok(())
    }

    async fn bundle(&mut self) -> Result<()> {
        let config = BundleConfigBuilder::new(&self.layout)
            .minify(self.settings.minify)
            .sourcemap(self.settings.sourcemap)
            .build(&self.request)
            .await?;
        let stats = self.bundler.run(config).await?;
        info!(files = stats.files.len(), "bundled theme");
        self.stats = Some(stats);
        Ok(())
    }

    async fn release_temp_project(&mut self) {
        if let Some(project) = self.temp_project.take() {
            project.release(self.fs.as_ref()).await;
        }
    }
}
