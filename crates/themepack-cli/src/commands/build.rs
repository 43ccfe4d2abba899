//! `themepack build`.

use crate::cli::BuildArgs;
use crate::commands::utils::resolve_theme;
use crate::error::Result;
use crate::ui;
use std::sync::Arc;
use std::time::Instant;
use themepack_build::{
    BuildPipeline, EsbuildBundler, LocalFileOps, LocalToolRunner, PipelineOutcome,
};
use tracing::info;

/// Run the build pipeline for one theme.
///
/// Returns the stage failure as an error so the process exits non-zero.
pub async fn execute(args: BuildArgs, quiet: bool) -> Result<()> {
    let start = Instant::now();
    let target = resolve_theme(&args.theme).await?;
    let config = target.config;
    let layout = target.layout;

    let runner = Arc::new(LocalToolRunner::new(layout.bin_dir()));
    let bundler =
        Arc::new(EsbuildBundler::new(runner.clone(), layout.root()).with_tool(&config.bundler));
    let fs = Arc::new(LocalFileOps::new(layout.root()));
    let reporter = Arc::new(ui::SpinnerReporter::new(quiet));

    let outcome = BuildPipeline::new(target.request, layout, runner, fs, bundler)
        .with_settings(config.pipeline_settings())
        .with_reporter(reporter)
        .run()
        .await;

    match outcome {
        PipelineOutcome::Succeeded { stats } => {
            info!(files = stats.files.len(), "build finished");
            if !quiet {
                ui::print_build_summary(&stats, start.elapsed());
            }
            Ok(())
        }
        PipelineOutcome::Failed(failure) => Err(failure.into()),
    }
}
