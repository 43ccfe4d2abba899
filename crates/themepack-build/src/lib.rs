//! # themepack-build
//!
//! Build pipeline for distributable theme packages.
//!
//! A theme lives in `src/<name>/` and is turned into `dist/src/<name>/` by a
//! fixed sequence of stages:
//!
//! ```text
//! clear output → CSS module typings → index.d.ts → copy d.ts/css → bundle
//! ```
//!
//! Every stage talks to the outside world through a trait seam:
//!
//! - [`ToolRunner`] spawns project-local executables (`tcm`, `tsc`, `esbuild`)
//! - [`FileOps`] clears, copies and creates temporary files
//! - [`Bundler`] turns a [`BundleConfig`] into emitted files
//! - [`ProgressReporter`] receives started/succeeded/failed signals
//!
//! The bundle step produces two artifacts from one output template: the
//! library bundle (`index.js`/`index.css`) and the self-registering
//! custom-element bundle (`<name>-<version>.js`/`.css`). The file names come
//! from [`ArtifactNamePlugin`], which rewrites the `[custom]` placeholder
//! per chunk.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use themepack_build::{
//!     BuildPipeline, BuildRequest, EsbuildBundler, LocalFileOps, LocalToolRunner,
//!     PipelineOutcome, ProjectLayout,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let layout = ProjectLayout::new("/path/to/project");
//! let request = BuildRequest::new("my-theme", Some("1.2.0".to_string()))?;
//!
//! let runner = Arc::new(LocalToolRunner::new(layout.bin_dir()));
//! let bundler = Arc::new(EsbuildBundler::new(runner.clone(), layout.root()));
//! let fs = Arc::new(LocalFileOps::new(layout.root()));
//!
//! match BuildPipeline::new(request, layout, runner, fs, bundler).run().await {
//!     PipelineOutcome::Succeeded { stats } => println!("{} files", stats.files.len()),
//!     PipelineOutcome::Failed(failure) => eprintln!("{}", failure),
//! }
//! # Ok(()) }
//! ```

pub mod bundler;
pub mod config;
pub mod error;
pub mod fs_ops;
pub mod layout;
pub mod pipeline;
pub mod plugins;
pub mod request;
pub mod runner;
pub mod temp_project;
pub mod version;

pub use bundler::{
    BundlePlugin, BundleStats, Bundler, ChunkInfo, Compilation, EmittedFile, EsbuildBundler,
    SharedPlugin,
};
pub use config::{BundleConfig, BundleConfigBuilder, EntryPoint, ModuleRule, RuleUse};
pub use error::{BuildError, FileOperation, Result};
pub use fs_ops::{FileOps, LocalFileOps};
pub use layout::ProjectLayout;
pub use pipeline::{
    BuildPipeline, PipelineOutcome, PipelineSettings, PipelineState, ProgressReporter, Stage,
    StageFailure, StageKind, TracingReporter,
};
pub use plugins::{ArtifactNamePlugin, DefinePlugin, OUTPUT_PLACEHOLDER};
pub use request::BuildRequest;
pub use runner::{LocalToolRunner, ToolRunner};
pub use temp_project::{ProjectDescriptor, ScopedTempProject};
