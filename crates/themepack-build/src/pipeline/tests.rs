use super::*;
use crate::bundler::EmittedFile;
use crate::config::BundleConfig;
use crate::error::{BuildError, FileOperation};
use crate::fs_ops::LocalFileOps;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TEMP_DIR: &str = "/tmp/themepack-fake";

#[derive(Default)]
struct FakeRunner {
    calls: Mutex<Vec<(String, Vec<String>)>>,
    fail_tool: Option<&'static str>,
    /// Log shared with [`FakeFs`] so tool runs interleave with file operations.
    log: Option<Arc<Mutex<Vec<String>>>>,
}

#[async_trait]
impl ToolRunner for FakeRunner {
    async fn run(&self, tool: &str, args: &[String], _cwd: &Path) -> Result<()> {
        self.calls.lock().push((tool.to_string(), args.to_vec()));
        if let Some(log) = &self.log {
            log.lock().push(format!("run {}", tool));
        }
        if self.fail_tool == Some(tool) {
            return Err(BuildError::tool_execution(tool, Some(1), "boom"));
        }
        Ok(())
    }
}

#[derive(Default)]
struct FakeFs {
    log: Arc<Mutex<Vec<String>>>,
    fail_remove: bool,
}

#[async_trait]
impl FileOps for FakeFs {
    async fn clear_directory(&self, path: &Path) -> Result<()> {
        self.log.lock().push(format!("clear {}", path.display()));
        Ok(())
    }

    async fn copy_matching(&self, pattern: &str, destination: &Path) -> Result<usize> {
        self.log
            .lock()
            .push(format!("copy {} -> {}", pattern, destination.display()));
        Ok(0)
    }

    async fn create_temp_directory(&self, _prefix: &str) -> Result<PathBuf> {
        self.log.lock().push("mkdtemp".to_string());
        Ok(PathBuf::from(TEMP_DIR))
    }

    async fn write_file(&self, path: &Path, _contents: &[u8]) -> Result<()> {
        self.log.lock().push(format!("write {}", path.display()));
        Ok(())
    }

    async fn remove_file(&self, path: &Path) -> Result<()> {
        self.log.lock().push(format!("remove_file {}", path.display()));
        if self.fail_remove {
            return Err(BuildError::file_operation(
                FileOperation::RemoveFile,
                path,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ));
        }
        Ok(())
    }

    async fn remove_directory(&self, path: &Path) -> Result<()> {
        self.log.lock().push(format!("remove_dir {}", path.display()));
        Ok(())
    }
}

#[derive(Default)]
struct FakeBundler {
    configs: Mutex<Vec<Vec<String>>>,
    fail: bool,
}

#[async_trait]
impl Bundler for FakeBundler {
    async fn run(&self, config: BundleConfig) -> Result<BundleStats> {
        self.configs.lock().push(config.entry.keys().cloned().collect());
        if self.fail {
            return Err(BuildError::bundler("module not found"));
        }
        Ok(BundleStats {
            output_dir: config.output.path.clone(),
            files: vec![EmittedFile {
                path: "index.js".to_string(),
                size: 10,
            }],
        })
    }
}

#[derive(Default)]
struct RecordingReporter {
    events: Mutex<Vec<String>>,
}

impl ProgressReporter for RecordingReporter {
    fn started(&self, label: &str) {
        self.events.lock().push(format!("started {}", label));
    }

    fn stage(&self, _label: &str, stage: &Stage) {
        self.events.lock().push(format!("stage {:?}", stage.kind));
    }

    fn succeeded(&self, label: &str) {
        self.events.lock().push(format!("succeeded {}", label));
    }

    fn failed(&self, label: &str, message: &str) {
        self.events.lock().push(format!("failed {}: {}", label, message));
    }
}

struct Harness {
    _project: TempDir,
    layout: ProjectLayout,
    runner: Arc<FakeRunner>,
    fs: Arc<FakeFs>,
    bundler: Arc<FakeBundler>,
    reporter: Arc<RecordingReporter>,
}

impl Harness {
    fn new(runner: FakeRunner, fs: FakeFs, bundler: FakeBundler) -> Self {
        let project = TempDir::new().unwrap();
        std::fs::write(project.path().join("package.json"), r#"{"version":"1.1.1"}"#).unwrap();
        let layout = ProjectLayout::new(project.path());
        Self {
            _project: project,
            layout,
            runner: Arc::new(runner),
            fs: Arc::new(fs),
            bundler: Arc::new(bundler),
            reporter: Arc::new(RecordingReporter::default()),
        }
    }

    fn pipeline(&self, settings: PipelineSettings) -> BuildPipeline {
        let request = BuildRequest::new("my-theme", None).unwrap();
        BuildPipeline::new(
            request,
            self.layout.clone(),
            self.runner.clone(),
            self.fs.clone(),
            self.bundler.clone(),
        )
        .with_settings(settings)
        .with_reporter(self.reporter.clone())
    }

    async fn run(&self) -> PipelineOutcome {
        self.pipeline(PipelineSettings::default()).run().await
    }

    fn tools(&self) -> Vec<String> {
        self.runner.calls.lock().iter().map(|(t, _)| t.clone()).collect()
    }

    fn fs_log(&self) -> Vec<String> {
        self.fs.log.lock().clone()
    }
}

fn failure(outcome: PipelineOutcome) -> StageFailure {
    match outcome {
        PipelineOutcome::Failed(failure) => failure,
        PipelineOutcome::Succeeded { .. } => panic!("expected the pipeline to fail"),
    }
}

#[tokio::test]
async fn test_success_runs_every_stage_in_order() {
    let h = Harness::new(FakeRunner::default(), FakeFs::default(), FakeBundler::default());
    let outcome = h.run().await;

    assert_eq!(outcome.state(), PipelineState::Succeeded);
    assert_eq!(h.tools(), ["tcm", "tsc"]);
    assert_eq!(
        h.bundler.configs.lock().clone(),
        [vec!["my-theme-custom-element".to_string(), "my-theme".to_string()]]
    );

    let descriptor = format!("{}/tsconfig.json", TEMP_DIR);
    assert_eq!(
        h.fs_log(),
        [
            "clear dist/src/my-theme".to_string(),
            "mkdtemp".to_string(),
            format!("write {}", descriptor),
            "copy src/my-theme/*.{d.ts,css} -> dist/src/my-theme".to_string(),
            "copy src/my-theme/assets/**/* -> dist/src/my-theme/assets".to_string(),
            format!("remove_file {}", descriptor),
            format!("remove_dir {}", TEMP_DIR),
        ]
    );

    let events = h.reporter.events.lock().clone();
    assert_eq!(events.first().unwrap(), "started building my-theme theme");
    assert_eq!(events.last().unwrap(), "succeeded building my-theme theme");
    assert_eq!(events.len(), 7);

    let stats = outcome.into_result().unwrap();
    assert!(stats.contains("index.js"));
}

#[tokio::test]
async fn test_tool_arguments() {
    let h = Harness::new(FakeRunner::default(), FakeFs::default(), FakeBundler::default());
    h.run().await;

    let calls = h.runner.calls.lock().clone();
    let descriptor = format!("{}/tsconfig.json", TEMP_DIR);
    assert_eq!(calls[0].1, ["-p=src/my-theme/*.m.css"]);
    assert_eq!(
        calls[1].1,
        ["--outDir", "dist/src/my-theme", "--project", descriptor.as_str()]
    );
}

#[tokio::test]
async fn test_style_codegen_failure_stops_pipeline() {
    let runner = FakeRunner {
        fail_tool: Some("tcm"),
        ..Default::default()
    };
    let h = Harness::new(runner, FakeFs::default(), FakeBundler::default());
    let failure = failure(h.run().await);

    assert_eq!(failure.stage, StageKind::StyleTypes);
    assert_eq!(failure.message, "Failed to build CSS modules");
    assert_eq!(failure.to_string(), "Failed to build CSS modules");
    assert!(matches!(failure.error, BuildError::ToolExecution { .. }));

    assert_eq!(h.tools(), ["tcm"]);
    assert!(h.bundler.configs.lock().is_empty());
    assert_eq!(h.fs_log(), ["clear dist/src/my-theme"]);
    assert_eq!(
        h.reporter.events.lock().last().unwrap(),
        "failed building my-theme theme: Failed to build CSS modules"
    );
}

#[tokio::test]
async fn test_declaration_failure_still_removes_descriptor() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let runner = FakeRunner {
        fail_tool: Some("tsc"),
        log: Some(log.clone()),
        ..Default::default()
    };
    let fs = FakeFs {
        log,
        ..Default::default()
    };
    let h = Harness::new(runner, fs, FakeBundler::default());
    let failure = failure(h.run().await);

    assert_eq!(failure.message, "Failed to build my-theme/index.d.ts");
    assert!(h.bundler.configs.lock().is_empty());

    let descriptor = format!("{}/tsconfig.json", TEMP_DIR);
    assert_eq!(
        h.fs_log(),
        [
            "clear dist/src/my-theme".to_string(),
            "run tcm".to_string(),
            "mkdtemp".to_string(),
            format!("write {}", descriptor),
            "run tsc".to_string(),
            format!("remove_file {}", descriptor),
            format!("remove_dir {}", TEMP_DIR),
        ]
    );
}

#[tokio::test]
async fn test_bundler_failure_reports_bundle_message() {
    let bundler = FakeBundler {
        fail: true,
        ..Default::default()
    };
    let h = Harness::new(FakeRunner::default(), FakeFs::default(), bundler);
    let failure = failure(h.run().await);

    assert_eq!(failure.stage, StageKind::Bundle);
    assert_eq!(failure.message, "Failed to build my-theme theme bundles");
    assert!(h.fs_log().last().unwrap().starts_with("remove_dir"));
}

#[tokio::test]
async fn test_missing_version_fails_bundle_stage() {
    let h = Harness::new(FakeRunner::default(), FakeFs::default(), FakeBundler::default());
    std::fs::remove_file(h.layout.package_json()).unwrap();

    let failure = failure(h.run().await);
    assert_eq!(failure.stage, StageKind::Bundle);
    assert!(matches!(failure.error, BuildError::ConfigResolution { .. }));
    assert!(h.bundler.configs.lock().is_empty());
}

#[tokio::test]
async fn test_cleanup_failure_does_not_mask_success() {
    let fs = FakeFs {
        fail_remove: true,
        ..Default::default()
    };
    let h = Harness::new(FakeRunner::default(), fs, FakeBundler::default());
    let outcome = h.run().await;

    assert!(outcome.is_success());
    // The directory removal is still attempted.
    assert!(h.fs_log().last().unwrap().starts_with("remove_dir"));
}

#[tokio::test]
async fn test_settings_control_tools_and_asset_copy() {
    let h = Harness::new(FakeRunner::default(), FakeFs::default(), FakeBundler::default());
    let settings = PipelineSettings {
        style_codegen: "typed-css-modules".to_string(),
        declaration_compiler: "vue-tsc".to_string(),
        copy_assets: false,
        ..Default::default()
    };
    let outcome = h.pipeline(settings).run().await;

    assert!(outcome.is_success());
    assert_eq!(h.tools(), ["typed-css-modules", "vue-tsc"]);
    let copies = h.fs_log().iter().filter(|l| l.starts_with("copy")).count();
    assert_eq!(copies, 1);
}

/// Writes what the real tools would, so output can be checked on disk.
struct DiskRunner {
    root: PathBuf,
}

#[async_trait]
impl ToolRunner for DiskRunner {
    async fn run(&self, tool: &str, _args: &[String], _cwd: &Path) -> Result<()> {
        let src = self.root.join("src/my-theme");
        match tool {
            "tcm" => std::fs::write(src.join("button.m.css.d.ts"), "export const root: string;")
                .map_err(|e| BuildError::file_operation(FileOperation::Write, &src, e)),
            "tsc" => {
                let out = self.root.join("dist/src/my-theme");
                std::fs::create_dir_all(&out).unwrap();
                std::fs::write(out.join("index.d.ts"), "export {};")
                    .map_err(|e| BuildError::file_operation(FileOperation::Write, &out, e))
            }
            _ => Ok(()),
        }
    }
}

struct DiskBundler;

#[async_trait]
impl Bundler for DiskBundler {
    async fn run(&self, config: BundleConfig) -> Result<BundleStats> {
        let compilation = config.compilation();
        for name in config.entry.keys() {
            let chunk = crate::bundler::ChunkInfo::new(name.as_str());
            let file = compilation.asset_path(&config.output.filename, &chunk);
            std::fs::write(config.output.path.join(file), "bundle").unwrap();
        }
        BundleStats::collect(&config.output.path)
    }
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(dir)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_rerun_leaves_no_stale_output() {
    let project = TempDir::new().unwrap();
    let root = project.path();
    std::fs::write(root.join("package.json"), r#"{"version":"1.1.1"}"#).unwrap();
    std::fs::create_dir_all(root.join("src/my-theme/assets")).unwrap();
    std::fs::write(root.join("src/my-theme/index.ts"), "export default {};").unwrap();
    std::fs::write(root.join("src/my-theme/button.m.css"), ".root {}").unwrap();
    std::fs::write(root.join("src/my-theme/assets/logo.svg"), "<svg/>").unwrap();
    std::fs::create_dir_all(root.join("dist/src/my-theme")).unwrap();
    std::fs::write(root.join("dist/src/my-theme/stale.js"), "old").unwrap();

    let layout = ProjectLayout::new(root);
    let run = || {
        BuildPipeline::new(
            BuildRequest::new("my-theme", None).unwrap(),
            layout.clone(),
            Arc::new(DiskRunner {
                root: root.to_path_buf(),
            }),
            Arc::new(LocalFileOps::new(root)),
            Arc::new(DiskBundler),
        )
        .run()
    };

    assert!(run().await.is_success());
    let out = root.join("dist/src/my-theme");
    let first = file_names(&out);
    assert_eq!(
        first,
        [
            "assets/logo.svg",
            "button.m.css",
            "button.m.css.d.ts",
            "index.d.ts",
            "index.js",
            "my-theme-1.1.1.js",
        ]
    );

    assert!(run().await.is_success());
    assert_eq!(file_names(&out), first);
}
