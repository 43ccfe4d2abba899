//! [`Bundler`] backed by the project-local `esbuild` executable.
//!
//! esbuild takes one entry per invocation here, so every chunk gets its own
//! run with its own output file. Options with no esbuild equivalent are
//! mapped as follows:
//!
//! - the UMD library target becomes IIFE output assigned to a global named
//!   after the chunk (`my-theme-custom-element` → `myThemeCustomElement`)
//! - `resolve.modules` is not passed; esbuild already searches `node_modules`
//! - the style extraction template is honoured by renaming the stylesheet
//!   esbuild writes next to the script

use super::{BundleStats, Bundler, ChunkInfo, Compilation};
use crate::config::{shim, BundleConfig, EntryPoint, LibraryTarget, ModuleRule, RuleUse};
use crate::error::{BuildError, FileOperation, Result};
use crate::layout::slashed;
use crate::runner::ToolRunner;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

pub struct EsbuildBundler {
    runner: Arc<dyn ToolRunner>,
    tool: String,
    cwd: PathBuf,
}

impl EsbuildBundler {
    pub fn new(runner: Arc<dyn ToolRunner>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            tool: "esbuild".to_string(),
            cwd: cwd.into(),
        }
    }

    /// Use a differently named executable from the bin directory.
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    fn arguments(
        &self,
        config: &BundleConfig,
        compilation: &Compilation,
        chunk: &ChunkInfo,
        entry: &Path,
        outfile: &Path,
    ) -> Vec<String> {
        let mut args = vec![
            slashed(entry),
            "--bundle".to_string(),
            "--format=iife".to_string(),
            format!(
                "--global-name={}",
                global_name(&config.output.library.replace("[name]", &chunk.name))
            ),
            format!("--outfile={}", slashed(outfile)),
            format!(
                "--resolve-extensions={}",
                config.resolve.extensions.join(",")
            ),
            "--log-level=warning".to_string(),
        ];

        if config.sourcemap {
            args.push("--sourcemap".to_string());
        }
        if config.minify {
            args.push("--minify".to_string());
        }

        for (alias, target) in &config.resolve.alias {
            args.push(format!("--alias:{}={}", alias, slashed(target)));
        }
        for (key, value) in compilation.definitions() {
            args.push(format!("--define:{}={}", key, value));
        }
        for rule in &config.module_rules {
            args.extend(rule_arguments(rule));
        }

        args
    }

    async fn entry_file(&self, entry: &EntryPoint, chunk: &ChunkInfo, shim_dir: &Path) -> Result<PathBuf> {
        match entry {
            EntryPoint::Module { path } => Ok(path.clone()),
            EntryPoint::SelfRegistering { module, theme_name } => {
                let path = shim_dir.join(format!("{}.js", chunk.name));
                tokio::fs::write(&path, shim::render_installer(module, theme_name))
                    .await
                    .map_err(|e| BuildError::file_operation(FileOperation::Write, &path, e))?;
                Ok(path)
            }
        }
    }
}

impl std::fmt::Debug for EsbuildBundler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EsbuildBundler")
            .field("tool", &self.tool)
            .field("cwd", &self.cwd)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Bundler for EsbuildBundler {
    async fn run(&self, config: BundleConfig) -> Result<BundleStats> {
        match config.output.library_target {
            LibraryTarget::Umd => debug!("UMD output is emitted as IIFE with a global name"),
        }

        let compilation = config.compilation();
        let output_dir = &config.output.path;
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|e| BuildError::file_operation(FileOperation::Write, output_dir, e))?;

        let shim_dir = tokio::task::spawn_blocking(|| {
            tempfile::Builder::new().prefix("themepack-shim-").tempdir()
        })
        .await
        .map_err(std::io::Error::other)
        .and_then(|created| created)
        .map_err(|e| {
            BuildError::file_operation(FileOperation::CreateTempDir, std::env::temp_dir(), e)
        })?;

        for (name, entry) in &config.entry {
            let chunk = ChunkInfo::new(name.as_str());
            let script_name = compilation
                .asset_path(&config.output.filename, &chunk)
                .replace("[name]", name);
            let style_name = compilation
                .asset_path(&config.style_output.filename, &chunk)
                .replace("[name]", name);

            let entry_file = self.entry_file(entry, &chunk, shim_dir.path()).await?;
            let outfile = output_dir.join(&script_name);
            let args = self.arguments(&config, &compilation, &chunk, &entry_file, &outfile);

            info!(chunk = %name, file = %script_name, "bundling chunk");
            self.runner
                .run(&self.tool, &args, &self.cwd)
                .await
                .map_err(|e| match e {
                    BuildError::ToolExecution { message, .. } => {
                        BuildError::bundler(format!("{}: {}", name, message))
                    }
                    other => other,
                })?;

            rename_stylesheet(&outfile, &output_dir.join(&style_name)).await?;
        }

        BundleStats::collect(output_dir)
    }
}

/// Move the stylesheet esbuild wrote beside `script` to `target`.
async fn rename_stylesheet(script: &Path, target: &Path) -> Result<()> {
    let emitted = script.with_extension("css");
    if emitted == target || !emitted.exists() {
        return Ok(());
    }
    tokio::fs::rename(&emitted, target)
        .await
        .map_err(|e| BuildError::file_operation(FileOperation::Write, target, e))?;

    let emitted_map = PathBuf::from(format!("{}.map", emitted.display()));
    if emitted_map.exists() {
        let target_map = PathBuf::from(format!("{}.map", target.display()));
        tokio::fs::rename(&emitted_map, &target_map)
            .await
            .map_err(|e| BuildError::file_operation(FileOperation::Write, &target_map, e))?;
    }
    Ok(())
}

fn rule_arguments(rule: &ModuleRule) -> Vec<String> {
    let Some(first) = rule.uses.first() else {
        return Vec::new();
    };

    let mut args = Vec::new();
    match first {
        RuleUse::TypeScript { .. } => {
            for ext in &rule.extensions {
                args.push(format!("--loader:{}=ts", ext));
            }
        }
        RuleUse::File {
            output_path,
            public_path,
            ..
        } => {
            for ext in &rule.extensions {
                args.push(format!("--loader:{}=file", ext));
            }
            args.push(format!("--asset-names={}[hash]", output_path));
            let public = public_path
                .strip_suffix(output_path.as_str())
                .unwrap_or(public_path);
            args.push(format!("--public-path={}", public));
        }
        RuleUse::StyleModuleDecorator
        | RuleUse::StyleModules { .. }
        | RuleUse::PostProcess { .. }
        | RuleUse::ExtractStyles { .. } => {
            let scoped = rule
                .uses
                .iter()
                .any(|u| matches!(u, RuleUse::StyleModules { modules: true, .. }));
            for ext in &rule.extensions {
                // Only `.m.css` files are style modules; plain `.css` stays global.
                let loader = if scoped && ext.as_str() == ".m.css" {
                    "local-css"
                } else {
                    "css"
                };
                args.push(format!("--loader:{}={}", ext, loader));
            }
        }
    }
    args
}

/// A JS identifier from a chunk name: `my-theme-custom-element` → `myThemeCustomElement`.
fn global_name(name: &str) -> String {
    let mut ident = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
            if upper_next && !ident.is_empty() {
                ident.push(c.to_ascii_uppercase());
            } else {
                ident.push(c);
            }
            upper_next = false;
        } else {
            upper_next = true;
        }
    }
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}
