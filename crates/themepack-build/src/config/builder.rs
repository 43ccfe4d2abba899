use super::{
    BundleConfig, EntryPoint, LibraryTarget, ModuleRule, OutputOptions, PostProcessPlugin,
    ResolveOptions, RuleUse, StyleOutput, OUTPUT_PLACEHOLDER,
};
use crate::bundler::SharedPlugin;
use crate::error::Result;
use crate::layout::ProjectLayout;
use crate::plugins::{ArtifactNamePlugin, DefinePlugin};
use crate::request::BuildRequest;
use crate::version::resolve_release_version;
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

const SCRIPT_PATTERN: &str = r"\.ts$";
const ASSET_PATTERN: &str = r"(?i)\.(gif|png|jpe?g|svg|eot|ttf|woff|woff2)$";
const STYLE_PATTERN: &str = r"\.css$";
const ASSET_EXTENSIONS: &[&str] = &[
    ".gif", ".png", ".jpg", ".jpeg", ".svg", ".eot", ".ttf", ".woff", ".woff2",
];
const BROWSER_TARGETS: &[&str] = &["last 2 versions", "ie >= 10"];

/// Assembles the [`BundleConfig`] for a request.
///
/// Only reads `package.json` when the request carries no release version.
#[derive(Debug, Clone)]
pub struct BundleConfigBuilder<'a> {
    layout: &'a ProjectLayout,
    minify: bool,
    sourcemap: bool,
}

impl<'a> BundleConfigBuilder<'a> {
    pub fn new(layout: &'a ProjectLayout) -> Self {
        Self {
            layout,
            minify: true,
            sourcemap: true,
        }
    }

    pub fn minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    pub fn sourcemap(mut self, sourcemap: bool) -> Self {
        self.sourcemap = sourcemap;
        self
    }

    pub async fn build(&self, request: &BuildRequest) -> Result<BundleConfig> {
        let theme = request.theme_name();
        let version = resolve_release_version(request, &self.layout.package_json()).await?;
        let root = self.layout.root();
        let theme_dir = self.layout.resolve(self.layout.theme_source_dir(theme));
        let theme_module = theme_dir.join("index.ts");

        let mut entry = IndexMap::new();
        entry.insert(
            request.custom_element_chunk(),
            EntryPoint::SelfRegistering {
                module: theme_module.clone(),
                theme_name: theme.to_string(),
            },
        );
        entry.insert(
            request.library_chunk().to_string(),
            EntryPoint::Module { path: theme_module },
        );

        let style_filename = format!("{}.css", OUTPUT_PLACEHOLDER);
        let plugins: Vec<SharedPlugin> = vec![
            Arc::new(DefinePlugin::theme_name(theme)),
            // Must stay last so it sees the final template.
            Arc::new(ArtifactNamePlugin::new(theme, &version)),
        ];

        Ok(BundleConfig {
            entry,
            output: OutputOptions {
                filename: format!("{}.js", OUTPUT_PLACEHOLDER),
                path: self.layout.resolve(self.layout.theme_output_dir(theme)),
                library: "[name]".to_string(),
                library_target: LibraryTarget::Umd,
            },
            style_output: StyleOutput {
                filename: style_filename.clone(),
            },
            resolve: ResolveOptions {
                modules: vec![root.to_path_buf(), root.join("node_modules")],
                extensions: vec![".ts".to_string(), ".js".to_string()],
                alias: BTreeMap::from([("assets".to_string(), root.join("assets"))]),
            },
            sourcemap: self.sourcemap,
            minify: self.minify,
            plugins,
            module_rules: module_rules(&theme_dir, &style_filename)?,
        })
    }
}

fn module_rules(theme_dir: &Path, style_filename: &str) -> Result<Vec<ModuleRule>> {
    let script = ModuleRule::new(
        SCRIPT_PATTERN,
        theme_dir,
        &[".ts"],
        vec![RuleUse::TypeScript {
            instance: "themepack".to_string(),
            declaration: false,
        }],
    )?;

    let asset = ModuleRule::new(
        ASSET_PATTERN,
        theme_dir,
        ASSET_EXTENSIONS,
        vec![RuleUse::File {
            hash_algorithm: "sha512".to_string(),
            digest: "hex".to_string(),
            name: "[hash:base64:8].[ext]".to_string(),
            output_path: "assets/".to_string(),
            public_path: "/assets/".to_string(),
        }],
    )?;

    let style = ModuleRule::new(
        STYLE_PATTERN,
        theme_dir,
        &[".css", ".m.css"],
        vec![
            RuleUse::StyleModuleDecorator,
            RuleUse::StyleModules {
                modules: true,
                source_map: true,
                import_loaders: 1,
                local_ident_name: "[name]__[local]__[hash:base64:5]".to_string(),
            },
            RuleUse::PostProcess {
                plugins: vec![
                    PostProcessPlugin::Import,
                    PostProcessPlugin::PresetEnv {
                        browsers: BROWSER_TARGETS.iter().map(|b| b.to_string()).collect(),
                    },
                ],
            },
            RuleUse::ExtractStyles {
                filename: style_filename.to_string(),
                fallback: "style".to_string(),
            },
        ],
    )?;

    Ok(vec![script, asset, style])
}
