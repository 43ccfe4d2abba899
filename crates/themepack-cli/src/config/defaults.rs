use std::path::PathBuf;

use crate::config::ThemepackConfig;

pub fn default_src_dir() -> PathBuf {
    PathBuf::from("src")
}

pub fn default_out_dir() -> PathBuf {
    PathBuf::from("dist/src")
}

pub fn default_bin_dir() -> PathBuf {
    PathBuf::from("node_modules/.bin")
}

pub fn default_tsconfig() -> PathBuf {
    PathBuf::from("tsconfig.json")
}

pub fn default_style_codegen() -> String {
    "tcm".to_string()
}

pub fn default_declaration_compiler() -> String {
    "tsc".to_string()
}

pub fn default_bundler() -> String {
    "esbuild".to_string()
}

pub fn default_true() -> bool {
    true
}

impl ThemepackConfig {
    pub(crate) fn default_config() -> Self {
        Self {
            name: None,
            release: None,
            cwd: None,
            src_dir: default_src_dir(),
            out_dir: default_out_dir(),
            bin_dir: default_bin_dir(),
            tsconfig: default_tsconfig(),
            style_codegen: default_style_codegen(),
            declaration_compiler: default_declaration_compiler(),
            bundler: default_bundler(),
            minify: true,
            sourcemap: true,
            copy_assets: true,
        }
    }
}
