use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::validation::{parse_release, parse_theme_name};

/// Available themepack subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a theme
    ///
    /// Clears dist/src/<name>, generates CSS module typings, compiles
    /// index.d.ts, copies declaration and style files, then bundles the
    /// library and custom-element builds.
    Build(BuildArgs),

    /// Write the resolved build configuration to disk
    ///
    /// Produces bundle.config.json, build-options.json and the
    /// theme-installer.js shim so the bundle step can be run by hand.
    Eject(EjectArgs),
}

/// Options shared by every command that targets a theme.
#[derive(Args, Debug, Clone, Default)]
pub struct ThemeArgs {
    /// The name of the theme. Used to set the filename of custom element-compatible builds.
    #[arg(short = 'n', long, value_parser = parse_theme_name)]
    pub name: Option<String>,

    /// The version to use when generating custom element-compatible builds. Defaults to the package.json version.
    #[arg(short = 'r', long, value_parser = parse_release)]
    pub release: Option<String>,

    /// Project root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Path to a config file (defaults to themepack.config.json in the project root)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for the build command
#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    #[command(flatten)]
    pub theme: ThemeArgs,
}

/// Arguments for the eject command
#[derive(Args, Debug, Clone)]
pub struct EjectArgs {
    #[command(flatten)]
    pub theme: ThemeArgs,

    /// Directory the ejected files are written to, relative to the project root
    #[arg(short = 'o', long, default_value = "config/build-theme", value_name = "DIR")]
    pub out: PathBuf,
}
