//! Command-line interface definition.
//!
//! - `themepack build` - run the build pipeline for one theme
//! - `themepack eject` - write the resolved bundle configuration to disk

mod commands;
mod tests;
mod validation;

use clap::Parser;

pub use commands::{BuildArgs, Command, EjectArgs, ThemeArgs};
pub use validation::{parse_release, parse_theme_name};

/// Themepack - build distributable theme packages
#[derive(Parser, Debug)]
#[command(
    name = "themepack",
    version,
    about = "Build distributable theme packages",
    long_about = "Themepack builds a theme from src/<name>/ into dist/src/<name>/.\n\
                  It generates CSS module typings and declarations, copies style files\n\
                  and produces both a library bundle and a self-registering\n\
                  custom-element bundle."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}
