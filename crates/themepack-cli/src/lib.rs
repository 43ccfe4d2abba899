//! # themepack-cli
//!
//! Command-line front end for [`themepack_build`].
//!
//! - `themepack build --name <theme>` runs the build pipeline for
//!   `src/<theme>/` and writes `dist/src/<theme>/`
//! - `themepack eject --name <theme>` writes the resolved bundle
//!   configuration and installer shim so the bundle step can be driven by
//!   hand
//!
//! Options come from, in increasing priority: built-in defaults,
//! `themepack.config.json`, `THEMEPACK_*` environment variables and
//! command-line flags.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use config::ThemepackConfig;
pub use error::{CliError, ConfigError, Result};
