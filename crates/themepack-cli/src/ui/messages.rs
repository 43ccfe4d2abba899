//! Status message functions for terminal output.

use super::paint;
use owo_colors::OwoColorize;

/// Print a success message to stderr.
///
/// ```no_run
/// use themepack_cli::ui::success;
///
/// success("Built my-theme");
/// ```
pub fn success(message: &str) {
    eprintln!("{} {}", paint("✓", |s| s.green().bold().to_string()), message);
}

pub fn info(message: &str) {
    eprintln!("{} {}", paint("ℹ", |s| s.blue().bold().to_string()), message);
}
