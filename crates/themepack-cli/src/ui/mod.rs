//! Terminal output: spinner, status messages and the build summary.
//!
//! Everything here writes to stderr. Color is decided once by
//! [`init_colors`] from `--no-color`, `NO_COLOR`/`FORCE_COLOR` and whether
//! stderr is a terminal.

mod format;
mod messages;
mod spinner;

pub use format::{format_duration, format_size, print_build_summary};
pub use messages::{info, success};
pub use spinner::{Spinner, SpinnerReporter};

use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};

static COLORS_ENABLED: AtomicBool = AtomicBool::new(true);

/// Whether the environment allows colored output on stderr.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::user_attended_stderr()
}

/// Decide color support for the rest of the process.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    COLORS_ENABLED.store(enabled, Ordering::Relaxed);
    console::set_colors_enabled(enabled);
    console::set_colors_enabled_stderr(enabled);
}

pub fn colors_enabled() -> bool {
    COLORS_ENABLED.load(Ordering::Relaxed)
}

/// Apply `style` only when colors are enabled.
pub(crate) fn paint<T: Display>(text: T, style: impl FnOnce(&T) -> String) -> String {
    if colors_enabled() {
        style(&text)
    } else {
        text.to_string()
    }
}
