//! Logging setup for the themepack CLI.
//!
//! Events from this crate and from `themepack-build` go through a single
//! `tracing` subscriber that writes compact lines to stderr, leaving stdout
//! free for command output.
//!
//! # Example
//!
//! ```rust,no_run
//! use themepack_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//! info!("Starting build");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_DIRECTIVES: &str = "themepack=debug,themepack_cli=debug,themepack_build=debug";
const QUIET_DIRECTIVES: &str = "themepack=error,themepack_cli=error,themepack_build=error";
const DEFAULT_DIRECTIVES: &str = "themepack=info,themepack_cli=info,themepack_build=info";

/// Initialize the global tracing subscriber.
///
/// The filter is chosen in this order:
/// 1. `--verbose`: debug for themepack crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`, when set and valid
/// 4. info for themepack crates
///
/// Call once, before any logging occurs.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(select_filter(verbose, quiet), no_color);
}

/// Initialize the global subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn select_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_DIRECTIVES)
    } else if quiet {
        EnvFilter::new(QUIET_DIRECTIVES)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
    }
}

/// Whether log lines on stderr should carry ANSI colors.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` enables them, otherwise the
/// terminal decides.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}

#[cfg(test)]
mod tests {
    use super::*;

    // The subscriber is global, so these only check that filters build.

    #[test]
    fn test_directive_strings_parse() {
        for directives in [VERBOSE_DIRECTIVES, QUIET_DIRECTIVES, DEFAULT_DIRECTIVES] {
            assert!(EnvFilter::try_new(directives).is_ok(), "{}", directives);
        }
    }

    #[test]
    fn test_verbose_wins_over_quiet() {
        let filter = select_filter(true, true);
        assert!(filter.to_string().contains("themepack_build=debug"));
    }

    #[test]
    fn test_quiet_filter() {
        let filter = select_filter(false, true);
        assert!(filter.to_string().contains("themepack=error"));
    }
}
