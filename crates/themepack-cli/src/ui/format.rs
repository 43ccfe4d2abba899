//! Formatting utilities for sizes, durations and the build summary.

use super::paint;
use console::Term;
use owo_colors::OwoColorize;
use std::time::Duration;
use themepack_build::BundleStats;

/// Format a byte count with the largest fitting unit.
///
/// ```
/// use themepack_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// assert_eq!(format_size(1_048_576), "1.00 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit_idx = 0;
    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Format a duration as `ms`, seconds or `Xm Ys`.
///
/// ```
/// use std::time::Duration;
/// use themepack_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Print every emitted file with its size, then the total, to stderr.
pub fn print_build_summary(stats: &BundleStats, elapsed: Duration) {
    let width = (Term::stderr().size().1 as usize).min(80);
    let rule = "─".repeat(width);

    eprintln!("\n{}", paint("Build Summary", |s| s.bold().underline().to_string()));
    eprintln!("{}", rule);

    for line in summary_lines(stats) {
        eprintln!("  {} {}", paint("▸", |s| s.blue().to_string()), line);
    }

    eprintln!("{}", rule);
    eprintln!(
        "  {} {} in {}",
        paint("Total:", |s| s.bold().to_string()),
        paint(format_size(stats.total_size()), |s| s.green().to_string()),
        paint(format_duration(elapsed), |s| s.green().to_string())
    );
}

/// One `path size` line per emitted file, sizes aligned.
fn summary_lines(stats: &BundleStats) -> Vec<String> {
    let name_width = stats.files.iter().map(|f| f.path.len()).max().unwrap_or(0);
    stats
        .files
        .iter()
        .map(|file| {
            format!(
                "{:<width$} {}",
                file.path,
                paint(format_size(file.size), |s| s.dimmed().to_string()),
                width = name_width
            )
        })
        .collect()
}
