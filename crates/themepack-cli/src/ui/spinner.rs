//! Spinner for the build, and the progress reporter that drives it.

use super::paint;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::time::Duration;
use themepack_build::{ProgressReporter, Stage};

/// Spinner for tasks without a known duration.
///
/// Draws nothing when stderr is not a terminal.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("valid template")
                .tick_strings(&["◐", "◓", "◑", "◒", "●"]),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    /// A spinner that never draws, for `--quiet`.
    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    pub fn set_message(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    /// Finish with a green check mark.
    pub fn finish(&self, message: &str) {
        self.pb.finish_with_message(format!(
            "{} {}",
            paint("✓", |s| s.green().to_string()),
            message
        ));
    }

    /// Finish with a red cross.
    pub fn fail(&self, message: &str) {
        self.pb
            .finish_with_message(format!("{} {}", paint("✗", |s| s.red().to_string()), message));
    }

    pub fn is_finished(&self) -> bool {
        self.pb.is_finished()
    }

    pub fn message(&self) -> String {
        self.pb.message().to_string()
    }
}

/// Shows a pipeline run as a single spinner labelled with the run's label.
pub struct SpinnerReporter {
    quiet: bool,
    spinner: Mutex<Option<Spinner>>,
}

impl SpinnerReporter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            spinner: Mutex::new(None),
        }
    }

    /// Message of the current spinner, if one was started.
    pub fn message(&self) -> Option<String> {
        self.spinner.lock().as_ref().map(Spinner::message)
    }
}

impl ProgressReporter for SpinnerReporter {
    fn started(&self, label: &str) {
        let spinner = if self.quiet {
            Spinner::hidden()
        } else {
            Spinner::new(label)
        };
        spinner.set_message(label);
        *self.spinner.lock() = Some(spinner);
    }

    fn stage(&self, label: &str, stage: &Stage) {
        if let Some(spinner) = self.spinner.lock().as_ref() {
            spinner.set_message(&format!("{} ({})", label, stage.name));
        }
    }

    fn succeeded(&self, label: &str) {
        if let Some(spinner) = self.spinner.lock().as_ref() {
            spinner.finish(label);
        }
    }

    fn failed(&self, _label: &str, message: &str) {
        if let Some(spinner) = self.spinner.lock().as_ref() {
            spinner.fail(message);
        }
    }
}
