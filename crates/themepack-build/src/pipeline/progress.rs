use super::Stage;
use tracing::{error, info};

/// Receives the status of a pipeline run, keyed by its label.
pub trait ProgressReporter: Send + Sync {
    fn started(&self, label: &str);

    /// A stage is about to run.
    fn stage(&self, _label: &str, _stage: &Stage) {}

    fn succeeded(&self, label: &str);

    /// `message` is the failing stage's failure message, verbatim.
    fn failed(&self, label: &str, message: &str);
}

/// Reports progress as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn started(&self, label: &str) {
        info!("{}", label);
    }

    fn stage(&self, label: &str, stage: &Stage) {
        info!(stage = stage.name, "{}", label);
    }

    fn succeeded(&self, label: &str) {
        info!("{}: done", label);
    }

    fn failed(&self, label: &str, message: &str) {
        error!("{}: {}", label, message);
    }
}
