//! Progress reporters

use lighthouse_domain::ProgressReporter;
use tracing::info;

/// Reports progress as `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressReporter for TracingProgress {
    fn report(&self, completed: usize, total: usize, message: &str) {
        info!(completed, total, "{}", message);
    }
}

/// Prefixes every message with a phase label before passing it on
pub(crate) struct PhaseProgress<'a> {
    inner: &'a dyn ProgressReporter,
    label: &'static str,
}

impl<'a> PhaseProgress<'a> {
    pub(crate) fn new(inner: &'a dyn ProgressReporter, label: &'static str) -> Self {
        Self { inner, label }
    }
}

impl ProgressReporter for PhaseProgress<'_> {
    fn report(&self, completed: usize, total: usize, message: &str) {
        self.inner
            .report(completed, total, &format!("{}: {}", self.label, message));
    }
}
