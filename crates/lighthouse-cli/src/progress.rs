//! Console progress for long runs.

use colored::*;
use lighthouse_domain::ProgressReporter;

/// Prints each progress message to stderr.
///
/// Stderr keeps stdout clean for `--stdout` and JSON output.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleProgress {
    color_enabled: bool,
}

impl ConsoleProgress {
    /// Create a new console reporter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// The line printed for one notification.
    pub fn render(&self, completed: usize, total: usize, message: &str) -> String {
        let counter = format!("[{}/{}]", completed, total);
        if self.color_enabled {
            format!("{} {}", counter.cyan(), message)
        } else {
            format!("{} {}", counter, message)
        }
    }
}

impl ProgressReporter for ConsoleProgress {
    fn report(&self, completed: usize, total: usize, message: &str) {
        eprintln!("{}", self.render(completed, total, message));
    }
}
