/// Advisory progress/diagnostic sink for long-running scans.
///
/// Ticks are not a checkpoint: a kernel that finishes without calling
/// `tick` the expected number of times has not failed.
pub trait Reporter: Send + Sync {
	fn tick(&self, _done: usize, _total: usize) {}
	fn diagnostic(&self, message: &str) {
		log::debug!("{message}");
	}
}

/// A `Reporter` that discards everything; the default when no caller
/// cares about progress output.
#[derive(Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// A `Reporter` that forwards to the `log` crate at debug level.
#[derive(Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
	fn tick(&self, done: usize, total: usize) {
		log::debug!("progress: {done}/{total}");
	}
}
