//! Pipeline progress reporting

use std::io::Write;

/// Receives coarse progress while the pipeline chews through a repository.
/// Implementations must be cheap; they are called once per chunk, not per
/// file.
pub trait ProgressListener: Sync {
    /// A new pipeline phase begins, covering `total` items.
    fn phase_started(&self, name: &str, total: usize);
    /// `processed` more items finished in the current phase.
    fn tick(&self, processed: usize);
    /// The current phase is done.
    fn phase_finished(&self);
}

/// Prints one line per phase and a dot per chunk to stderr, mirroring the
/// repository-scan feel of classic console tools.
pub struct ConsoleProgress;

impl ProgressListener for ConsoleProgress {
    fn phase_started(&self, name: &str, total: usize) {
        eprint!("{name} ({total}) ");
        let _ = std::io::stderr().flush();
    }

    fn tick(&self, _processed: usize) {
        eprint!(".");
        let _ = std::io::stderr().flush();
    }

    fn phase_finished(&self) {
        eprintln!();
    }
}

/// Discards all progress events. Useful for tests and machine-readable
/// output modes.
pub struct NullProgress;

impl ProgressListener for NullProgress {
    fn phase_started(&self, _name: &str, _total: usize) {}
    fn tick(&self, _processed: usize) {}
    fn phase_finished(&self) {}
}
