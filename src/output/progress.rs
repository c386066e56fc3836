//! Progress reporting functionality
//!
//! Progress bars draw to stderr so they never mix with the plan on stdout.

use crate::core::parallel::ProgressUpdate;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use parking_lot::Mutex;
use std::sync::Arc;

/// Progress reporter for long-running operations
pub struct ProgressReporter {
    quiet: bool,
    verbose: bool,
    multi_progress: Arc<MultiProgress>,
    main_progress_bar: Option<ProgressBar>,
    current_operation: Mutex<String>,
}

impl ProgressReporter {
    /// Create a new progress reporter; `enabled = false` behaves like quiet mode
    pub fn new(enabled: bool, quiet: bool, verbose: bool) -> Self {
        let quiet = quiet || !enabled;
        let multi_progress = Arc::new(MultiProgress::with_draw_target(ProgressDrawTarget::stderr()));

        let main_progress_bar = if quiet {
            None
        } else {
            let bar = multi_progress.add(ProgressBar::new(0));
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            {
                bar.set_style(style.progress_chars("#>-"));
            }
            Some(bar)
        };

        Self {
            quiet,
            verbose,
            multi_progress,
            main_progress_bar,
            current_operation: Mutex::new(String::new()),
        }
    }

    /// Start a new progress operation
    pub fn start(&self, total: usize, operation: &str) {
        *self.current_operation.lock() = operation.to_string();
        if self.quiet {
            return;
        }

        if let Some(bar) = &self.main_progress_bar {
            bar.reset();
            bar.set_length(total as u64);
            bar.set_position(0);
            bar.set_message(operation.to_string());
        }

        if self.verbose {
            self.suspend(|| eprintln!("Starting: {}", operation));
        }
    }

    /// Update progress
    pub fn update(&self, current: usize, total: usize, message: &str) {
        if self.quiet {
            return;
        }

        if let Some(bar) = &self.main_progress_bar {
            bar.set_length(total as u64);
            bar.set_position(current as u64);
            if *self.current_operation.lock() != message {
                bar.set_message(message.to_string());
            }
        }
    }

    /// Update progress from a ProgressUpdate
    pub fn update_from(&self, progress: ProgressUpdate) {
        self.update(progress.current, progress.total, &progress.message);
    }

    /// Finish the progress operation
    pub fn finish(&self, message: &str) {
        if self.quiet {
            return;
        }

        if let Some(bar) = &self.main_progress_bar {
            bar.finish_and_clear();
        }

        if self.verbose {
            self.suspend(|| eprintln!("Finished: {}", message));
        }
    }

    /// Handle for clearing the bars while other output prints; `None` when nothing draws
    pub fn multi_progress(&self) -> Option<MultiProgress> {
        if self.quiet {
            None
        } else {
            Some(self.multi_progress.as_ref().clone())
        }
    }

    fn suspend<F: FnOnce()>(&self, f: F) {
        self.multi_progress.suspend(f)
    }
}

/// Create a progress callback function that updates a ProgressReporter
pub fn create_progress_callback(reporter: Arc<ProgressReporter>) -> impl Fn(ProgressUpdate) + Send + Sync {
    move |progress: ProgressUpdate| {
        reporter.update_from(progress);
    }
}
