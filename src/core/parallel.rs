//! Parallel processing utilities

use parking_lot::Mutex;
use rayon::prelude::*;

/// Progress update information for parallel operations
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub current: usize,
    pub total: usize,
    pub message: String,
}

impl ProgressUpdate {
    pub fn new(current: usize, total: usize, message: impl Into<String>) -> Self {
        Self {
            current,
            total,
            message: message.into(),
        }
    }

    /// Calculate progress percentage
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.current as f64 / self.total as f64) * 100.0
        }
    }
}

/// Map `f` over `items`, in parallel when `parallel` is set, reporting each
/// completed item to `progress`
///
/// Results keep the order of `items` either way.
pub fn process_with_progress<T, R, F, P>(items: Vec<T>, parallel: bool, f: F, progress: P) -> Vec<R>
where
    T: Send,
    R: Send,
    F: Fn(T) -> R + Send + Sync,
    P: Fn(ProgressUpdate) + Send + Sync,
{
    let total = items.len();
    let counter = Mutex::new(0usize);
    let step = |item: T| {
        let result = f(item);
        let mut count = counter.lock();
        *count += 1;
        progress(ProgressUpdate::new(*count, total, format!("Parsed {}/{}", *count, total)));
        result
    };

    if parallel {
        items.into_par_iter().map(step).collect()
    } else {
        items.into_iter().map(step).collect()
    }
}
