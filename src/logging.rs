//! Tracing subscriber setup for the command-line tool
//!
//! The filter comes from `GUARDSMITH_LOG`, then `RUST_LOG`; without either the
//! level follows the verbosity flags, and is raised again once the merged
//! settings are known. Events go to stderr so they never mix with a plan
//! written to stdout, and an active progress bar is cleared while they print.

use std::io::{self, Write};

use indicatif::MultiProgress;
use once_cell::sync::{Lazy, OnceCell};
use parking_lot::Mutex;
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry};

use crate::models::Settings;

/// Environment variable read before `RUST_LOG`
pub const LOG_ENV_VAR: &str = "GUARDSMITH_LOG";

static FILTER: OnceCell<reload::Handle<EnvFilter, Registry>> = OnceCell::new();
static ACTIVE_PROGRESS: Lazy<Mutex<Option<MultiProgress>>> = Lazy::new(|| Mutex::new(None));

/// Default level for the given verbosity flags
pub fn default_level(quiet: bool, verbose: bool, debug: bool) -> &'static str {
    if debug {
        "debug"
    } else if verbose {
        "info"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

/// Level for fully merged settings, so `debug = true` in a config file counts
pub fn settings_level(settings: &Settings) -> &'static str {
    default_level(settings.quiet, settings.verbose, settings.process.debug)
}

fn build_filter(fallback: &str) -> EnvFilter {
    match std::env::var(LOG_ENV_VAR).or_else(|_| std::env::var("RUST_LOG")) {
        Ok(directives) => EnvFilter::builder().parse_lossy(directives),
        Err(_) => EnvFilter::new(fallback),
    }
}

/// Install the global subscriber; later calls are no-ops
pub fn init_tracing(quiet: bool, verbose: bool, debug: bool) {
    let (filter, handle) = reload::Layer::new(build_filter(default_level(quiet, verbose, debug)));
    let format = tracing_subscriber::fmt::layer()
        .with_writer(ProgressAwareWriter::default)
        .with_target(false)
        .without_time();

    if tracing_subscriber::registry().with(filter).with(format).try_init().is_ok() {
        let _ = FILTER.set(handle);
    }
}

/// Swap in the level derived from the merged settings
pub fn apply_settings(settings: &Settings) {
    if let Some(handle) = FILTER.get() {
        if let Err(err) = handle.reload(build_filter(settings_level(settings))) {
            tracing::warn!("could not update log level: {}", err);
        }
    }
}

/// Route log output around `progress` until it is detached with `None`
pub fn attach_progress(progress: Option<MultiProgress>) {
    *ACTIVE_PROGRESS.lock() = progress;
}

/// Buffers one formatted event and writes it to stderr on drop
#[derive(Default)]
pub struct ProgressAwareWriter {
    buffer: Vec<u8>,
}

impl Write for ProgressAwareWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ProgressAwareWriter {
    fn drop(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let buffer = std::mem::take(&mut self.buffer);
        let emit = move || {
            let _ = io::stderr().write_all(&buffer);
        };
        let progress = ACTIVE_PROGRESS.lock().clone();
        match progress {
            Some(progress) => progress.suspend(emit),
            None => emit(),
        }
    }
}
