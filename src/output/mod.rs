//! Output formatting and writing functionality

mod formatters;
mod progress;
mod writers;

pub use self::formatters::naming_label;
pub use self::progress::{create_progress_callback, ProgressReporter};
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

use crate::error::Result;
use crate::models::{GuardPlan, OutputFormat};

/// Trait for different output formatters
pub trait Formatter {
    /// Format a guard plan into a string
    fn format(&self, plan: &GuardPlan) -> Result<String>;
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    pub use_colors: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl TextFormatter {
    pub fn new(use_colors: bool, verbose: bool, quiet: bool) -> Self {
        Self {
            use_colors,
            verbose,
            quiet,
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, plan: &GuardPlan) -> Result<String> {
        if self.quiet {
            return Ok(formatters::format_plan_quiet(plan));
        }
        Ok(formatters::format_plan_text(plan, self.use_colors, self.verbose))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, plan: &GuardPlan) -> Result<String> {
        let mut json = formatters::format_plan_json(plan, self.pretty)?;
        json.push('\n');
        Ok(json)
    }
}

/// CSV formatter, one row per planned guard
#[derive(Default)]
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for CsvFormatter {
    fn format(&self, plan: &GuardPlan) -> Result<String> {
        formatters::format_plan_csv(plan)
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(format: OutputFormat, use_colors: bool, verbose: bool, quiet: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_colors, verbose, quiet)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Csv => Box::new(CsvFormatter::new()),
    }
}
