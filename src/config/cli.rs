//! Command-line argument configuration source

use std::path::PathBuf;

use super::ConfigSource;
use crate::cli::args::{Args, OutputFormat as CliOutputFormat};
use crate::error::Result;
use crate::models::config::{OutputFormat, PartialSettings};

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
    priority: u8,
}

/// Command-line arguments relevant to configuration
///
/// Flags are `true` only when given; an absent flag leaves lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub project: Option<PathBuf>,
    pub paths: Vec<String>,
    pub exclude: Option<Vec<String>>,
    pub export_all: bool,
    pub guard_file_name: Option<String>,
    pub import_guards: Option<String>,
    pub prevent_export_imported: bool,
    pub short_circuit: Option<String>,
    pub debug: bool,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub clean: bool,
    pub dry_run: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub no_colors: bool,
    pub no_progress: bool,
    pub no_parallel: bool,
    pub follow_links: bool,
    pub config: Option<PathBuf>,
}

impl From<&Args> for CliArgs {
    fn from(args: &Args) -> Self {
        Self {
            project: args.project.clone(),
            paths: args.paths.clone(),
            exclude: if args.exclude.is_empty() {
                None
            } else {
                Some(args.exclude.clone())
            },
            export_all: args.export_all,
            guard_file_name: args.guard_file_name.clone(),
            import_guards: args.import_guards.clone(),
            prevent_export_imported: args.prevent_export_imported,
            short_circuit: args.short_circuit.clone(),
            debug: args.debug,
            output_format: args.output.map(|format| match format {
                CliOutputFormat::Text => OutputFormat::Text,
                CliOutputFormat::Json => OutputFormat::Json,
                CliOutputFormat::Csv => OutputFormat::Csv,
            }),
            output_file: args.output_file.clone(),
            clean: args.clean,
            dry_run: args.dry_run,
            quiet: args.quiet,
            verbose: args.verbose,
            no_colors: args.no_colors,
            no_progress: args.no_progress,
            no_parallel: args.no_parallel,
            follow_links: args.follow_links,
            config: args.config.clone(),
        }
    }
}

impl CliConfig {
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command-line arguments".to_string(),
            priority: 30,
        }
    }

    pub fn from_args(args: &Args) -> Self {
        Self::new(CliArgs::from(args))
    }

    /// Get the config file path if specified
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }
}

fn flag(set: bool, value: bool) -> Option<bool> {
    set.then_some(value)
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let args = &self.args;
        Ok(PartialSettings {
            project_path: args.project.clone(),
            paths: (!args.paths.is_empty()).then(|| args.paths.clone()),
            exclude_patterns: args.exclude.clone(),
            export_all: flag(args.export_all, true),
            guard_file_name: args.guard_file_name.clone(),
            import_guards: args.import_guards.clone(),
            prevent_export_imported: flag(args.prevent_export_imported, true),
            short_circuit_condition: args.short_circuit.clone(),
            debug: flag(args.debug, true),
            output_format: args.output_format,
            output_file: args.output_file.clone(),
            clean: flag(args.clean, true),
            dry_run: flag(args.dry_run, true),
            parallel: flag(args.no_parallel, false),
            follow_links: flag(args.follow_links, true),
            quiet: flag(args.quiet, true),
            verbose: flag(args.verbose, true),
            use_colors: flag(args.no_colors, false),
            show_progress: flag(args.no_progress, false),
            ..Default::default()
        })
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
