//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default tag inserted into generated file names
pub const DEFAULT_GUARD_FILE_NAME: &str = "guard";

/// Source extensions recognized by default, longest first
pub const DEFAULT_SOURCE_EXTENSIONS: [&str; 3] = ["d.ts", "ts", "tsx"];

/// Options that shape guard generation
///
/// Only `export_all` and `guard_file_name` are interpreted here; the rest is
/// carried through to the renderer untouched, as is any unrecognized key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessOptions {
    /// Generate guards for every guardable declaration, annotated or not
    pub export_all: bool,

    /// Module name guards are imported from instead of being generated
    pub import_guards: Option<String>,

    /// Do not re-export guards of imported types
    pub prevent_export_imported: bool,

    /// Condition the generated guards short-circuit on
    pub short_circuit_condition: Option<String>,

    /// Renderer debug output
    pub debug: bool,

    /// Tag inserted into generated file names (`user.ts` -> `user.guard.ts`)
    pub guard_file_name: String,

    /// Unrecognized options, passed through unexamined
    pub extra: BTreeMap<String, toml::Value>,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            export_all: false,
            import_guards: None,
            prevent_export_imported: false,
            short_circuit_condition: None,
            debug: false,
            guard_file_name: DEFAULT_GUARD_FILE_NAME.to_string(),
            extra: BTreeMap::new(),
        }
    }
}

/// Main configuration settings for Guardsmith
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Project root to discover sources in
    pub project_path: PathBuf,

    /// Files or glob patterns (relative to the project) to restrict processing to
    pub paths: Vec<String>,

    /// Patterns to exclude from discovery
    pub exclude_patterns: Vec<String>,

    /// Recognized source extensions
    pub source_extensions: Vec<String>,

    /// Generation options
    pub process: ProcessOptions,

    /// Output format (text, json, csv)
    pub output_format: OutputFormat,

    /// Output file path (if not specified, output to stdout)
    pub output_file: Option<PathBuf>,

    /// Delete stale generated files before planning
    pub clean: bool,

    /// Report deletions without touching the disk
    pub dry_run: bool,

    /// Whether to parse files in parallel
    pub parallel: bool,

    /// Whether to follow symbolic links during discovery
    pub follow_links: bool,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed progress and debug information
    pub verbose: bool,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to show progress bars
    pub show_progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_path: PathBuf::from("."),
            paths: Vec::new(),
            exclude_patterns: vec![
                "node_modules".to_string(),
                ".git".to_string(),
                "dist".to_string(),
                "build".to_string(),
            ],
            source_extensions: DEFAULT_SOURCE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            process: ProcessOptions::default(),
            output_format: OutputFormat::Text,
            output_file: None,
            clean: false,
            dry_run: false,
            parallel: true,
            follow_links: false,
            quiet: false,
            verbose: false,
            use_colors: true,
            show_progress: true,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output, one row per planned guard
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Partial settings for configuration merging
///
/// Keys are snake_case; the camelCase spellings used by existing guard
/// configurations are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialSettings {
    pub project_path: Option<PathBuf>,
    pub paths: Option<Vec<String>>,
    pub exclude_patterns: Option<Vec<String>>,
    pub source_extensions: Option<Vec<String>>,
    #[serde(alias = "exportAll")]
    pub export_all: Option<bool>,
    #[serde(alias = "importGuards")]
    pub import_guards: Option<String>,
    #[serde(alias = "preventExportImported")]
    pub prevent_export_imported: Option<bool>,
    #[serde(alias = "shortCircuitCondition")]
    pub short_circuit_condition: Option<String>,
    pub debug: Option<bool>,
    #[serde(alias = "guardFileName")]
    pub guard_file_name: Option<String>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub clean: Option<bool>,
    pub dry_run: Option<bool>,
    pub parallel: Option<bool>,
    pub follow_links: Option<bool>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
    pub show_progress: Option<bool>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, toml::Value>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.project_path.is_some() {
            self.project_path = other.project_path;
        }
        if other.paths.is_some() {
            self.paths = other.paths;
        }
        if other.exclude_patterns.is_some() {
            self.exclude_patterns = other.exclude_patterns;
        }
        if other.source_extensions.is_some() {
            self.source_extensions = other.source_extensions;
        }
        if other.export_all.is_some() {
            self.export_all = other.export_all;
        }
        if other.import_guards.is_some() {
            self.import_guards = other.import_guards;
        }
        if other.prevent_export_imported.is_some() {
            self.prevent_export_imported = other.prevent_export_imported;
        }
        if other.short_circuit_condition.is_some() {
            self.short_circuit_condition = other.short_circuit_condition;
        }
        if other.debug.is_some() {
            self.debug = other.debug;
        }
        if other.guard_file_name.is_some() {
            self.guard_file_name = other.guard_file_name;
        }
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.output_file.is_some() {
            self.output_file = other.output_file;
        }
        if other.clean.is_some() {
            self.clean = other.clean;
        }
        if other.dry_run.is_some() {
            self.dry_run = other.dry_run;
        }
        if other.parallel.is_some() {
            self.parallel = other.parallel;
        }
        if other.follow_links.is_some() {
            self.follow_links = other.follow_links;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.use_colors.is_some() {
            self.use_colors = other.use_colors;
        }
        if other.show_progress.is_some() {
            self.show_progress = other.show_progress;
        }
        self.extra.extend(other.extra);
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(project_path) = &self.project_path {
            settings.project_path = project_path.clone();
        }
        if let Some(paths) = &self.paths {
            settings.paths = paths.clone();
        }
        if let Some(exclude_patterns) = &self.exclude_patterns {
            settings.exclude_patterns = exclude_patterns.clone();
        }
        if let Some(source_extensions) = &self.source_extensions {
            settings.source_extensions = source_extensions.clone();
        }
        if let Some(export_all) = self.export_all {
            settings.process.export_all = export_all;
        }
        if let Some(import_guards) = &self.import_guards {
            settings.process.import_guards = Some(import_guards.clone());
        }
        if let Some(prevent_export_imported) = self.prevent_export_imported {
            settings.process.prevent_export_imported = prevent_export_imported;
        }
        if let Some(condition) = &self.short_circuit_condition {
            settings.process.short_circuit_condition = Some(condition.clone());
        }
        if let Some(debug) = self.debug {
            settings.process.debug = debug;
        }
        if let Some(guard_file_name) = &self.guard_file_name {
            settings.process.guard_file_name = guard_file_name.clone();
        }
        if let Some(output_format) = self.output_format {
            settings.output_format = output_format;
        }
        if let Some(output_file) = &self.output_file {
            settings.output_file = Some(output_file.clone());
        }
        if let Some(clean) = self.clean {
            settings.clean = clean;
        }
        if let Some(dry_run) = self.dry_run {
            settings.dry_run = dry_run;
        }
        if let Some(parallel) = self.parallel {
            settings.parallel = parallel;
        }
        if let Some(follow_links) = self.follow_links {
            settings.follow_links = follow_links;
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }
        if let Some(show_progress) = self.show_progress {
            settings.show_progress = show_progress;
        }
        settings.process.extra = self.extra.clone();

        settings
    }
}
