//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Guardsmith - plans runtime type guards for TypeScript declarations
#[derive(Parser, Debug)]
#[command(name = "guardsmith")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Plan runtime type guard files for annotated TypeScript declarations")]
#[command(long_about = "Guardsmith scans a TypeScript project for interfaces, type aliases and enums annotated \
with `@see ts-auto-guard:type-guard` (or every exported one with --export-all), decides the name of each \
guard, works out which types every generated guard file has to import, and where that file goes.")]
#[command(after_help = "EXAMPLES:

Basic Usage:
    # Plan guards for the project in the current directory
    guardsmith

    # Plan guards for another project
    guardsmith --project ./my-app

    # Only process some files (relative to the project)
    guardsmith src/models/*.ts src/api.ts

Generation Options:
    # Guard every exported interface, type alias and enum
    guardsmith --export-all

    # Write user.check.ts instead of user.guard.ts
    guardsmith --guard-file-name check

Cleaning:
    # Delete previously generated guard files first
    guardsmith --clean

    # Show what --clean would delete
    guardsmith --clean --dry-run

Output Options:
    # Plan as JSON, written to a file
    guardsmith --output json --output-file plan.json

Configuration:
    # Use a specific configuration file
    guardsmith --config ./guardsmith.toml

    # Create a default configuration file
    guardsmith --init
")]
pub struct Args {
    /// Files or glob patterns to restrict processing to
    #[arg(value_name = "PATHS", help = "Files or glob patterns, relative to the project, to restrict processing to")]
    pub paths: Vec<String>,

    /// Project root
    #[arg(short, long, value_name = "DIR", help = "Project root to discover TypeScript sources in (defaults to the current directory)")]
    pub project: Option<PathBuf>,

    /// Exclude paths matching these glob patterns
    #[arg(short, long, value_name = "PATTERN", help = "Glob patterns for paths to skip (can be given multiple times)")]
    pub exclude: Vec<String>,

    /// Generate guards for all exported guardable declarations
    #[arg(long, help = "Plan guards for every exported interface, type alias and enum, annotated or not")]
    pub export_all: bool,

    /// Tag inserted into generated file names
    #[arg(long, value_name = "TAG", help = "Tag inserted into generated file names (default: guard)")]
    pub guard_file_name: Option<String>,

    /// Passed through to the guard renderer
    #[arg(long, value_name = "NAME", help = "Alias under which generated guards are imported (passed through)")]
    pub import_guards: Option<String>,

    /// Passed through to the guard renderer
    #[arg(long, help = "Do not re-export guards of imported types (passed through)")]
    pub prevent_export_imported: bool,

    /// Passed through to the guard renderer
    #[arg(long, value_name = "CONDITION", help = "Condition generated guards short-circuit on (passed through)")]
    pub short_circuit: Option<String>,

    /// Renderer debug output and debug logging
    #[arg(long, help = "Enable renderer debug output and debug-level logging")]
    pub debug: bool,

    /// Output format (text, json, csv)
    #[arg(short, long, value_enum, value_name = "FORMAT", help = "Output format for the plan: text, json or csv (default: text)")]
    pub output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long, value_name = "FILE", help = "File to write the plan to (uses stdout if not specified)")]
    pub output_file: Option<PathBuf>,

    /// Delete stale generated files before planning
    #[arg(long, help = "Delete previously generated guard files before planning")]
    pub clean: bool,

    /// Report deletions without touching the disk
    #[arg(long, help = "With --clean, report what would be deleted without removing anything")]
    pub dry_run: bool,

    /// Suppress non-essential output
    #[arg(short, long, help = "Only print a one-line summary")]
    pub quiet: bool,

    /// Show detailed output
    #[arg(short, long, help = "Show imports, deletions and skipped files, and info-level logging")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, help = "Disable colored output")]
    pub no_colors: bool,

    /// Disable progress bars
    #[arg(long, help = "Disable progress bars (useful for CI environments)")]
    pub no_progress: bool,

    /// Disable parallel parsing
    #[arg(long, help = "Parse files on a single thread")]
    pub no_parallel: bool,

    /// Follow symbolic links during discovery
    #[arg(long, help = "Follow symbolic links during discovery")]
    pub follow_links: bool,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to a configuration file (defaults to .guardsmith.toml)")]
    pub config: Option<PathBuf>,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default configuration file (.guardsmith.toml) in the current directory")]
    pub init: bool,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output, one row per guard
    Csv,
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
