//! Output formatting functionality
//!
//! This module renders a [`GuardPlan`] as text, JSON or CSV.

use crate::error::{ErrorSeverity, GuardError, Result};
use crate::models::{GuardEntry, GuardFilePlan, GuardName, GuardPlan};
use ansi_term::Colour::{Blue, Cyan, Green, Red, Yellow};
use ansi_term::Style;

fn paint(use_colors: bool, style: Style, text: impl Into<String>) -> String {
    let text = text.into();
    if use_colors {
        style.paint(text).to_string()
    } else {
        text
    }
}

/// Short label for how a guard got its name
pub fn naming_label(name: &GuardName) -> &'static str {
    match name {
        GuardName::Custom(_) => "custom",
        GuardName::DefaultNaming => "default",
        GuardName::Derived(_) => "derived",
    }
}

/// Format one planned guard file as text
pub fn format_file_text(file: &GuardFilePlan, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} -> {}\n",
        paint(use_colors, Blue.bold(), file.source.display().to_string()),
        paint(use_colors, Style::new().dimmed(), file.output.display().to_string())
    ));

    for guard in &file.guards {
        output.push_str(&format_guard_text(guard, use_colors));
    }

    if verbose && !file.dependencies.is_empty() {
        output.push_str("  Imports:\n");
        for (module, aliases) in &file.dependencies {
            let names: Vec<String> = aliases
                .iter()
                .map(|(name, alias)| {
                    if name == alias {
                        name.clone()
                    } else {
                        format!("{} as {}", name, alias)
                    }
                })
                .collect();
            output.push_str(&format!("    {}: {}\n", module.display(), names.join(", ")));
        }
    }

    output.push('\n');
    output
}

fn format_guard_text(guard: &GuardEntry, use_colors: bool) -> String {
    let default_marker = if guard.default_export { " [default export]" } else { "" };
    format!(
        "  {} ({} {}, {} name){}\n",
        paint(use_colors, Green.normal(), guard.function_name.as_str()),
        guard.kind,
        guard.declaration,
        naming_label(&guard.name),
        default_marker
    )
}

/// Format a plan summary and its details as text
pub fn format_plan_text(plan: &GuardPlan, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();
    let summary = plan.summary();

    output.push_str(&format!("{}\n\n", paint(use_colors, Blue.bold(), "Guard Generation Plan")));
    output.push_str(&format!("Modules scanned: {}\n", summary.modules_scanned));
    output.push_str(&format!("Guard files: {}\n", summary.guard_files));
    output.push_str(&format!("Guards: {}\n", summary.guards));
    output.push_str(&format!("Imported dependencies: {}\n", summary.dependencies));
    if summary.deleted > 0 {
        output.push_str(&format!("Deleted artifacts: {}\n", summary.deleted));
    }
    if summary.skipped > 0 {
        output.push_str(&format!("Skipped sources: {}\n", summary.skipped));
    }

    if !plan.files.is_empty() {
        output.push('\n');
        for file in &plan.files {
            output.push_str(&format_file_text(file, use_colors, verbose));
        }
    }

    if !plan.failed.is_empty() {
        output.push_str(&format!(
            "{}\n",
            paint(use_colors, Red.bold(), format!("Failed modules: {}", plan.failed.len()))
        ));
        for failed in &plan.failed {
            output.push_str(&format!("  {}: {}\n", failed.path.display(), failed.reason));
        }
    }

    if !plan.deleted.is_empty() && verbose {
        output.push_str("\nDeleted:\n");
        for path in &plan.deleted {
            output.push_str(&format!("  {}\n", path.display()));
        }
    }

    if !plan.skipped.is_empty() && verbose {
        output.push_str("\nSkipped:\n");
        for skipped in &plan.skipped {
            output.push_str(&format!(
                "  {}: {}\n",
                paint(use_colors, Cyan.normal(), skipped.path.display().to_string()),
                skipped.reason
            ));
        }
    }

    if !plan.diagnostics.is_empty() {
        output.push_str(&format!(
            "\n{}\n",
            paint(use_colors, Yellow.bold(), format!("Diagnostics: {}", plan.diagnostics.len()))
        ));
        for diagnostic in &plan.diagnostics {
            let severity = match diagnostic.severity {
                ErrorSeverity::Warning => paint(use_colors, Yellow.normal(), "WARNING"),
                ErrorSeverity::Error => paint(use_colors, Red.normal(), "ERROR"),
                ErrorSeverity::Critical => paint(use_colors, Red.bold(), "CRITICAL"),
            };
            output.push_str(&format!("  [{}] {}\n", severity, diagnostic));
        }
    }

    output
}

/// One-line summary for quiet mode
pub fn format_plan_quiet(plan: &GuardPlan) -> String {
    let summary = plan.summary();
    let mut output = format!(
        "Guard files: {}, Guards: {}, Failed: {}\n",
        summary.guard_files, summary.guards, summary.failed
    );
    if summary.diagnostics > 0 {
        output.push_str(&format!("Diagnostics: {}\n", summary.diagnostics));
    }
    output
}

/// Format a plan as JSON
pub fn format_plan_json(plan: &GuardPlan, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(plan)
    } else {
        serde_json::to_string(plan)
    };
    json.map_err(|source| GuardError::JsonSerialize { source })
}

/// Format a plan as CSV, one row per planned guard
pub fn format_plan_csv(plan: &GuardPlan) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record([
        "Source",
        "Output",
        "Declaration",
        "Kind",
        "Function",
        "Naming",
        "Default Export",
        "File Dependencies",
    ])?;

    for file in &plan.files {
        let source = file.source.display().to_string();
        let output = file.output.display().to_string();
        let dependencies = file.dependency_count().to_string();
        for guard in &file.guards {
            writer.write_record([
                source.as_str(),
                output.as_str(),
                guard.declaration.as_str(),
                &guard.kind.to_string(),
                guard.function_name.as_str(),
                naming_label(&guard.name),
                &guard.default_export.to_string(),
                dependencies.as_str(),
            ])?;
        }
    }

    let summary = plan.summary();
    writer.write_record([
        "SUMMARY",
        "",
        &format!("{} modules", summary.modules_scanned),
        "",
        &format!("{} guards", summary.guards),
        "",
        "",
        &summary.dependencies.to_string(),
    ])?;

    let bytes = writer
        .into_inner()
        .map_err(|e| GuardError::Io { source: e.into_error() })?;
    String::from_utf8(bytes).map_err(|source| GuardError::CsvSerialize { source })
}
