//! The serializable outcome of a generation run

use super::config::ProcessOptions;
use super::declaration::GuardableKind;
use super::diagnostic::Diagnostic;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Exported name -> local alias, in first-insertion order
pub type AliasMap = IndexMap<String, String>;

/// Target module -> aliases required from it, in first-insertion order
pub type DependencyMap = IndexMap<PathBuf, AliasMap>;

/// The name a guard is generated under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "naming", content = "name", rename_all = "snake_case")]
pub enum GuardName {
    /// Named explicitly by the directive (`@see {isAdmin} ts-auto-guard:type-guard`)
    Custom(String),
    /// Directive without a name; the function is named after the declaration
    DefaultNaming,
    /// No directive, generated because every declaration is exported
    Derived(String),
}

impl GuardName {
    /// The predicate's function name
    pub fn function_name(&self, declaration_name: &str) -> String {
        match self {
            GuardName::Custom(name) | GuardName::Derived(name) => name.clone(),
            GuardName::DefaultNaming => format!("is{}", declaration_name),
        }
    }
}

/// One guard to generate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardEntry {
    pub declaration: String,
    pub kind: GuardableKind,
    pub name: GuardName,
    pub function_name: String,
    pub default_export: bool,
}

/// Everything the renderer needs to write one guard file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardFilePlan {
    pub source: PathBuf,
    pub output: PathBuf,
    pub guards: Vec<GuardEntry>,
    pub dependencies: DependencyMap,
    /// Local name -> module specifier for every named import of the source
    pub named_imports: IndexMap<String, String>,
}

impl GuardFilePlan {
    pub fn dependency_count(&self) -> usize {
        self.dependencies.values().map(|aliases| aliases.len()).sum()
    }
}

/// A module whose generation aborted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedModule {
    pub path: PathBuf,
    pub reason: String,
}

/// A source file that never made it into the project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSource {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of one generation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuardPlan {
    pub options: ProcessOptions,
    pub files: Vec<GuardFilePlan>,
    pub failed: Vec<FailedModule>,
    /// Generated artifacts removed before planning
    pub deleted: Vec<PathBuf>,
    pub skipped: Vec<SkippedSource>,
    pub diagnostics: Vec<Diagnostic>,
    /// Number of modules the pass visited
    pub modules_scanned: usize,
}

impl GuardPlan {
    pub fn new(options: ProcessOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            modules_scanned: self.modules_scanned,
            guard_files: self.files.len(),
            guards: self.files.iter().map(|file| file.guards.len()).sum(),
            dependencies: self.files.iter().map(GuardFilePlan::dependency_count).sum(),
            failed: self.failed.len(),
            deleted: self.deleted.len(),
            skipped: self.skipped.len(),
            diagnostics: self.diagnostics.len(),
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Counts over a plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub modules_scanned: usize,
    pub guard_files: usize,
    pub guards: usize,
    pub dependencies: usize,
    pub failed: usize,
    pub deleted: usize,
    pub skipped: usize,
    pub diagnostics: usize,
}
