//! Per guard file import bookkeeping

use super::diagnostics::Diagnostics;
use crate::models::plan::{AliasMap, DependencyMap};
use crate::models::{Diagnostic, DiagnosticKind};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Key under which a module's default export is recorded
pub const DEFAULT_EXPORT_KEY: &str = "default";

/// Records which exports each generated module must import, and as what
///
/// Once an export has an alias it keeps it; a later request for a different
/// alias is reported and dropped.
#[derive(Debug, Default, Clone)]
pub struct DependencyTracker {
    map: DependencyMap,
}

impl DependencyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `exported_name` from `target` under its own name
    pub fn add_dependency(
        &mut self,
        target: &Path,
        exported_name: &str,
        is_default: bool,
        diagnostics: &mut Diagnostics,
    ) {
        let key = if is_default { DEFAULT_EXPORT_KEY } else { exported_name };
        self.add_aliased(target, key, exported_name, diagnostics);
    }

    /// Require export `key` from `target` under the local name `alias`
    pub fn add_aliased(&mut self, target: &Path, key: &str, alias: &str, diagnostics: &mut Diagnostics) {
        let aliases = self.map.entry(target.to_path_buf()).or_default();
        match aliases.get(key) {
            None => {
                debug!(module = %target.display(), key, alias, "recorded dependency");
                aliases.insert(key.to_string(), alias.to_string());
            }
            Some(existing) if existing == alias => {}
            Some(existing) => {
                let message = format!(
                    "Conflicting aliases for \"{}\" from {}: \"{}\" requested but \"{}\" is already in use",
                    key,
                    target.display(),
                    alias,
                    existing
                );
                diagnostics.report(Diagnostic::new(DiagnosticKind::AliasConflict, message).in_module(target));
            }
        }
    }

    pub fn get(&self, target: &Path) -> Option<&AliasMap> {
        self.map.get(target)
    }

    pub fn targets(&self) -> impl Iterator<Item = &PathBuf> {
        self.map.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn into_map(self) -> DependencyMap {
        self.map
    }
}
