//! Diagnostics sink for non-fatal conditions

use crate::error::ErrorSeverity;
use crate::models::{Diagnostic, DiagnosticKind};
use tracing::{error, warn};

/// Collects diagnostics for one run
///
/// Every report is also emitted as a tracing event so diagnostics reach
/// stderr even when the plan itself goes to a file.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            ErrorSeverity::Warning => warn!(kind = %diagnostic.kind, "{}", diagnostic),
            _ => error!(kind = %diagnostic.kind, "{}", diagnostic),
        }
        self.entries.push(diagnostic);
    }

    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_and_count() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(Diagnostic::new(DiagnosticKind::AliasConflict, "a"));
        diagnostics.report(Diagnostic::new(DiagnosticKind::StaleArtifact, "b").in_module("src/x.guard.ts"));
        diagnostics.report(Diagnostic::new(DiagnosticKind::AliasConflict, "c"));

        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics.count_of(DiagnosticKind::AliasConflict), 2);
        assert_eq!(diagnostics.count_of(DiagnosticKind::NotExported), 0);

        let stale = diagnostics
            .iter()
            .find(|d| d.kind == DiagnosticKind::StaleArtifact)
            .map(|d| d.severity);
        assert_eq!(stale, Some(ErrorSeverity::Warning));
    }
}
