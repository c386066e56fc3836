//! Non-fatal conditions reported during a generation run

use crate::error::ErrorSeverity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// What a diagnostic is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A `ts-auto-guard:` directive with a command other than `type-guard`
    UnsupportedDirective,
    /// Two different local aliases requested for the same export
    AliasConflict,
    /// A referenced declaration is not exported from its module
    NotExported,
    /// A file named like a generated artifact that lacks the generated marker
    StaleArtifact,
    /// A module aborted on a broken internal invariant
    InternalInvariant,
}

impl DiagnosticKind {
    pub fn severity(self) -> ErrorSeverity {
        match self {
            DiagnosticKind::StaleArtifact => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DiagnosticKind::UnsupportedDirective => "unsupported-directive",
            DiagnosticKind::AliasConflict => "alias-conflict",
            DiagnosticKind::NotExported => "not-exported",
            DiagnosticKind::StaleArtifact => "stale-artifact",
            DiagnosticKind::InternalInvariant => "internal-invariant",
        };
        write!(f, "{}", label)
    }
}

/// One reported condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: ErrorSeverity,
    pub message: String,
    /// Module the condition was found in, when there is one
    pub module: Option<PathBuf>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            message: message.into(),
            module: None,
        }
    }

    pub fn in_module(mut self, module: impl Into<PathBuf>) -> Self {
        self.module = Some(module.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.module {
            Some(module) => write!(f, "[{}] {}: {}", self.kind, module.display(), self.message),
            None => write!(f, "[{}] {}", self.kind, self.message),
        }
    }
}
