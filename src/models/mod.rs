//! Data models and structures for Guardsmith

pub mod config;
pub mod declaration;
pub mod diagnostic;
pub mod plan;
pub mod project;
pub mod types;

pub use config::{OutputFormat, PartialSettings, ProcessOptions, Settings};
pub use declaration::{GuardableKind, NodeKind, SyntaxNode};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use plan::{GuardEntry, GuardFilePlan, GuardName, GuardPlan, PlanSummary};
pub use project::{ImportDeclaration, NamedImport, NodeRef, Project, SourceModule};
pub use types::{ModuleId, NodeId, Primitive, Property, Symbol, TypeRef, TypeShape};
