//! Resolve a type back to the exported declaration that defines it

use super::dependencies::DependencyTracker;
use super::diagnostics::Diagnostics;
use crate::models::{Diagnostic, DiagnosticKind, ModuleId, NodeRef, Project, TypeRef};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What the resolver needs to know about a syntax node
pub trait ExportableNode: Sized {
    /// Enclosing nodes, innermost first
    fn ancestors(&self) -> Vec<Self>;
    /// Whether an `export` modifier can apply to this node
    fn is_exportable(&self) -> bool;
    fn is_exported(&self) -> bool;
    fn is_default_export(&self) -> bool;
    fn name(&self) -> Option<&str>;
    fn module_path(&self) -> &Path;
}

impl<'a> ExportableNode for NodeRef<'a> {
    fn ancestors(&self) -> Vec<Self> {
        self.ancestor_chain()
    }

    fn is_exportable(&self) -> bool {
        self.node().kind.is_exportable()
    }

    fn is_exported(&self) -> bool {
        self.node().exported
    }

    fn is_default_export(&self) -> bool {
        self.node().default_export
    }

    fn name(&self) -> Option<&str> {
        self.node().name()
    }

    fn module_path(&self) -> &Path {
        &self.module().path
    }
}

/// First exported node among the declarations and their ancestors
///
/// Each declaration is visited before its own ancestors, and declarations
/// are visited in order.
pub fn find_exportable_node<N, I>(declarations: I) -> Option<N>
where
    N: ExportableNode,
    I: IntoIterator<Item = N>,
{
    declarations
        .into_iter()
        .flat_map(|declaration| {
            let ancestors = declaration.ancestors();
            std::iter::once(declaration).chain(ancestors)
        })
        .filter(|node| node.is_exportable())
        .find(|node| node.is_exported())
}

/// An exported declaration: where it lives and how it is exported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedRef {
    pub module: ModuleId,
    pub module_path: PathBuf,
    pub name: String,
    pub is_default: bool,
}

/// Find the exported declaration defining `ty`
pub fn resolve_exported(project: &Project, ty: &TypeRef) -> Option<ExportedRef> {
    let symbol = ty.symbol.as_ref()?;
    let node = find_exportable_node(project.symbol_nodes(symbol))?;
    Some(ExportedRef {
        module: node.id().module,
        module_path: node.module_path().to_path_buf(),
        name: node.name().unwrap_or(&symbol.name).to_string(),
        is_default: node.is_default_export(),
    })
}

/// Record the import needed to refer to `ty` from generated code
///
/// Types that resolve to no exported declaration are skipped.
pub fn type_to_dependency(
    project: &Project,
    ty: &TypeRef,
    tracker: &mut DependencyTracker,
    diagnostics: &mut Diagnostics,
) {
    let Some(symbol) = ty.symbol.as_ref() else {
        return;
    };
    let Some(node) = find_exportable_node(project.symbol_nodes(symbol)) else {
        debug!(symbol = %symbol.name, "no exported declaration, skipping");
        return;
    };

    let name = node.name().unwrap_or(&symbol.name);
    let module_path = node.module_path();
    if !node.is_exported() {
        diagnostics.report(
            Diagnostic::new(
                DiagnosticKind::NotExported,
                format!("{} is not exported from {}", name, module_path.display()),
            )
            .in_module(module_path),
        );
    }
    tracker.add_dependency(module_path, name, node.is_default_export(), diagnostics);
}

/// `ReadonlyArray<T>` or `Array<T>`; only the element type matters for guards
pub fn is_readonly_array_type(ty: &TypeRef) -> bool {
    let named = ty
        .symbol
        .as_ref()
        .map(|symbol| symbol.name.as_str())
        .or_else(|| ty.reference_name());
    matches!(named, Some("ReadonlyArray") | Some("Array")) && ty.type_arguments.len() == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NodeId, SourceModule, Symbol, SyntaxNode};
    use crate::models::declaration::NodeKind;

    fn project_with(nodes: Vec<SyntaxNode>) -> (Project, ModuleId) {
        let mut module = SourceModule::new("src/models.ts", "");
        for node in nodes {
            module.add_node(node);
        }
        let mut project = Project::new();
        let id = project.add_module(module);
        (project, id)
    }

    #[test]
    fn test_resolves_exported_interface() {
        let (project, id) = project_with(vec![SyntaxNode::interface("User").exported()]);
        let ty = TypeRef::reference("User").with_symbol(Symbol::new("User", vec![NodeId::new(id, 0)]));

        let resolved = resolve_exported(&project, &ty);
        assert_eq!(
            resolved,
            Some(ExportedRef {
                module: id,
                module_path: PathBuf::from("src/models.ts"),
                name: "User".into(),
                is_default: false,
            })
        );
    }

    #[test]
    fn test_unexported_declaration_is_unresolved() {
        let (project, id) = project_with(vec![SyntaxNode::interface("Hidden")]);
        let ty = TypeRef::reference("Hidden").with_symbol(Symbol::new("Hidden", vec![NodeId::new(id, 0)]));
        assert_eq!(resolve_exported(&project, &ty), None);

        let mut tracker = DependencyTracker::new();
        let mut diagnostics = Diagnostics::new();
        type_to_dependency(&project, &ty, &mut tracker, &mut diagnostics);
        assert!(tracker.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_variable_resolves_through_statement() {
        let (project, id) = project_with(vec![
            SyntaxNode::new(NodeKind::VariableStatement, None).exported(),
            SyntaxNode::named(NodeKind::Variable, "config").with_parent(0),
        ]);
        let ty = TypeRef::unknown().with_symbol(Symbol::new("config", vec![NodeId::new(id, 1)]));

        let resolved = resolve_exported(&project, &ty);
        assert_eq!(resolved.map(|r| r.name), Some("config".to_string()));
    }

    #[test]
    fn test_nested_declaration_resolves_to_exported_namespace() {
        let (project, id) = project_with(vec![
            SyntaxNode::namespace("Api").exported(),
            SyntaxNode::interface("Request").with_parent(0),
        ]);
        let ty = TypeRef::reference("Api.Request").with_symbol(Symbol::new("Request", vec![NodeId::new(id, 1)]));

        assert_eq!(resolve_exported(&project, &ty).map(|r| r.name), Some("Api".to_string()));
    }

    #[test]
    fn test_default_export_recorded_under_default() {
        let (project, id) = project_with(vec![SyntaxNode::interface("Team").default_export()]);
        let ty = TypeRef::reference("Team").with_symbol(Symbol::new("Team", vec![NodeId::new(id, 0)]));

        let mut tracker = DependencyTracker::new();
        let mut diagnostics = Diagnostics::new();
        type_to_dependency(&project, &ty, &mut tracker, &mut diagnostics);

        let aliases = tracker.get(Path::new("src/models.ts")).cloned().unwrap_or_default();
        assert_eq!(aliases.get("default").map(String::as_str), Some("Team"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_global_symbol_is_skipped() {
        let (project, _) = project_with(Vec::new());
        let ty = TypeRef::reference("Date").with_symbol(Symbol::global("Date"));
        assert_eq!(resolve_exported(&project, &ty), None);
        assert_eq!(resolve_exported(&project, &TypeRef::reference("Loose")), None);
    }

    #[test]
    fn test_is_readonly_array_type() {
        let element = TypeRef::reference("User");
        let readonly = TypeRef::reference("ReadonlyArray")
            .with_symbol(Symbol::global("ReadonlyArray"))
            .with_type_arguments(vec![element.clone()]);
        assert!(is_readonly_array_type(&readonly));
        assert!(is_readonly_array_type(
            &TypeRef::reference("Array").with_type_arguments(vec![element.clone()])
        ));
        assert!(!is_readonly_array_type(&TypeRef::reference("ReadonlyArray")));
        assert!(!is_readonly_array_type(
            &TypeRef::reference("Map").with_type_arguments(vec![element.clone(), element])
        ));
    }

    struct Fake {
        exportable: bool,
        exported: bool,
        label: &'static str,
        parents: Vec<Fake>,
    }

    impl ExportableNode for Fake {
        fn ancestors(&self) -> Vec<Self> {
            self.parents
                .iter()
                .map(|p| Fake {
                    exportable: p.exportable,
                    exported: p.exported,
                    label: p.label,
                    parents: Vec::new(),
                })
                .collect()
        }
        fn is_exportable(&self) -> bool {
            self.exportable
        }
        fn is_exported(&self) -> bool {
            self.exported
        }
        fn is_default_export(&self) -> bool {
            false
        }
        fn name(&self) -> Option<&str> {
            Some(self.label)
        }
        fn module_path(&self) -> &Path {
            Path::new("fake.ts")
        }
    }

    #[test]
    fn test_find_exportable_skips_non_exportable_nodes() {
        let declarations = vec![
            Fake {
                exportable: false,
                exported: true,
                label: "declarator",
                parents: vec![Fake {
                    exportable: true,
                    exported: false,
                    label: "statement",
                    parents: Vec::new(),
                }],
            },
            Fake {
                exportable: true,
                exported: true,
                label: "second",
                parents: Vec::new(),
            },
        ];

        let found = find_exportable_node(declarations);
        assert_eq!(found.and_then(|n| n.name().map(str::to_string)), Some("second".to_string()));
    }
}
