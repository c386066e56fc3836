//! In-memory module model for one generation run
//!
//! A [`Project`] owns every [`SourceModule`] handed over by the AST provider.
//! Modules are addressed by [`ModuleId`] and keep their insertion order, which
//! is the order the generation pass visits them in.

use super::declaration::SyntaxNode;
use super::types::{ModuleId, NodeId, Symbol};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// One named binding of an import statement (`A` or `A as B`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedImport {
    pub imported: String,
    pub local: String,
}

impl NamedImport {
    pub fn new(imported: impl Into<String>) -> Self {
        let imported = imported.into();
        Self {
            local: imported.clone(),
            imported,
        }
    }

    pub fn aliased(imported: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            imported: imported.into(),
            local: local.into(),
        }
    }
}

/// An `import ... from "specifier"` statement
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportDeclaration {
    pub module_specifier: String,
    pub default_binding: Option<String>,
    pub namespace_binding: Option<String>,
    pub named: Vec<NamedImport>,
}

impl ImportDeclaration {
    pub fn new(module_specifier: impl Into<String>) -> Self {
        Self {
            module_specifier: module_specifier.into(),
            ..Default::default()
        }
    }

    pub fn with_named(mut self, named: NamedImport) -> Self {
        self.named.push(named);
        self
    }

    pub fn with_default(mut self, local: impl Into<String>) -> Self {
        self.default_binding = Some(local.into());
        self
    }

    pub fn with_namespace(mut self, local: impl Into<String>) -> Self {
        self.namespace_binding = Some(local.into());
        self
    }
}

/// `export { local as exported }`, optionally re-exported `from` another module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSpecifier {
    pub local: String,
    pub exported: String,
    pub source: Option<String>,
}

/// A parsed source module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceModule {
    pub path: PathBuf,
    pub text: String,
    pub nodes: Vec<SyntaxNode>,
    pub imports: Vec<ImportDeclaration>,
    pub export_specifiers: Vec<ExportSpecifier>,
    /// Sources of `export * from "..."`
    pub star_exports: Vec<String>,
    pub deleted: bool,
}

impl SourceModule {
    pub fn new(path: impl AsRef<Path>, text: impl Into<String>) -> Self {
        Self {
            path: normalize_path(path.as_ref()),
            text: text.into(),
            nodes: Vec::new(),
            imports: Vec::new(),
            export_specifiers: Vec::new(),
            star_exports: Vec::new(),
            deleted: false,
        }
    }

    /// Append a node and return its index
    pub fn add_node(&mut self, node: SyntaxNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn add_import(&mut self, import: ImportDeclaration) {
        self.imports.push(import);
    }

    /// Top-level nodes in source order
    pub fn top_level(&self) -> impl Iterator<Item = (usize, &SyntaxNode)> {
        self.nodes.iter().enumerate().filter(|(_, node)| node.parent.is_none())
    }

    /// Nodes whose parent is `scope` (`None` for the module scope)
    pub fn children_of(&self, scope: Option<usize>) -> impl Iterator<Item = (usize, &SyntaxNode)> {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, node)| node.parent == scope)
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// All modules of one run
#[derive(Debug, Clone, Default)]
pub struct Project {
    modules: Vec<SourceModule>,
    index: IndexMap<PathBuf, ModuleId>,
    deleted: Vec<PathBuf>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module; a module already registered under the same path is replaced
    pub fn add_module(&mut self, module: SourceModule) -> ModuleId {
        if let Some(&id) = self.index.get(&module.path) {
            self.modules[id.0] = module;
            return id;
        }
        let id = ModuleId(self.modules.len());
        self.index.insert(module.path.clone(), id);
        self.modules.push(module);
        id
    }

    pub fn module(&self, id: ModuleId) -> &SourceModule {
        &self.modules[id.0]
    }

    pub(crate) fn module_mut(&mut self, id: ModuleId) -> &mut SourceModule {
        &mut self.modules[id.0]
    }

    pub fn module_id(&self, path: &Path) -> Option<ModuleId> {
        self.index.get(&normalize_path(path)).copied()
    }

    pub fn module_by_path(&self, path: &Path) -> Option<&SourceModule> {
        self.module_id(path).map(|id| self.module(id))
    }

    /// Live modules in insertion order
    pub fn modules(&self) -> impl Iterator<Item = (ModuleId, &SourceModule)> {
        self.modules
            .iter()
            .enumerate()
            .filter(|(_, module)| !module.deleted)
            .map(|(i, module)| (ModuleId(i), module))
    }

    pub fn module_ids(&self) -> Vec<ModuleId> {
        self.modules().map(|(id, _)| id).collect()
    }

    pub fn len(&self) -> usize {
        self.modules().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { project: self, id }
    }

    /// The declaring nodes of a symbol
    pub fn symbol_nodes(&self, symbol: &Symbol) -> Vec<NodeRef<'_>> {
        symbol.declarations.iter().map(|&id| self.node(id)).collect()
    }

    /// Mark a module deleted; its path is recorded for the caller to act on
    pub(crate) fn mark_deleted(&mut self, id: ModuleId) {
        let module = &mut self.modules[id.0];
        if !module.deleted {
            module.deleted = true;
            self.deleted.push(module.path.clone());
        }
    }

    /// Paths of modules deleted during this run, in deletion order
    pub fn deleted_paths(&self) -> &[PathBuf] {
        &self.deleted
    }
}

/// A borrowed handle to one node of a project
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    project: &'a Project,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn project(&self) -> &'a Project {
        self.project
    }

    pub fn module(&self) -> &'a SourceModule {
        self.project.module(self.id.module)
    }

    pub fn node(&self) -> &'a SyntaxNode {
        &self.module().nodes[self.id.index]
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|index| NodeRef {
            project: self.project,
            id: NodeId::new(self.id.module, index),
        })
    }

    /// Enclosing nodes, innermost first
    pub fn ancestor_chain(&self) -> Vec<NodeRef<'a>> {
        let mut chain = Vec::new();
        let mut current = self.parent();
        while let Some(node) = current {
            current = node.parent();
            chain.push(node);
        }
        chain
    }
}

/// Lexically normalize a path: drop `.` segments and fold `..` where possible
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    normalized.pop();
                } else {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::declaration::NodeKind;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("./src/a/../b.ts")), PathBuf::from("src/b.ts"));
        assert_eq!(normalize_path(Path::new("../lib/./c.ts")), PathBuf::from("../lib/c.ts"));
        assert_eq!(normalize_path(Path::new("/root/x/../y.ts")), PathBuf::from("/root/y.ts"));
    }

    #[test]
    fn test_add_module_replaces_same_path() {
        let mut project = Project::new();
        let first = project.add_module(SourceModule::new("src/a.ts", "old"));
        let second = project.add_module(SourceModule::new("./src/a.ts", "new"));

        assert_eq!(first, second);
        assert_eq!(project.len(), 1);
        assert_eq!(project.module(first).text, "new");
    }

    #[test]
    fn test_ancestor_chain_is_innermost_first() {
        let mut module = SourceModule::new("src/a.ts", "");
        let outer = module.add_node(SyntaxNode::namespace("Outer").exported());
        let inner = module.add_node(SyntaxNode::namespace("Inner").with_parent(outer));
        let leaf = module.add_node(SyntaxNode::interface("Leaf").with_parent(inner));

        let mut project = Project::new();
        let id = project.add_module(module);
        let chain: Vec<_> = project
            .node(NodeId::new(id, leaf))
            .ancestor_chain()
            .iter()
            .map(|n| n.node().name().unwrap_or_default().to_string())
            .collect();

        assert_eq!(chain, vec!["Inner", "Outer"]);
    }

    #[test]
    fn test_mark_deleted_hides_module() {
        let mut project = Project::new();
        let id = project.add_module(SourceModule::new("src/a.guard.ts", ""));
        project.add_module(SourceModule::new("src/a.ts", ""));

        project.mark_deleted(id);
        project.mark_deleted(id);

        assert_eq!(project.len(), 1);
        assert_eq!(project.deleted_paths(), &[PathBuf::from("src/a.guard.ts")]);
        assert!(project.module_by_path(Path::new("src/a.ts")).is_some());
    }

    #[test]
    fn test_children_of_scope() {
        let mut module = SourceModule::new("src/a.ts", "");
        let ns = module.add_node(SyntaxNode::namespace("NS"));
        module.add_node(SyntaxNode::interface("Inside").with_parent(ns));
        module.add_node(SyntaxNode::interface("Outside"));

        let top: Vec<_> = module.top_level().map(|(_, n)| n.kind).collect();
        assert_eq!(top, vec![NodeKind::Namespace, NodeKind::Interface]);
        assert_eq!(module.children_of(Some(ns)).count(), 1);
    }
}
