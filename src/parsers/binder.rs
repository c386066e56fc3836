//! Links named type references to the declarations they name
//!
//! Runs once over a fully parsed project. Names are looked up in the
//! enclosing namespaces, then the module scope, then the module's imports;
//! imports are followed through re-exports and `export *` chains.

use crate::models::{ModuleId, NodeId, NodeKind, Project, Symbol, SyntaxNode, TypeRef, TypeShape};
use crate::utils::ModuleResolver;
use std::collections::HashSet;
use tracing::{debug, trace};

/// What an identifier in type position is bound to
enum Binding {
    Declarations(Vec<NodeId>),
    /// `import * as ns`
    Module(ModuleId),
}

/// Link every type of every module in the project
pub fn link_project(project: &mut Project) {
    let mut linked = 0usize;
    for module_id in project.module_ids() {
        let count = project.module(module_id).nodes.len();
        for index in 0..count {
            let node = &mut project.module_mut(module_id).nodes[index];
            let mut ty = node.ty.take();
            let mut heritage = std::mem::take(&mut node.heritage);
            if ty.is_none() && heritage.is_empty() {
                continue;
            }

            {
                let binder = Binder::new(project);
                let id = NodeId::new(module_id, index);
                if let Some(ty) = ty.as_mut() {
                    binder.attach_own_symbol(id, ty);
                    binder.link(id, ty);
                }
                for parent in heritage.iter_mut() {
                    binder.link(id, parent);
                }
            }

            let node = &mut project.module_mut(module_id).nodes[index];
            node.ty = ty;
            node.heritage = heritage;
            linked += 1;
        }
    }
    debug!(modules = project.len(), declarations = linked, "linked project types");
}

struct Binder<'p> {
    project: &'p Project,
    resolver: ModuleResolver<'p>,
}

impl<'p> Binder<'p> {
    fn new(project: &'p Project) -> Self {
        Self {
            project,
            resolver: ModuleResolver::new(project),
        }
    }

    fn node(&self, id: NodeId) -> &'p SyntaxNode {
        &self.project.module(id.module).nodes[id.index]
    }

    /// The symbol a declaration gives its own type
    fn attach_own_symbol(&self, id: NodeId, ty: &mut TypeRef) {
        let node = self.node(id);
        let Some(name) = node.name() else {
            return;
        };
        match node.kind {
            NodeKind::TypeAlias => {
                ty.alias_symbol = Some(Symbol::new(name, vec![id]));
            }
            NodeKind::Interface | NodeKind::Enum | NodeKind::Class => {
                // Same-named interfaces in one scope merge into one symbol
                let declarations = if node.kind == NodeKind::Interface {
                    self.scope_members(id.module, node.parent, name)
                        .into_iter()
                        .filter(|other| self.node(*other).kind == NodeKind::Interface)
                        .collect()
                } else {
                    vec![id]
                };
                ty.symbol = Some(Symbol::new(name, declarations));
            }
            _ => {}
        }
    }

    fn link(&self, from: NodeId, ty: &mut TypeRef) {
        ty.for_each_mut(&mut |t| {
            if t.symbol.is_some() {
                return;
            }
            match &t.shape {
                TypeShape::Reference(name) => {
                    let name = name.clone();
                    let symbol = self.lookup(from, &name);
                    let is_alias = symbol
                        .declarations
                        .first()
                        .map_or(false, |id| self.node(*id).kind == NodeKind::TypeAlias);
                    if is_alias && t.alias_symbol.is_none() {
                        t.alias_symbol = Some(symbol.clone());
                    }
                    t.symbol = Some(symbol);
                }
                TypeShape::Object(_) => t.symbol = Some(Symbol::anonymous()),
                _ => {}
            }
        });
    }

    /// Resolve a possibly qualified name (`Api.Request`, `Role.Admin`) written inside `from`
    fn lookup(&self, from: NodeId, name: &str) -> Symbol {
        let mut segments = name.split('.');
        let head = segments.next().unwrap_or(name);
        let last = name.rsplit('.').next().unwrap_or(name);

        let mut binding = match self.lookup_in_scopes(from, head) {
            Some(declarations) => Binding::Declarations(declarations),
            None => match self.lookup_import(from.module, head) {
                Some(binding) => binding,
                None => {
                    trace!(name, "unbound type name");
                    return Symbol::global(name);
                }
            },
        };

        for segment in segments {
            binding = match binding {
                Binding::Module(module) => {
                    Binding::Declarations(self.resolve_export(module, segment, &mut HashSet::new()))
                }
                Binding::Declarations(namespaces) => Binding::Declarations(
                    namespaces
                        .iter()
                        .filter(|id| matches!(self.node(**id).kind, NodeKind::Namespace | NodeKind::Enum))
                        .flat_map(|id| self.scope_members(id.module, Some(id.index), segment))
                        .collect(),
                ),
            };
        }

        match binding {
            Binding::Declarations(declarations) if !declarations.is_empty() => Symbol::new(last, declarations),
            _ => Symbol::global(name),
        }
    }

    /// Declarations named `name` directly inside `scope` of a module
    fn scope_members(&self, module: ModuleId, scope: Option<usize>, name: &str) -> Vec<NodeId> {
        self.project
            .module(module)
            .children_of(scope)
            .filter(|(_, node)| node.name() == Some(name) && node.kind.declares_type())
            .map(|(index, _)| NodeId::new(module, index))
            .collect()
    }

    /// Look `name` up in the namespaces enclosing `from`, innermost first, then the module scope
    fn lookup_in_scopes(&self, from: NodeId, name: &str) -> Option<Vec<NodeId>> {
        let mut scope = self.node(from).parent;
        loop {
            let members = self.scope_members(from.module, scope, name);
            if !members.is_empty() {
                return Some(members);
            }
            match scope {
                Some(index) => scope = self.project.module(from.module).nodes[index].parent,
                None => return None,
            }
        }
    }

    fn lookup_import(&self, module_id: ModuleId, name: &str) -> Option<Binding> {
        let module = self.project.module(module_id);
        for import in &module.imports {
            let imported = if let Some(named) = import.named.iter().find(|named| named.local == name) {
                Some(named.imported.as_str())
            } else if import.default_binding.as_deref() == Some(name) {
                Some("default")
            } else if import.namespace_binding.as_deref() == Some(name) {
                None
            } else {
                continue;
            };

            let target = self.resolver.resolve(&import.module_specifier, &module.path)?;
            return Some(match imported {
                Some(export) => Binding::Declarations(self.resolve_export(target, export, &mut HashSet::new())),
                None => Binding::Module(target),
            });
        }
        None
    }

    /// Declarations a module exports under `name`
    fn resolve_export(&self, module_id: ModuleId, name: &str, visited: &mut HashSet<(ModuleId, String)>) -> Vec<NodeId> {
        if !visited.insert((module_id, name.to_string())) {
            return Vec::new();
        }
        let module = self.project.module(module_id);

        let direct: Vec<NodeId> = if name == "default" {
            module
                .top_level()
                .filter(|(_, node)| node.default_export)
                .map(|(index, _)| NodeId::new(module_id, index))
                .collect()
        } else {
            self.exported_declarations(module_id, name)
        };
        if !direct.is_empty() {
            return direct;
        }

        for specifier in module.export_specifiers.iter().filter(|s| s.exported == name) {
            let found = match &specifier.source {
                Some(source) if specifier.local != "*" => match self.resolver.resolve(source, &module.path) {
                    Some(target) => self.resolve_export(target, &specifier.local, visited),
                    None => Vec::new(),
                },
                Some(_) => Vec::new(),
                None => match self.lookup_in_module_scope(module_id, &specifier.local) {
                    Some(Binding::Declarations(declarations)) => declarations,
                    _ => Vec::new(),
                },
            };
            if !found.is_empty() {
                return found;
            }
        }

        if name != "default" {
            for source in &module.star_exports {
                if let Some(target) = self.resolver.resolve(source, &module.path) {
                    let found = self.resolve_export(target, name, visited);
                    if !found.is_empty() {
                        return found;
                    }
                }
            }
        }
        Vec::new()
    }

    fn lookup_in_module_scope(&self, module_id: ModuleId, name: &str) -> Option<Binding> {
        let members = self.scope_members(module_id, None, name);
        if !members.is_empty() {
            return Some(Binding::Declarations(members));
        }
        self.lookup_import(module_id, name)
    }

    /// Exported top-level declarations named `name`, including declarators of exported statements
    fn exported_declarations(&self, module_id: ModuleId, name: &str) -> Vec<NodeId> {
        let module = self.project.module(module_id);
        module
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.name() == Some(name))
            .filter(|(_, node)| match node.parent {
                None => node.exported,
                Some(parent) => {
                    let statement = &module.nodes[parent];
                    node.kind == NodeKind::Variable && statement.parent.is_none() && statement.exported
                }
            })
            .map(|(index, _)| NodeId::new(module_id, index))
            .collect()
    }
}
