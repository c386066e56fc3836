//! Declaration nodes as supplied by the AST provider

use super::types::TypeRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a declaration node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Interface,
    TypeAlias,
    Enum,
    Class,
    Function,
    /// `const a = 1, b = 2;` as a whole; carries the `export` keyword
    VariableStatement,
    /// A single declarator inside a variable statement
    Variable,
    Namespace,
    /// A member of an enum; its parent is the enum
    EnumMember,
}

impl NodeKind {
    /// Whether an `export` modifier can target this kind of node
    pub fn is_exportable(self) -> bool {
        !matches!(self, NodeKind::Variable | NodeKind::EnumMember)
    }

    /// Whether this kind introduces a name in type space
    pub fn declares_type(self) -> bool {
        matches!(
            self,
            NodeKind::Interface
                | NodeKind::TypeAlias
                | NodeKind::Enum
                | NodeKind::EnumMember
                | NodeKind::Class
                | NodeKind::Namespace
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NodeKind::Interface => "interface",
            NodeKind::TypeAlias => "type alias",
            NodeKind::Enum => "enum",
            NodeKind::Class => "class",
            NodeKind::Function => "function",
            NodeKind::VariableStatement => "variable statement",
            NodeKind::Variable => "variable",
            NodeKind::Namespace => "namespace",
            NodeKind::EnumMember => "enum member",
        };
        write!(f, "{}", label)
    }
}

/// The declaration kinds a guard can be generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardableKind {
    Interface,
    TypeAlias,
    Enum,
}

impl fmt::Display for GuardableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GuardableKind::Interface => "interface",
            GuardableKind::TypeAlias => "type alias",
            GuardableKind::Enum => "enum",
        };
        write!(f, "{}", label)
    }
}

/// A declaration inside a module
///
/// `parent` indexes the enclosing node in the same module's node table;
/// top-level declarations have no parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub name: Option<String>,
    pub parent: Option<usize>,
    pub exported: bool,
    pub default_export: bool,
    /// Inner text of each JSDoc block attached to the declaration
    pub docs: Vec<String>,
    pub ty: Option<TypeRef>,
    /// Types named in an interface `extends` clause
    pub heritage: Vec<TypeRef>,
    pub type_parameters: Vec<String>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, name: Option<String>) -> Self {
        Self {
            kind,
            name,
            parent: None,
            exported: false,
            default_export: false,
            docs: Vec::new(),
            ty: None,
            heritage: Vec::new(),
            type_parameters: Vec::new(),
        }
    }

    pub fn named(kind: NodeKind, name: impl Into<String>) -> Self {
        Self::new(kind, Some(name.into()))
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::named(NodeKind::Interface, name)
    }

    pub fn type_alias(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::named(NodeKind::TypeAlias, name).with_type(ty)
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::named(NodeKind::Enum, name)
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::named(NodeKind::Class, name)
    }

    pub fn namespace(name: impl Into<String>) -> Self {
        Self::named(NodeKind::Namespace, name)
    }

    pub fn exported(mut self) -> Self {
        self.exported = true;
        self
    }

    pub fn default_export(mut self) -> Self {
        self.exported = true;
        self.default_export = true;
        self
    }

    pub fn with_parent(mut self, parent: usize) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.docs.push(doc.into());
        self
    }

    pub fn with_type(mut self, ty: TypeRef) -> Self {
        self.ty = Some(ty);
        self
    }

    pub fn with_heritage(mut self, heritage: Vec<TypeRef>) -> Self {
        self.heritage = heritage;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
