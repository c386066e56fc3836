//! Structural type model shared by the parser, binder and resolver

use serde::{Deserialize, Serialize};

/// Name TypeScript gives to anonymous object literal types
pub const ANONYMOUS_TYPE_NAME: &str = "__type";

/// Index of a module inside a [`Project`](super::project::Project)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleId(pub usize);

/// Address of a syntax node: owning module plus index into its node table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId {
    pub module: ModuleId,
    pub index: usize,
}

impl NodeId {
    pub fn new(module: ModuleId, index: usize) -> Self {
        Self { module, index }
    }
}

/// A named entity a type can originate from
///
/// Lib and global names that no project module declares keep their name but
/// carry no declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub declarations: Vec<NodeId>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, declarations: Vec<NodeId>) -> Self {
        Self {
            name: name.into(),
            declarations,
        }
    }

    /// A symbol with no declaration inside the project
    pub fn global(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn anonymous() -> Self {
        Self::global(ANONYMOUS_TYPE_NAME)
    }

    pub fn is_anonymous(&self) -> bool {
        self.name == ANONYMOUS_TYPE_NAME
    }
}

/// Keyword types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    String,
    Number,
    Boolean,
    BigInt,
    Symbol,
    Null,
    Undefined,
    Any,
    Unknown,
    Never,
    Void,
    Object,
}

/// A property of an object type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub optional: bool,
    pub readonly: bool,
    pub ty: TypeRef,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            optional: false,
            readonly: false,
            ty,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// The structural shape of a type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeShape {
    Primitive(Primitive),
    /// Literal type, kept as written (`"admin"`, `42`, `true`)
    Literal(String),
    /// A named type reference, linked to a [`Symbol`] by the binder
    Reference(String),
    /// A reference to a type parameter in scope
    TypeParameter(String),
    Object(Vec<Property>),
    Array(Box<TypeRef>),
    Tuple(Vec<TypeRef>),
    Union(Vec<TypeRef>),
    Intersection(Vec<TypeRef>),
    Unknown,
}

/// An opaque structural type descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRef {
    pub shape: TypeShape,
    pub symbol: Option<Symbol>,
    pub alias_symbol: Option<Symbol>,
    pub type_arguments: Vec<TypeRef>,
}

impl TypeRef {
    pub fn new(shape: TypeShape) -> Self {
        Self {
            shape,
            symbol: None,
            alias_symbol: None,
            type_arguments: Vec::new(),
        }
    }

    pub fn primitive(primitive: Primitive) -> Self {
        Self::new(TypeShape::Primitive(primitive))
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self::new(TypeShape::Literal(text.into()))
    }

    /// An unlinked reference to a named type
    pub fn reference(name: impl Into<String>) -> Self {
        Self::new(TypeShape::Reference(name.into()))
    }

    pub fn object(properties: Vec<Property>) -> Self {
        Self::new(TypeShape::Object(properties))
    }

    pub fn array(element: TypeRef) -> Self {
        Self::new(TypeShape::Array(Box::new(element)))
    }

    pub fn union(members: Vec<TypeRef>) -> Self {
        Self::new(TypeShape::Union(members))
    }

    pub fn unknown() -> Self {
        Self::new(TypeShape::Unknown)
    }

    pub fn with_symbol(mut self, symbol: Symbol) -> Self {
        self.symbol = Some(symbol);
        self
    }

    pub fn with_alias_symbol(mut self, symbol: Symbol) -> Self {
        self.alias_symbol = Some(symbol);
        self
    }

    pub fn with_type_arguments(mut self, arguments: Vec<TypeRef>) -> Self {
        self.type_arguments = arguments;
        self
    }

    /// Name of the reference, if this type is a named reference
    pub fn reference_name(&self) -> Option<&str> {
        match &self.shape {
            TypeShape::Reference(name) => Some(name),
            _ => None,
        }
    }

    /// Visit this type and every nested type, parents before children
    pub fn for_each_mut(&mut self, f: &mut impl FnMut(&mut TypeRef)) {
        f(self);
        match &mut self.shape {
            TypeShape::Object(properties) => {
                for property in properties {
                    property.ty.for_each_mut(f);
                }
            }
            TypeShape::Array(element) => element.for_each_mut(f),
            TypeShape::Tuple(members) | TypeShape::Union(members) | TypeShape::Intersection(members) => {
                for member in members {
                    member.for_each_mut(f);
                }
            }
            _ => {}
        }
        for argument in &mut self.type_arguments {
            argument.for_each_mut(f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_each_mut_reaches_nested_references() {
        let mut ty = TypeRef::object(vec![
            Property::new("id", TypeRef::primitive(Primitive::String)),
            Property::new(
                "roles",
                TypeRef::array(TypeRef::union(vec![
                    TypeRef::reference("Role"),
                    TypeRef::literal("\"guest\""),
                ])),
            ),
            Property::new(
                "meta",
                TypeRef::reference("Map").with_type_arguments(vec![
                    TypeRef::primitive(Primitive::String),
                    TypeRef::reference("Meta"),
                ]),
            ),
        ]);

        let mut seen = Vec::new();
        ty.for_each_mut(&mut |t| {
            if let Some(name) = t.reference_name() {
                seen.push(name.to_string());
            }
        });

        assert_eq!(seen, vec!["Role", "Map", "Meta"]);
    }

    #[test]
    fn test_anonymous_symbol() {
        assert!(Symbol::anonymous().is_anonymous());
        assert!(!Symbol::global("Date").is_anonymous());
        assert!(Symbol::global("Date").declarations.is_empty());
    }
}
