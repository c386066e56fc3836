//! Converts an oxc program into an owned [`SourceModule`]
//!
//! The collector runs while the parse allocator is alive and copies out
//! everything later stages need: declarations with their nesting, exports,
//! import statements, JSDoc text and structural types.

use crate::models::project::{ExportSpecifier as ExportEntry, ImportDeclaration as ImportEntry};
use crate::models::{NamedImport, NodeKind, Primitive, Property, SourceModule, SyntaxNode, TypeRef, TypeShape};
use oxc_allocator::Vec as ArenaVec;
use oxc_ast::ast::*;
use oxc_span::{GetSpan, Span};
use std::path::Path;

/// Walks the statements of one program
pub struct DeclarationCollector<'s> {
    source: &'s str,
    /// Block comments including their delimiters, in source order
    comments: Vec<Span>,
    module: SourceModule,
    /// Type parameters in scope while converting a declaration
    type_parameters: Vec<String>,
    /// `export { local as exported }` and `export default local`
    local_exports: Vec<(String, String)>,
}

impl<'s> DeclarationCollector<'s> {
    pub fn collect<'a>(path: &Path, source: &'s str, program: &Program<'a>) -> SourceModule {
        let comments = program
            .comments
            .iter()
            .filter(|comment| comment.is_block())
            .map(|comment| with_delimiters(source, comment.span))
            .collect();

        let mut collector = Self {
            source,
            comments,
            module: SourceModule::new(path, source),
            type_parameters: Vec::new(),
            local_exports: Vec::new(),
        };
        collector.visit_statements(&program.body, None);
        collector.apply_local_exports();
        collector.module
    }

    fn visit_statements<'a>(&mut self, statements: &ArenaVec<'a, Statement<'a>>, parent: Option<usize>) {
        for statement in statements {
            self.visit_statement(statement, parent);
        }
    }

    fn visit_statement<'a>(&mut self, statement: &Statement<'a>, parent: Option<usize>) {
        match statement {
            Statement::ImportDeclaration(decl) => self.visit_import(decl),
            Statement::ExportNamedDeclaration(decl) => self.visit_export_named(decl, parent),
            Statement::ExportDefaultDeclaration(decl) => self.visit_export_default(decl, parent),
            Statement::ExportAllDeclaration(decl) => self.visit_export_all(decl),
            _ => {
                if let Some(declaration) = statement.as_declaration() {
                    self.visit_declaration(declaration, parent, false, statement.span().start);
                }
            }
        }
    }

    fn visit_import<'a>(&mut self, decl: &ImportDeclaration<'a>) {
        let mut import = ImportEntry::new(decl.source.value.as_str());
        if let Some(specifiers) = &decl.specifiers {
            for specifier in specifiers {
                match specifier {
                    ImportDeclarationSpecifier::ImportSpecifier(spec) => {
                        import
                            .named
                            .push(NamedImport::aliased(spec.imported.name().as_str(), spec.local.name.as_str()));
                    }
                    ImportDeclarationSpecifier::ImportDefaultSpecifier(spec) => {
                        import.default_binding = Some(spec.local.name.to_string());
                    }
                    ImportDeclarationSpecifier::ImportNamespaceSpecifier(spec) => {
                        import.namespace_binding = Some(spec.local.name.to_string());
                    }
                }
            }
        }
        self.module.add_import(import);
    }

    fn visit_export_named<'a>(&mut self, decl: &ExportNamedDeclaration<'a>, parent: Option<usize>) {
        if let Some(declaration) = &decl.declaration {
            self.visit_declaration(declaration, parent, true, decl.span.start);
        }
        if parent.is_some() {
            return;
        }

        let source = decl.source.as_ref().map(|source| source.value.to_string());
        for specifier in &decl.specifiers {
            let local = specifier.local.name().to_string();
            let exported = specifier.exported.name().to_string();
            if source.is_none() {
                self.local_exports.push((local.clone(), exported.clone()));
            }
            self.module.export_specifiers.push(ExportEntry {
                local,
                exported,
                source: source.clone(),
            });
        }
    }

    fn visit_export_default<'a>(&mut self, decl: &ExportDefaultDeclaration<'a>, parent: Option<usize>) {
        let docs = self.docs_before(decl.span.start);
        let node = match &decl.declaration {
            ExportDefaultDeclarationKind::TSInterfaceDeclaration(iface) => self.interface_node(iface),
            ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                SyntaxNode::new(NodeKind::Class, class.id.as_ref().map(|id| id.name.to_string()))
            }
            ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
                SyntaxNode::new(NodeKind::Function, func.id.as_ref().map(|id| id.name.to_string()))
            }
            ExportDefaultDeclarationKind::Identifier(ident) => {
                self.local_exports.push((ident.name.to_string(), "default".to_string()));
                return;
            }
            _ => return,
        };
        self.push(node.default_export(), parent, docs);
    }

    fn visit_export_all<'a>(&mut self, decl: &ExportAllDeclaration<'a>) {
        let source = decl.source.value.to_string();
        match &decl.exported {
            Some(exported) => self.module.export_specifiers.push(ExportEntry {
                local: "*".to_string(),
                exported: exported.name().to_string(),
                source: Some(source),
            }),
            None => self.module.star_exports.push(source),
        }
    }

    fn visit_declaration<'a>(
        &mut self,
        declaration: &Declaration<'a>,
        parent: Option<usize>,
        exported: bool,
        anchor: u32,
    ) -> Option<usize> {
        let docs = self.docs_before(anchor);
        let node = match declaration {
            Declaration::TSInterfaceDeclaration(iface) => self.interface_node(iface),
            Declaration::TSTypeAliasDeclaration(alias) => self.type_alias_node(alias),
            Declaration::TSEnumDeclaration(decl) => {
                return Some(self.enumeration(decl, parent, exported, docs));
            }
            Declaration::ClassDeclaration(class) => {
                SyntaxNode::new(NodeKind::Class, class.id.as_ref().map(|id| id.name.to_string()))
            }
            Declaration::FunctionDeclaration(func) => {
                SyntaxNode::new(NodeKind::Function, func.id.as_ref().map(|id| id.name.to_string()))
            }
            Declaration::VariableDeclaration(var) => {
                return Some(self.variable_statement(var, parent, exported, docs));
            }
            Declaration::TSModuleDeclaration(module) => {
                return Some(self.namespace(module, parent, exported, docs));
            }
            _ => return None,
        };
        let node = if exported { node.exported() } else { node };
        Some(self.push(node, parent, docs))
    }

    fn push(&mut self, mut node: SyntaxNode, parent: Option<usize>, docs: Vec<String>) -> usize {
        node.parent = parent;
        node.docs = docs;
        self.module.add_node(node)
    }

    fn variable_statement<'a>(
        &mut self,
        var: &VariableDeclaration<'a>,
        parent: Option<usize>,
        exported: bool,
        docs: Vec<String>,
    ) -> usize {
        let mut statement = SyntaxNode::new(NodeKind::VariableStatement, None);
        statement.exported = exported;
        let index = self.push(statement, parent, docs);

        for declarator in &var.declarations {
            if let BindingPatternKind::BindingIdentifier(id) = &declarator.id.kind {
                self.push(SyntaxNode::named(NodeKind::Variable, id.name.as_str()), Some(index), Vec::new());
            }
        }
        index
    }

    /// An enum node followed by one child node per member
    fn enumeration<'a>(
        &mut self,
        decl: &TSEnumDeclaration<'a>,
        parent: Option<usize>,
        exported: bool,
        docs: Vec<String>,
    ) -> usize {
        let node = SyntaxNode::enumeration(decl.id.name.as_str());
        let node = if exported { node.exported() } else { node };
        let index = self.push(node, parent, docs);

        for member in &decl.body.members {
            let name = match &member.id {
                TSEnumMemberName::Identifier(ident) => ident.name.as_str(),
                TSEnumMemberName::String(lit) | TSEnumMemberName::ComputedString(lit) => lit.value.as_str(),
                TSEnumMemberName::ComputedTemplateString(_) => continue,
            };
            self.push(SyntaxNode::named(NodeKind::EnumMember, name), Some(index), Vec::new());
        }
        index
    }

    fn namespace<'a>(
        &mut self,
        decl: &TSModuleDeclaration<'a>,
        parent: Option<usize>,
        exported: bool,
        docs: Vec<String>,
    ) -> usize {
        let name = match &decl.id {
            TSModuleDeclarationName::Identifier(id) => id.name.to_string(),
            TSModuleDeclarationName::StringLiteral(lit) => lit.value.to_string(),
        };
        let mut node = SyntaxNode::namespace(name);
        node.exported = exported;
        let index = self.push(node, parent, docs);

        match &decl.body {
            Some(TSModuleDeclarationBody::TSModuleBlock(block)) => self.visit_statements(&block.body, Some(index)),
            // `namespace A.B {}`: B is implicitly exported from A
            Some(TSModuleDeclarationBody::TSModuleDeclaration(inner)) => {
                self.namespace(inner, Some(index), true, Vec::new());
            }
            None => {}
        }
        index
    }

    fn interface_node<'a>(&mut self, iface: &TSInterfaceDeclaration<'a>) -> SyntaxNode {
        let params = type_parameter_names(iface.type_parameters.as_deref());
        let scope = self.type_parameters.len();
        self.type_parameters.extend(params.iter().cloned());

        let properties = self.signatures(&iface.body.body);
        let heritage = iface
            .extends
            .iter()
            .filter_map(|heritage| {
                let name = expression_name(&heritage.expression)?;
                let arguments = self.type_arguments(heritage.type_arguments.as_deref());
                Some(TypeRef::reference(name).with_type_arguments(arguments))
            })
            .collect();
        self.type_parameters.truncate(scope);

        let mut node = SyntaxNode::interface(iface.id.name.as_str())
            .with_type(TypeRef::object(properties))
            .with_heritage(heritage);
        node.type_parameters = params;
        node
    }

    fn type_alias_node<'a>(&mut self, alias: &TSTypeAliasDeclaration<'a>) -> SyntaxNode {
        let params = type_parameter_names(alias.type_parameters.as_deref());
        let scope = self.type_parameters.len();
        self.type_parameters.extend(params.iter().cloned());
        let ty = self.convert(&alias.type_annotation);
        self.type_parameters.truncate(scope);

        let mut node = SyntaxNode::type_alias(alias.id.name.as_str(), ty);
        node.type_parameters = params;
        node
    }

    fn signatures<'a>(&self, signatures: &ArenaVec<'a, TSSignature<'a>>) -> Vec<Property> {
        let mut properties = Vec::new();
        for signature in signatures {
            let TSSignature::TSPropertySignature(prop) = signature else {
                continue;
            };
            let Some(name) = prop.key.static_name() else {
                continue;
            };
            let ty = prop
                .type_annotation
                .as_ref()
                .map(|annotation| self.convert(&annotation.type_annotation))
                .unwrap_or_else(|| TypeRef::primitive(Primitive::Any));
            properties.push(Property {
                name: name.to_string(),
                optional: prop.optional,
                readonly: prop.readonly,
                ty,
            });
        }
        properties
    }

    fn type_arguments<'a>(&self, arguments: Option<&TSTypeParameterInstantiation<'a>>) -> Vec<TypeRef> {
        arguments
            .map(|arguments| arguments.params.iter().map(|param| self.convert(param)).collect())
            .unwrap_or_default()
    }

    fn convert<'a>(&self, ty: &TSType<'a>) -> TypeRef {
        match ty {
            TSType::TSAnyKeyword(_) => TypeRef::primitive(Primitive::Any),
            TSType::TSStringKeyword(_) => TypeRef::primitive(Primitive::String),
            TSType::TSNumberKeyword(_) => TypeRef::primitive(Primitive::Number),
            TSType::TSBooleanKeyword(_) => TypeRef::primitive(Primitive::Boolean),
            TSType::TSBigIntKeyword(_) => TypeRef::primitive(Primitive::BigInt),
            TSType::TSSymbolKeyword(_) => TypeRef::primitive(Primitive::Symbol),
            TSType::TSNullKeyword(_) => TypeRef::primitive(Primitive::Null),
            TSType::TSUndefinedKeyword(_) => TypeRef::primitive(Primitive::Undefined),
            TSType::TSUnknownKeyword(_) => TypeRef::primitive(Primitive::Unknown),
            TSType::TSNeverKeyword(_) => TypeRef::primitive(Primitive::Never),
            TSType::TSVoidKeyword(_) => TypeRef::primitive(Primitive::Void),
            TSType::TSObjectKeyword(_) => TypeRef::primitive(Primitive::Object),
            TSType::TSLiteralType(literal) => TypeRef::literal(self.text(literal.span)),
            TSType::TSArrayType(array) => TypeRef::array(self.convert(&array.element_type)),
            TSType::TSTupleType(tuple) => TypeRef::new(TypeShape::Tuple(
                tuple
                    .element_types
                    .iter()
                    .map(|element| self.convert_tuple_element(element))
                    .collect(),
            )),
            TSType::TSUnionType(union) => TypeRef::union(union.types.iter().map(|t| self.convert(t)).collect()),
            TSType::TSIntersectionType(intersection) => TypeRef::new(TypeShape::Intersection(
                intersection.types.iter().map(|t| self.convert(t)).collect(),
            )),
            TSType::TSParenthesizedType(inner) => self.convert(&inner.type_annotation),
            TSType::TSTypeOperatorType(operator) if matches!(operator.operator, TSTypeOperatorOperator::Readonly) => {
                self.convert(&operator.type_annotation)
            }
            TSType::TSTypeLiteral(literal) => TypeRef::object(self.signatures(&literal.members)),
            TSType::TSTypeReference(reference) => self.convert_reference(reference),
            _ => TypeRef::unknown(),
        }
    }

    fn convert_tuple_element<'a>(&self, element: &TSTupleElement<'a>) -> TypeRef {
        match element {
            TSTupleElement::TSOptionalType(optional) => self.convert(&optional.type_annotation),
            TSTupleElement::TSRestType(rest) => self.convert(&rest.type_annotation),
            other => other
                .as_ts_type()
                .map(|ty| self.convert(ty))
                .unwrap_or_else(TypeRef::unknown),
        }
    }

    fn convert_reference<'a>(&self, reference: &TSTypeReference<'a>) -> TypeRef {
        let name = type_name(&reference.type_name);
        let arguments = self.type_arguments(reference.type_arguments.as_deref());
        if arguments.is_empty() && self.type_parameters.iter().any(|param| *param == name) {
            return TypeRef::new(TypeShape::TypeParameter(name));
        }
        TypeRef::reference(name).with_type_arguments(arguments)
    }

    fn text(&self, span: Span) -> String {
        self.source
            .get(span.start as usize..span.end as usize)
            .unwrap_or_default()
            .to_string()
    }

    /// JSDoc blocks directly preceding `start`, separated only by whitespace
    fn docs_before(&self, start: u32) -> Vec<String> {
        let mut docs = Vec::new();
        let mut cursor = start as usize;
        for span in self.comments.iter().rev().filter(|span| span.end <= start) {
            let end = span.end as usize;
            let gap = self.source.get(end..cursor).unwrap_or("?");
            if !gap.trim().is_empty() {
                break;
            }
            if let Some(inner) = self.source.get(span.start as usize..end).and_then(jsdoc_inner_text) {
                docs.push(inner);
            }
            cursor = span.start as usize;
        }
        docs.reverse();
        docs
    }

    /// Mark declarations named by `export { ... }` and `export default name`
    fn apply_local_exports(&mut self) {
        for (local, exported) in std::mem::take(&mut self.local_exports) {
            let targets: Vec<usize> = self
                .module
                .nodes
                .iter()
                .enumerate()
                .filter(|(_, node)| node.name() == Some(local.as_str()))
                .filter_map(|(index, node)| match node.parent {
                    None => Some(index),
                    // A declarator is exported through its statement
                    Some(parent) if node.kind == NodeKind::Variable && self.module.nodes[parent].parent.is_none() => {
                        Some(parent)
                    }
                    Some(_) => None,
                })
                .collect();

            for index in targets {
                let node = &mut self.module.nodes[index];
                node.exported = true;
                if exported == "default" {
                    node.default_export = true;
                }
            }
        }
    }
}

/// Comment spans may or may not include the `/*` `*/` delimiters
fn with_delimiters(source: &str, span: Span) -> Span {
    let start = span.start as usize;
    let covers_delimiters = source.get(start..).map_or(false, |rest| rest.starts_with("/*"));
    if covers_delimiters || span.start < 2 {
        span
    } else {
        Span::new(span.start - 2, span.end + 2)
    }
}

/// Inner text of a `/** ... */` block with the leading `*` of each line removed
fn jsdoc_inner_text(comment: &str) -> Option<String> {
    let body = comment.strip_prefix("/**")?.strip_suffix("*/")?;
    let lines: Vec<&str> = body
        .lines()
        .map(|line| {
            let line = line.trim_start();
            line.strip_prefix('*').unwrap_or(line).trim()
        })
        .collect();
    Some(lines.join("\n").trim().to_string())
}

fn type_parameter_names<'a>(params: Option<&TSTypeParameterDeclaration<'a>>) -> Vec<String> {
    params
        .map(|params| params.params.iter().map(|param| param.name.name.to_string()).collect())
        .unwrap_or_default()
}

fn type_name<'a>(name: &TSTypeName<'a>) -> String {
    match name {
        TSTypeName::IdentifierReference(ident) => ident.name.to_string(),
        TSTypeName::QualifiedName(qualified) => format!("{}.{}", type_name(&qualified.left), qualified.right.name),
        #[allow(unreachable_patterns)]
        _ => "this".to_string(),
    }
}

fn expression_name<'a>(expression: &Expression<'a>) -> Option<String> {
    match expression {
        Expression::Identifier(ident) => Some(ident.name.to_string()),
        Expression::StaticMemberExpression(member) => {
            Some(format!("{}.{}", expression_name(&member.object)?, member.property.name))
        }
        _ => None,
    }
}
