//! Parsing TypeScript sources into the declaration model
//!
//! [`ASTParser`] runs the OXC parser over one file and converts the AST into a
//! [`SourceModule`](crate::models::SourceModule) right away; [`binder`] then links
//! the type references of a whole project to their declarations.

pub mod ast_parser;
pub mod binder;
pub mod declaration_collector;

pub use ast_parser::ASTParser;
pub use binder::link_project;
pub use declaration_collector::DeclarationCollector;
