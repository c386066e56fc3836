//! Decide whether a declaration gets a guard, and what it is called

use super::diagnostics::Diagnostics;
use crate::models::types::ANONYMOUS_TYPE_NAME;
use crate::models::{Diagnostic, DiagnosticKind, ProcessOptions, SyntaxNode};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

pub use crate::models::GuardName;

/// Token that introduces a generator directive in a JSDoc `@see` tag
pub const DIRECTIVE_TOKEN: &str = "ts-auto-guard";

/// The only directive command understood
pub const TYPE_GUARD_COMMAND: &str = "type-guard";

static DIRECTIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"@see\s+(?:\{{\s*(@link\s*)?(\w+)\s*\}}\s+)?{}:([^\s]*)",
        DIRECTIVE_TOKEN
    ))
    .unwrap()
});

/// A `@see {Name} ts-auto-guard:command` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub command: String,
    pub custom_name: Option<String>,
}

/// Parse one documentation line
pub fn parse_directive(line: &str) -> Option<Directive> {
    let caps = DIRECTIVE_RE.captures(line.trim())?;
    Some(Directive {
        command: caps.get(3).map(|m| m.as_str().to_string()).unwrap_or_default(),
        custom_name: caps.get(2).map(|m| m.as_str().to_string()),
    })
}

/// Find the first directive in a declaration's documentation
fn find_directive(declaration: &SyntaxNode) -> Option<Directive> {
    declaration
        .docs
        .iter()
        .flat_map(|block| block.lines())
        .find_map(parse_directive)
}

/// Decide the guard name for a guardable declaration
///
/// A directive always wins. Without one, a name is only derived when
/// `export_all` is set.
pub fn guard_name(
    declaration: &SyntaxNode,
    options: &ProcessOptions,
    diagnostics: &mut Diagnostics,
) -> Option<GuardName> {
    if let Some(directive) = find_directive(declaration) {
        if directive.command != TYPE_GUARD_COMMAND {
            let message = format!(
                "command {} is not supported (on {})",
                directive.command,
                declaration.name().unwrap_or(ANONYMOUS_TYPE_NAME)
            );
            diagnostics.report(Diagnostic::new(DiagnosticKind::UnsupportedDirective, message));
            return None;
        }
        return Some(match directive.custom_name {
            Some(name) => GuardName::Custom(name),
            None => GuardName::DefaultNaming,
        });
    }

    if !options.export_all {
        return None;
    }

    let ty = declaration.ty.as_ref();
    let candidates = [
        declaration.name(),
        ty.and_then(|t| t.symbol.as_ref()).map(|s| s.name.as_str()),
        ty.and_then(|t| t.alias_symbol.as_ref()).map(|s| s.name.as_str()),
    ];
    let name = candidates
        .into_iter()
        .flatten()
        .find(|name| !name.is_empty() && *name != ANONYMOUS_TYPE_NAME)?;

    debug!(declaration = name, "derived guard name");
    Some(GuardName::Derived(format!("is{}", name)))
}
