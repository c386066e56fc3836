//! Which declarations a guard can be generated for

use crate::models::{GuardableKind, NodeKind};

/// Label a declaration kind as guardable
pub fn classify(kind: NodeKind) -> Option<GuardableKind> {
    match kind {
        NodeKind::Interface => Some(GuardableKind::Interface),
        NodeKind::TypeAlias => Some(GuardableKind::TypeAlias),
        NodeKind::Enum => Some(GuardableKind::Enum),
        NodeKind::Class
        | NodeKind::Function
        | NodeKind::VariableStatement
        | NodeKind::Variable
        | NodeKind::Namespace
        | NodeKind::EnumMember => None,
    }
}
