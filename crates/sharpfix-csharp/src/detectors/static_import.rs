//! Repeated qualified access to the static members of one static class.
//!
//! `Math.Max(a, b)` written often enough suggests `using static System.Math;`.
//! Each qualifying call, field read and property read counts once. The first
//! access of a type reports when the document's total reaches the threshold.
//! Accesses are grouped once per semantic model, so each member access costs
//! a lookup.

use sharpfix_core::diagnostic::{Diagnostic, DiagnosticPayload};
use sharpfix_cst::nodes::{AstNode, MemberAccessExpression};
use sharpfix_cst::SyntaxNode;

use crate::descriptors::ACA0006;
use crate::semantic::{SemanticModel, SymbolId};

/// A member access whose qualifier names a static class and whose member is
/// one of that class's static members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticAccess {
    pub access: MemberAccessExpression,
    pub qualifier: SyntaxNode,
    pub type_symbol: SymbolId,
    pub member: SymbolId,
}

/// Classify `node` as a qualifying static access.
pub fn static_access(model: &SemanticModel, node: &SyntaxNode) -> Option<StaticAccess> {
    let (type_symbol, member) = model.static_class_access(node)?;
    let access = MemberAccessExpression::cast(node.clone())?;
    let qualifier = access.expression()?;
    Some(StaticAccess {
        access,
        qualifier,
        type_symbol,
        member,
    })
}

/// Every qualifying access to `type_symbol`, in document order.
pub fn static_accesses_of(model: &SemanticModel, type_symbol: SymbolId) -> Vec<StaticAccess> {
    model
        .static_class_accesses()
        .get(&type_symbol)
        .into_iter()
        .flatten()
        .filter_map(|node| static_access(model, node))
        .collect()
}

/// The ACA0006 diagnostic for a member access, when it is the first of at
/// least `threshold` qualifying accesses to its type.
pub fn detect_static_imports(
    node: &SyntaxNode,
    model: &SemanticModel,
    threshold: usize,
) -> Vec<Diagnostic> {
    let Some(found) = static_access(model, node) else {
        return Vec::new();
    };
    let Some(accesses) = model.static_class_accesses().get(&found.type_symbol) else {
        return Vec::new();
    };
    let is_first = accesses.first().is_some_and(|first| first == node);
    if !is_first || accesses.len() < threshold.max(1) {
        return Vec::new();
    }
    let simple_name = model.symbol(found.type_symbol).name.clone();
    let type_name = model.table().qualified_name(found.type_symbol);
    vec![
        Diagnostic::new(&ACA0006, found.qualifier.span(), vec![simple_name])
            .with_payload(DiagnosticPayload::StaticImport { type_name }),
    ]
}
