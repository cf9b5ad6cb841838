//! Method signatures rewritten to match a delegate.
//!
//! For `new D(M)` where `M` does not convert to `D`, the first overload of
//! `M` with as many parameters as `D` takes `D`'s return type and, when
//! requested, `D`'s parameter types. The new root carries `Member` and
//! `Type` annotations naming the method and its new return type.

use sharpfix_cst::make;
use sharpfix_cst::nodes::{AstNode, MethodDeclaration};
use sharpfix_cst::{SyntaxAnnotation, SyntaxNode, TreeEdit};

use super::with_trivia_of;
use crate::helpers::try_resolve_overload_candidate_for_failed_binding;
use crate::semantic::SemanticModel;

/// Which parts of the signature to rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignaturePart {
    ReturnType,
    ReturnAndParameters,
}

/// Rewrite the candidate method for the failed conversion at `argument`.
/// Returns the new, annotated root.
pub fn match_delegate_signature(
    model: &SemanticModel,
    argument: &SyntaxNode,
    part: SignaturePart,
) -> Option<SyntaxNode> {
    let binding = try_resolve_overload_candidate_for_failed_binding(model, argument)?;
    let invoke = model.symbol(binding.invoke);
    let candidate = binding
        .info
        .candidates
        .iter()
        .copied()
        .find(|&c| model.symbol(c).parameters.len() == invoke.parameters.len())?;
    let declaration = MethodDeclaration::cast(model.declaration_node(candidate)?)?;
    let method = model.symbol(candidate);
    let substitution = &binding.delegate_substitution;

    let mut edit = TreeEdit::new();
    let delegate_return = substitution.apply(invoke.ty.as_ref()?);
    let return_display = model.type_display(&delegate_return);
    if method.ty.as_ref() != Some(&delegate_return) {
        let return_node = declaration.return_type()?;
        let replacement = make::type_syntax(&return_display).ok()?;
        edit.replace_node(&return_node, with_trivia_of(&return_node, replacement));
    }

    if part == SignaturePart::ReturnAndParameters {
        let parameter_nodes = declaration.parameter_list()?.parameters();
        for ((&wanted, &have), node) in invoke
            .parameters
            .iter()
            .zip(&method.parameters)
            .zip(&parameter_nodes)
        {
            let Some(wanted) = model.symbol(wanted).ty.as_ref().map(|t| substitution.apply(t)) else {
                continue;
            };
            if model.symbol(have).ty.as_ref() == Some(&wanted) {
                continue;
            }
            let Some(type_node) = node.ty() else {
                continue;
            };
            let replacement = make::type_syntax(&model.type_display(&wanted)).ok()?;
            edit.replace_node(&type_node, with_trivia_of(&type_node, replacement));
        }
    }

    let new_root = edit.apply(&declaration.syntax().root());
    let annotated = new_root
        .green()
        .with_annotation(SyntaxAnnotation::member(method.name.clone()))
        .with_annotation(SyntaxAnnotation::type_name(return_display));
    Some(SyntaxNode::new_root(annotated))
}
