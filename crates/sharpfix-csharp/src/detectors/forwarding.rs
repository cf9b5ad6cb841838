//! Composites that do not forward interface calls to their children.
//!
//! A class implementing `IRunner` while holding a `List<IRunner>` usually
//! means to pass every `IRunner` call on to the list. Methods that are still
//! empty, or only throw, are reported once per collection member they could
//! forward to.

use sharpfix_core::diagnostic::{Diagnostic, DiagnosticPayload};
use sharpfix_cst::nodes::{AstNode, MethodDeclaration, TypeDeclaration};
use sharpfix_cst::{SyntaxKind, SyntaxNode};

use crate::descriptors::ACA0001;
use crate::helpers::{
    classify_method_return_shape, declared_type, find_interface_member_candidates,
    is_method_candidate_for_forwarding,
};
use crate::semantic::SemanticModel;

/// ACA0001 diagnostics for a class declaration.
pub fn detect_forwarding(node: &SyntaxNode, model: &SemanticModel) -> Vec<Diagnostic> {
    if node.kind() != SyntaxKind::ClassDeclaration {
        return Vec::new();
    }
    let Some(class) = TypeDeclaration::cast(node.clone()) else {
        return Vec::new();
    };
    let Some(class_symbol) = model.declared_symbol(node) else {
        return Vec::new();
    };
    if model
        .all_interfaces(&declared_type(model, class_symbol))
        .is_empty()
    {
        return Vec::new();
    }
    let candidates = find_interface_member_candidates(model, class_symbol);
    if candidates.is_empty() {
        return Vec::new();
    }

    let mut diagnostics = Vec::new();
    for method in class.members().into_iter().filter_map(MethodDeclaration::cast) {
        if !is_empty_or_not_implemented(&method) {
            continue;
        }
        let (Some(symbol), Some(identifier)) =
            (model.declared_symbol(method.syntax()), method.identifier())
        else {
            continue;
        };
        if classify_method_return_shape(model, symbol).is_none() {
            continue;
        }
        for (interface, members) in &candidates {
            if !is_method_candidate_for_forwarding(model, interface, symbol) {
                continue;
            }
            for &member in members {
                let member_name = model.symbol(member).name.clone();
                diagnostics.push(
                    Diagnostic::new(
                        &ACA0001,
                        identifier.span(),
                        vec![method.name(), member_name.clone()],
                    )
                    .with_payload(DiagnosticPayload::Forwarding { member_name }),
                );
            }
        }
    }
    diagnostics
}

/// A block body with no statements, or with a single `throw`.
fn is_empty_or_not_implemented(method: &MethodDeclaration) -> bool {
    let Some(body) = method.body() else {
        return false;
    };
    match body.statements().as_slice() {
        [] => true,
        [only] => only.kind() == SyntaxKind::ThrowStatement,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn detect(source: &str) -> Vec<Diagnostic> {
        let document = Document::parse("Test.cs", source).unwrap();
        let model = document.semantic_model();
        document
            .root()
            .descendants()
            .flat_map(|node| detect_forwarding(&node, &model))
            .collect()
    }

    #[test]
    fn reports_each_method_and_member() {
        let diagnostics = detect(
            r#"
using System.Collections.Generic;
interface IRunner { void Run(); bool Check(); }
class Composite : IRunner
{
    private List<IRunner> _items;
    private IRunner[] _others;
    public void Run() { }
    public bool Check() { throw new System.NotImplementedException(); }
}
"#,
        );
        let rendered: Vec<(String, String)> = diagnostics
            .iter()
            .map(|d| (d.message_args[0].clone(), d.forwarding_member().unwrap().to_string()))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("Run".to_string(), "_items".to_string()),
                ("Run".to_string(), "_others".to_string()),
                ("Check".to_string(), "_items".to_string()),
                ("Check".to_string(), "_others".to_string()),
            ]
        );
        assert!(diagnostics.iter().all(|d| d.rule_id == "ACA0001"));
    }

    #[test]
    fn implemented_methods_are_not_reported() {
        let diagnostics = detect(
            r#"
using System.Collections.Generic;
interface IRunner { void Run(); }
class Composite : IRunner
{
    private List<IRunner> _items;
    public void Run() { System.Console.WriteLine("x"); }
}
"#,
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn unsupported_return_types_are_not_reported() {
        let diagnostics = detect(
            r#"
using System.Collections.Generic;
interface INamed { string Name(); }
class Composite : INamed
{
    private List<INamed> _items;
    public string Name() { throw new System.NotImplementedException(); }
}
"#,
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn collections_of_other_interfaces_are_ignored() {
        let diagnostics = detect(
            r#"
using System.Collections.Generic;
interface IRunner { void Run(); }
interface IOther { }
class Composite : IRunner
{
    private List<IOther> _items;
    public void Run() { }
}
"#,
        );
        assert!(diagnostics.is_empty());
    }
}
