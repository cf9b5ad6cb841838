//! ACA0001: forward interface calls to collection children.

use sharpfix_core::diagnostic::{Diagnostic, RuleDescriptor};
use sharpfix_cst::{SyntaxKind, SyntaxNode};

use super::{FixProvider, Rule, RuleContext};
use crate::descriptors::ACA0001;
use crate::detectors::detect_forwarding;
use crate::document::Document;
use crate::rewrite::forwarding::forward_to_member;
use crate::rewrite::method_at;

pub struct ForwardingRule;

impl Rule for ForwardingRule {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &ACA0001
    }

    fn node_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::ClassDeclaration]
    }

    fn analyze(&self, node: &SyntaxNode, context: &RuleContext<'_>) -> Vec<Diagnostic> {
        detect_forwarding(node, context.model)
    }
}

/// Replaces the reported method's body with a forwarding body.
pub struct ForwardToCollectionChildren;

impl FixProvider for ForwardToCollectionChildren {
    fn rule_id(&self) -> &'static str {
        ACA0001.id
    }

    fn fix_name(&self) -> &'static str {
        "FixByForwardingToCollectionChildren"
    }

    fn fix_root(&self, document: &Document, diagnostic: &Diagnostic) -> Option<SyntaxNode> {
        let member = diagnostic.forwarding_member()?;
        let model = document.semantic_model();
        let method = method_at(model.root(), diagnostic.span)?;
        forward_to_member(&model, &method, member)
    }

    fn discriminator(&self, diagnostic: &Diagnostic) -> String {
        diagnostic
            .forwarding_member()
            .map(str::to_string)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharpfix_core::diagnostic::DiagnosticPayload;
    use sharpfix_core::patch::Span;

    #[test]
    fn equivalence_key_names_the_member() {
        let diagnostic = Diagnostic::new(&ACA0001, Span::new(0, 1), vec![]).with_payload(
            DiagnosticPayload::Forwarding {
                member_name: "_items".to_string(),
            },
        );
        assert_eq!(
            ForwardToCollectionChildren.equivalence_key(&diagnostic),
            "ACA0001-FixByForwardingToCollectionChildren_items"
        );
    }

    #[test]
    fn missing_payload_leaves_document_unchanged() {
        let document = Document::parse(
            "A.cs",
            "interface I { void M(); }\nclass A : I\n{\n    public void M() { }\n}\n",
        )
        .unwrap();
        let start = document.text().find("M() { }").unwrap();
        let diagnostic = Diagnostic::new(&ACA0001, Span::new(start, start + 1), vec![]);
        let fixed = ForwardToCollectionChildren.fixed_document(&document, &diagnostic);
        assert!(fixed.is_equivalent_to(&document));
    }
}
