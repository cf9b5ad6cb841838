//! ACA0002 to ACA0005: comments in classes, methods, arrays and namespaces.

use sharpfix_core::diagnostic::{Diagnostic, RuleDescriptor};
use sharpfix_cst::{SyntaxKind, SyntaxNode};

use super::{FixProvider, Rule, RuleContext};
use crate::detectors::{detect_comments, CommentTarget};
use crate::document::Document;
use crate::rewrite::trivia::strip_comments;

/// One comment rule per target.
pub struct CommentRule {
    target: CommentTarget,
}

impl CommentRule {
    pub fn new(target: CommentTarget) -> Self {
        CommentRule { target }
    }
}

impl Rule for CommentRule {
    fn descriptor(&self) -> &'static RuleDescriptor {
        self.target.descriptor()
    }

    fn node_kinds(&self) -> &'static [SyntaxKind] {
        self.target.node_kinds()
    }

    fn analyze(&self, node: &SyntaxNode, _context: &RuleContext<'_>) -> Vec<Diagnostic> {
        detect_comments(self.target, node)
    }
}

/// Strips the comments of the reported node.
pub struct RemoveComments {
    target: CommentTarget,
}

impl RemoveComments {
    pub fn new(target: CommentTarget) -> Self {
        RemoveComments { target }
    }

    /// The node of this target whose anchor is exactly `diagnostic`'s span.
    fn reported_node(&self, root: &SyntaxNode, diagnostic: &Diagnostic) -> Option<SyntaxNode> {
        let token = root.token_at_offset(diagnostic.span.start)?;
        token.parent().ancestors().find(|node| {
            self.target.node_kinds().contains(&node.kind())
                && self
                    .target
                    .anchor(node)
                    .is_some_and(|(span, _)| span == diagnostic.span)
        })
    }
}

impl FixProvider for RemoveComments {
    fn rule_id(&self) -> &'static str {
        self.target.descriptor().id
    }

    fn fix_name(&self) -> &'static str {
        match self.target {
            CommentTarget::Namespace => "FixByRemovingNamespaceComments",
            CommentTarget::Class => "FixByRemovingClassComments",
            CommentTarget::Method => "FixByRemovingMethodComments",
            CommentTarget::Array => "FixByRemovingArrayInitializerComments",
        }
    }

    fn fix_root(&self, document: &Document, diagnostic: &Diagnostic) -> Option<SyntaxNode> {
        let node = self.reported_node(document.root(), diagnostic)?;
        let region = self.target.region(&node)?;
        Some(strip_comments(&region))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;

    fn fix(target: CommentTarget, source: &str) -> String {
        let document = Document::parse("Test.cs", source).unwrap();
        let model = document.semantic_model();
        let config = AnalysisConfig::default();
        let context = RuleContext {
            model: &model,
            config: &config,
        };
        let rule = CommentRule::new(target);
        let diagnostic = document
            .root()
            .descendants()
            .filter(|n| rule.node_kinds().contains(&n.kind()))
            .flat_map(|n| rule.analyze(&n, &context))
            .next()
            .unwrap();
        RemoveComments::new(target)
            .fixed_document(&document, &diagnostic)
            .text()
    }

    #[test]
    fn class_fix_keeps_comments_outside_the_class() {
        let source = "class C\n{\n    // one\n    int x; // two\n}\n// footer\n";
        assert_eq!(
            fix(CommentTarget::Class, source),
            "class C\n{\n    int x;\n}\n// footer\n"
        );
    }

    #[test]
    fn array_fix_touches_only_the_initializer() {
        let source = "class C\n{\n    void M()\n    {\n        // keep\n        var a = new int[] { 1, // one\n            2 };\n    }\n}\n";
        assert_eq!(
            fix(CommentTarget::Array, source),
            "class C\n{\n    void M()\n    {\n        // keep\n        var a = new int[] { 1,\n            2 };\n    }\n}\n"
        );
    }

    #[test]
    fn lost_anchor_is_a_no_op() {
        let document = Document::parse("Test.cs", "class C { }\n").unwrap();
        let diagnostic = Diagnostic::new(
            CommentTarget::Method.descriptor(),
            sharpfix_core::patch::Span::new(6, 7),
            vec![],
        );
        let fixed = RemoveComments::new(CommentTarget::Method).fixed_document(&document, &diagnostic);
        assert!(fixed.is_equivalent_to(&document));
    }
}
