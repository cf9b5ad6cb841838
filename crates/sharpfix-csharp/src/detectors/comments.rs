//! Leftover comments in namespaces, classes, methods and array initializers.

use sharpfix_core::diagnostic::{Diagnostic, RuleDescriptor};
use sharpfix_core::patch::Span;
use sharpfix_cst::nodes::{
    AstNode, ArrayCreationExpression, ImplicitArrayCreationExpression, MethodDeclaration,
    NamespaceDeclaration, TypeDeclaration,
};
use sharpfix_cst::{SyntaxKind, SyntaxNode};

use crate::descriptors::{ACA0002, ACA0003, ACA0004, ACA0005};

/// The syntactic position a comment rule watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentTarget {
    Namespace,
    Class,
    Method,
    Array,
}

impl CommentTarget {
    pub const ALL: [CommentTarget; 4] = [
        CommentTarget::Class,
        CommentTarget::Method,
        CommentTarget::Array,
        CommentTarget::Namespace,
    ];

    pub fn descriptor(self) -> &'static RuleDescriptor {
        match self {
            CommentTarget::Class => &ACA0002,
            CommentTarget::Method => &ACA0003,
            CommentTarget::Array => &ACA0004,
            CommentTarget::Namespace => &ACA0005,
        }
    }

    pub fn node_kinds(self) -> &'static [SyntaxKind] {
        match self {
            CommentTarget::Namespace => &[
                SyntaxKind::NamespaceDeclaration,
                SyntaxKind::FileScopedNamespaceDeclaration,
            ],
            CommentTarget::Class => &[SyntaxKind::ClassDeclaration],
            CommentTarget::Method => &[SyntaxKind::MethodDeclaration],
            CommentTarget::Array => &[
                SyntaxKind::ArrayCreationExpression,
                SyntaxKind::ImplicitArrayCreationExpression,
            ],
        }
    }

    /// The node whose comments are checked and removed.
    ///
    /// For arrays this is the initializer, so comments around the array's
    /// type do not count.
    pub fn region(self, node: &SyntaxNode) -> Option<SyntaxNode> {
        if !self.node_kinds().contains(&node.kind()) {
            return None;
        }
        match self {
            CommentTarget::Array => ArrayCreationExpression::cast(node.clone())
                .and_then(|a| a.initializer())
                .or_else(|| {
                    ImplicitArrayCreationExpression::cast(node.clone()).and_then(|a| a.initializer())
                })
                .map(|i| i.syntax().clone()),
            _ => Some(node.clone()),
        }
    }

    /// Where the diagnostic is reported, and the name it mentions.
    pub(crate) fn anchor(self, node: &SyntaxNode) -> Option<(Span, String)> {
        match self {
            CommentTarget::Namespace => {
                let name = NamespaceDeclaration::cast(node.clone())?.name()?;
                Some((name.span(), name.trimmed_text()))
            }
            CommentTarget::Class => {
                let class = TypeDeclaration::cast(node.clone())?;
                Some((class.identifier()?.span(), class.name()))
            }
            CommentTarget::Method => {
                let method = MethodDeclaration::cast(node.clone())?;
                Some((method.identifier()?.span(), method.name()))
            }
            CommentTarget::Array => {
                let new_keyword = ArrayCreationExpression::cast(node.clone())
                    .and_then(|a| a.new_keyword())
                    .or_else(|| {
                        ImplicitArrayCreationExpression::cast(node.clone())
                            .and_then(|a| a.new_keyword())
                    })?;
                Some((new_keyword.span(), String::new()))
            }
        }
    }
}

/// True when any token under `node` carries a line or block comment.
/// Documentation comments do not count.
pub fn has_comment_trivia(node: &SyntaxNode) -> bool {
    node.descendant_tokens().iter().any(|token| {
        token
            .leading_trivia()
            .iter()
            .chain(token.trailing_trivia())
            .any(|t| t.kind().is_comment())
    })
}

/// The comment diagnostic for `node`, when it is a `target` holding comments.
pub fn detect_comments(target: CommentTarget, node: &SyntaxNode) -> Vec<Diagnostic> {
    let Some(region) = target.region(node) else {
        return Vec::new();
    };
    if !has_comment_trivia(&region) {
        return Vec::new();
    }
    match target.anchor(node) {
        Some((span, name)) => vec![Diagnostic::new(target.descriptor(), span, vec![name])],
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharpfix_core::text::span_text;

    const SOURCE: &str = r#"namespace ConsoleApplication1
{
    class TypeName
    {
        private void TestMethod(int arg)
        {
            // some comment
            var values = new[] { 1, /* two */ 2 };
            var plain = new int[] { 3 };
        }

        /// <summary>Documented only.</summary>
        private void Documented() { }
    }
}
"#;

    fn detect_all(source: &str) -> Vec<(String, String)> {
        let tree = sharpfix_cst::parse(source).unwrap();
        let mut found = Vec::new();
        for node in tree.root().descendants() {
            for target in CommentTarget::ALL {
                for diagnostic in detect_comments(target, &node) {
                    found.push((
                        diagnostic.rule_id.clone(),
                        span_text(source, diagnostic.span).to_string(),
                    ));
                }
            }
        }
        found
    }

    #[test]
    fn every_enclosing_target_reports() {
        let found = detect_all(SOURCE);
        assert_eq!(
            found,
            vec![
                ("ACA0005".to_string(), "ConsoleApplication1".to_string()),
                ("ACA0002".to_string(), "TypeName".to_string()),
                ("ACA0003".to_string(), "TestMethod".to_string()),
                ("ACA0004".to_string(), "new".to_string()),
            ]
        );
    }

    #[test]
    fn documentation_comments_are_not_comments() {
        let found = detect_all("class C\n{\n    /// <summary>x</summary>\n    void M() { }\n}\n");
        assert!(found.is_empty());
    }

    #[test]
    fn namespace_diagnostic_carries_name() {
        let tree = sharpfix_cst::parse("namespace A.B\n{\n    // note\n}\n").unwrap();
        let namespace = tree
            .root()
            .descendants()
            .find(|n| n.kind() == SyntaxKind::NamespaceDeclaration)
            .unwrap();
        let diagnostics = detect_comments(CommentTarget::Namespace, &namespace);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message_args, vec!["A.B".to_string()]);
    }
}
