//! Comment removal.
//!
//! Comments become elastic markers and the region is annotated for the
//! formatter, which then drops the lines the comments leave empty.

use sharpfix_cst::{rewrite, SyntaxAnnotation, SyntaxNode, Trivia, TriviaRewriter};

/// Replace every line and block comment under `region` with an elastic
/// marker and mark `region` for formatting. Returns the new root.
pub fn strip_comments(region: &SyntaxNode) -> SyntaxNode {
    let detached = SyntaxNode::new_root(region.green().clone());
    let mut stripper = TriviaRewriter::new(|t: &Trivia| t.kind().is_comment().then(Trivia::elastic_marker));
    let stripped = rewrite(&mut stripper, &detached);
    region.replace_with(
        stripped
            .green()
            .with_annotation(SyntaxAnnotation::formatter()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_annotated;
    use sharpfix_cst::SyntaxKind;

    fn strip_first(source: &str, kind: SyntaxKind) -> String {
        let tree = sharpfix_cst::parse(source).unwrap();
        let region = tree
            .root()
            .descendants()
            .find(|n| n.kind() == kind)
            .unwrap();
        format_annotated(&strip_comments(&region)).text()
    }

    #[test]
    fn method_comments_are_removed() {
        let source = "class C\n{\n    void M()\n    {\n        // one\n        A(); // two\n        /* three */ B();\n    }\n}\n";
        assert_eq!(
            strip_first(source, SyntaxKind::MethodDeclaration),
            "class C\n{\n    void M()\n    {\n        A();\n        B();\n    }\n}\n"
        );
    }

    #[test]
    fn comments_outside_region_are_kept() {
        let source = "class C\n{\n    // keep\n    int[] a = new[] { 1, /* drop */ 2 };\n}\n";
        assert_eq!(
            strip_first(source, SyntaxKind::InitializerExpression),
            "class C\n{\n    // keep\n    int[] a = new[] { 1, 2 };\n}\n"
        );
    }

    #[test]
    fn documentation_comments_survive() {
        let source = "class C\n{\n    /// <summary>Doc.</summary>\n    // note\n    void M() { }\n}\n";
        assert_eq!(
            strip_first(source, SyntaxKind::ClassDeclaration),
            "class C\n{\n    /// <summary>Doc.</summary>\n    void M() { }\n}\n"
        );
    }
}
