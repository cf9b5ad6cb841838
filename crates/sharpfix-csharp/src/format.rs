//! Whitespace clean-up for rewritten regions.
//!
//! Rewrites mark the nodes they touch with the `Formatter` annotation and
//! leave elastic markers where trivia was removed. [`format_annotated`]
//! visits those nodes only and:
//!
//! - drops elastic markers
//! - drops whitespace left dangling before a line break
//! - drops a line that held nothing but removed trivia
//! - collapses the double space left by a removed mid-line comment
//!
//! Text outside annotated nodes is never touched.

use sharpfix_cst::{
    rewrite, GreenElement, GreenNode, GreenToken, Rewriter, SyntaxAnnotation, SyntaxNode, Trivia,
    TriviaKind,
};

/// Clean up every `Formatter`-annotated node under `root`.
pub fn format_annotated(root: &SyntaxNode) -> SyntaxNode {
    if root.annotated_descendants(SyntaxAnnotation::FORMATTER).is_empty() {
        return root.clone();
    }
    rewrite(&mut AnnotatedFormatter, root)
}

struct AnnotatedFormatter;

impl Rewriter for AnnotatedFormatter {
    fn rewrite_node(&mut self, node: &SyntaxNode) -> Option<GreenNode> {
        if !node.green().has_annotation(SyntaxAnnotation::FORMATTER) {
            return None;
        }
        let mut state = LineState::new(starts_line(node));
        Some(format_green(node.green(), &mut state))
    }
}

/// True when nothing but whitespace precedes `node` on its line.
fn starts_line(node: &SyntaxNode) -> bool {
    let start = node.full_span().start;
    let text = node.root().text();
    text[..start.min(text.len())]
        .chars()
        .rev()
        .find(|c| *c != ' ' && *c != '\t')
        .is_none_or(|c| c == '\n')
}

// ----------------------------------------------------------------------------
// Line state
// ----------------------------------------------------------------------------

/// What the formatter has seen on the current output line.
struct LineState {
    /// Only whitespace has been emitted since the last line break.
    blank: bool,
    /// Trivia was removed from this line.
    removed: bool,
    /// The previous input piece was an elastic marker.
    after_marker: bool,
}

impl LineState {
    fn new(at_line_start: bool) -> Self {
        LineState {
            blank: at_line_start,
            removed: false,
            after_marker: false,
        }
    }

    fn new_line(&mut self) {
        self.blank = true;
        self.removed = false;
        self.after_marker = false;
    }
}

fn format_green(node: &GreenNode, state: &mut LineState) -> GreenNode {
    let children = node
        .children()
        .iter()
        .map(|child| match child {
            GreenElement::Node(inner) => GreenElement::Node(format_green(inner, state)),
            GreenElement::Token(token) => GreenElement::Token(format_token(token, state)),
        })
        .collect();
    node.with_children(children)
}

fn format_token(token: &GreenToken, state: &mut LineState) -> GreenToken {
    let leading = format_trivia(token.leading_trivia(), state);
    if !token.text().is_empty() {
        state.blank = false;
        state.after_marker = false;
    }
    let trailing = format_trivia(token.trailing_trivia(), state);
    token
        .with_leading_trivia(leading)
        .with_trailing_trivia(trailing)
}

fn format_trivia(trivia: &[Trivia], state: &mut LineState) -> Vec<Trivia> {
    let mut out: Vec<Trivia> = Vec::with_capacity(trivia.len());
    for piece in trivia {
        match piece.kind() {
            TriviaKind::ElasticMarker => {
                state.removed = true;
                state.after_marker = true;
            }
            TriviaKind::Whitespace => {
                let doubled = state.after_marker
                    && out.last().is_some_and(|t| t.kind() == TriviaKind::Whitespace);
                if !doubled {
                    out.push(piece.clone());
                }
                state.after_marker = false;
            }
            TriviaKind::EndOfLine => {
                while out.last().is_some_and(|t| t.kind() == TriviaKind::Whitespace) {
                    out.pop();
                }
                if !(state.blank && state.removed) {
                    out.push(piece.clone());
                }
                state.new_line();
            }
            _ => {
                out.push(piece.clone());
                state.blank = false;
                state.after_marker = false;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharpfix_cst::nodes::{AstNode, MethodDeclaration};
    use sharpfix_cst::TriviaRewriter;

    /// Replace comments in the first method with markers, annotate it and format.
    fn strip_method_comments(source: &str) -> String {
        let tree = sharpfix_cst::parse(source).unwrap();
        let method = tree
            .root()
            .descendants()
            .find_map(MethodDeclaration::cast)
            .unwrap();
        let mut stripper = TriviaRewriter::new(|t: &Trivia| {
            t.kind().is_comment().then(Trivia::elastic_marker)
        });
        let stripped = rewrite(&mut stripper, method.syntax());
        let method = stripped
            .descendants()
            .find(|n| n.kind() == method.syntax().kind())
            .unwrap();
        let annotated = method.replace_with(method.green().with_annotation(SyntaxAnnotation::formatter()));
        format_annotated(&annotated).text()
    }

    #[test]
    fn comment_only_lines_are_removed() {
        let source = "class C\n{\n    void M()\n    {\n        // first\n        Run(); // trailing\n        // last\n    }\n}\n";
        assert_eq!(
            strip_method_comments(source),
            "class C\n{\n    void M()\n    {\n        Run();\n    }\n}\n"
        );
    }

    #[test]
    fn mid_line_comment_leaves_single_space() {
        let source = "class C\n{\n    void M(int /* a */ b)\n    {\n    }\n}\n";
        assert_eq!(
            strip_method_comments(source),
            "class C\n{\n    void M(int b)\n    {\n    }\n}\n"
        );
    }

    #[test]
    fn unannotated_trees_are_returned_as_is() {
        let tree = sharpfix_cst::parse("class C { }  \n").unwrap();
        let formatted = format_annotated(tree.root());
        assert_eq!(formatted.text(), "class C { }  \n");
    }

    #[test]
    fn documentation_comments_survive() {
        let source = "class C\n{\n    /// <summary>Doc</summary>\n    void M()\n    {\n        // note\n    }\n}\n";
        assert_eq!(
            strip_method_comments(source),
            "class C\n{\n    /// <summary>Doc</summary>\n    void M()\n    {\n    }\n}\n"
        );
    }
}
