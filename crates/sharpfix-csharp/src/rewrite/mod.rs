//! Tree rewrite primitives.
//!
//! Every primitive takes the current root and returns the root of a new
//! tree, or `None` when its anchor is gone or the code has a shape it does
//! not handle. Inputs are never modified; unchanged subtrees are shared.
//!
//! - [`trivia`]: comment removal for the comment rules
//! - [`forwarding`]: bodies that forward a call to every collection element
//! - [`branch_exit`]: `throw` injection into `if` branches without an exit
//! - [`signature`]: method signatures matched to a delegate
//! - [`static_import`]: `using static` plus unqualified access
//! - [`task_result`]: `async` removal and `Task.FromResult` unwrapping
//! - [`usings`]: using directive insertion

pub mod branch_exit;
pub mod forwarding;
pub mod signature;
pub mod static_import;
pub mod task_result;
pub mod trivia;
pub mod usings;

use sharpfix_core::patch::Span;
use sharpfix_core::text::{detect_indent_unit, detect_newline};
use sharpfix_cst::make;
use sharpfix_cst::nodes::{ancestor, AstNode, Block, MethodDeclaration};
use sharpfix_cst::{GreenElement, GreenNode, SyntaxKind, SyntaxNode, Trivia, TriviaKind};

// ============================================================================
// Layout
// ============================================================================

/// Indentation unit and line break of a document, so inserted code looks
/// like the code around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub unit: String,
    pub newline: String,
}

impl Layout {
    pub fn of(root: &SyntaxNode) -> Self {
        let text = root.text();
        Layout {
            unit: detect_indent_unit(&text),
            newline: detect_newline(&text).to_string(),
        }
    }
}

// ============================================================================
// Anchors
// ============================================================================

/// The method whose identifier sits exactly at `span`.
pub fn method_at(root: &SyntaxNode, span: Span) -> Option<MethodDeclaration> {
    let token = root.token_at_offset(span.start)?;
    let method = ancestor::<MethodDeclaration>(&token.parent())?;
    (method.identifier()?.span() == span).then_some(method)
}

/// The innermost node of `kind` covering exactly `span`.
pub fn node_at(root: &SyntaxNode, span: Span, kind: SyntaxKind) -> Option<SyntaxNode> {
    root.find_node(span)?
        .descendants()
        .filter(|n| n.kind() == kind && n.span() == span)
        .last()
}

/// The node at the same position and of the same kind in a rewritten tree.
///
/// Only valid when every edit between the two trees lies after `node`'s
/// start.
pub fn relocate(node: &SyntaxNode, new_root: &SyntaxNode) -> Option<SyntaxNode> {
    let start = node.full_span().start;
    new_root
        .descendants()
        .find(|n| n.kind() == node.kind() && n.full_span().start == start)
}

// ============================================================================
// Green helpers
// ============================================================================

/// `replacement` carrying the leading and trailing trivia of `original`.
pub fn with_trivia_of(original: &SyntaxNode, replacement: GreenNode) -> GreenNode {
    replacement
        .with_leading_trivia(original.green().leading_trivia().to_vec())
        .with_trailing_trivia(original.green().trailing_trivia().to_vec())
}

/// Indentation of the line holding `node`, taken from the nearest enclosing
/// node that starts a line.
pub fn line_indent(node: &SyntaxNode) -> String {
    node.ancestors()
        .map(|n| make::indentation_of(&n))
        .find(|indent| !indent.is_empty())
        .unwrap_or_default()
}

/// `block` with `statement` added after its last statement.
///
/// A block written on one line stays on one line. Otherwise the statement
/// gets its own line, and comments in front of the closing brace stay in
/// front of it.
pub fn append_statement(block: &Block, statement: &str, layout: &Layout) -> Option<GreenNode> {
    let close = block.close_brace()?;
    let previous = block
        .statements()
        .last()
        .and_then(|s| s.last_token())
        .or_else(|| block.open_brace())?;
    let green = block.syntax().green();
    let close_index = green.children().len().checked_sub(1)?;

    let close_leading = close.leading_trivia();
    let head_end = close_leading
        .iter()
        .rposition(|t| t.kind() == TriviaKind::EndOfLine)
        .map_or(0, |index| index + 1);
    let on_new_line = head_end > 0
        || previous
            .trailing_trivia()
            .iter()
            .any(|t| t.kind() == TriviaKind::EndOfLine);

    if !on_new_line {
        let separator = previous.trailing_trivia().to_vec();
        let leading = if separator.is_empty() {
            vec![Trivia::whitespace(" ")]
        } else {
            Vec::new()
        };
        let new_statement = make::statement(statement)
            .ok()?
            .with_leading_trivia(leading)
            .with_trailing_trivia(separator);
        return Some(green.insert_children(close_index, vec![GreenElement::Node(new_statement)]));
    }

    let indent = line_indent(block.syntax());
    let mut leading = close_leading[..head_end].to_vec();
    leading.push(Trivia::whitespace(format!("{indent}{}", layout.unit)));
    let new_statement = make::statement(statement)
        .ok()?
        .with_leading_trivia(leading)
        .with_trailing_trivia(vec![Trivia::end_of_line(layout.newline.clone())]);
    let close_green = close
        .green()
        .with_leading_trivia(vec![Trivia::whitespace(indent)]);
    let rebuilt = green
        .insert_children(close_index, vec![GreenElement::Node(new_statement)])
        .replace_child(close_index + 1, GreenElement::Token(close_green));
    Some(rebuilt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> SyntaxNode {
        sharpfix_cst::parse(source).unwrap().root().clone()
    }

    #[test]
    fn layout_detects_unit_and_newline() {
        let root = parse("class C\r\n{\r\n  void M() { }\r\n}\r\n");
        let layout = Layout::of(&root);
        assert_eq!(layout.unit, "  ");
        assert_eq!(layout.newline, "\r\n");
    }

    #[test]
    fn method_at_requires_exact_identifier() {
        let source = "class C\n{\n    void Run() { }\n}\n";
        let root = parse(source);
        let start = source.find("Run").unwrap();
        assert!(method_at(&root, Span::new(start, start + 3)).is_some());
        assert!(method_at(&root, Span::new(start, start + 2)).is_none());
    }

    #[test]
    fn append_statement_after_last() {
        let source = "class C\n{\n    void M()\n    {\n        A();\n    }\n}\n";
        let root = parse(source);
        let block = root.descendants().find_map(Block::cast).unwrap();
        let green = append_statement(&block, "B();", &Layout::of(&root)).unwrap();
        let new_root = block.syntax().replace_with(green);
        assert_eq!(
            new_root.text(),
            "class C\n{\n    void M()\n    {\n        A();\n        B();\n    }\n}\n"
        );
    }

    #[test]
    fn append_statement_keeps_one_line_blocks_on_one_line() {
        for (source, expected) in [
            ("class C { void M() { A(); } }", "class C { void M() { A(); B(); } }"),
            ("class C { void M() {A();} }", "class C { void M() {A(); B();} }"),
            ("class C { void M() { } }", "class C { void M() { B(); } }"),
        ] {
            let root = parse(source);
            let block = root.descendants().find_map(Block::cast).unwrap();
            let green = append_statement(&block, "B();", &Layout::of(&root)).unwrap();
            assert_eq!(block.syntax().replace_with(green).text(), expected);
        }
    }

    #[test]
    fn node_at_finds_exact_span() {
        let source = "class C { int M() { return F(1); } }";
        let root = parse(source);
        let start = source.find("F(1)").unwrap();
        let found = node_at(&root, Span::new(start, start + 4), SyntaxKind::InvocationExpression);
        assert_eq!(found.unwrap().text(), "F(1)");
    }
}
