// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Red tree: positioned, parent-aware views over green nodes.
//!
//! A [`SyntaxNode`] is a cheap handle pairing a green node with its absolute
//! offset and its parent. Red nodes are created on demand while navigating
//! and are never mutated. Replacing a node produces a brand new root; the old
//! root and every handle into it remain valid.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use sharpfix_core::patch::Span;

use crate::green::{GreenElement, GreenNode, GreenToken, Trivia};
use crate::kind::SyntaxKind;

struct NodeData {
    green: GreenNode,
    parent: Option<SyntaxNode>,
    index: usize,
    offset: usize,
}

/// A node in a positioned syntax tree.
#[derive(Clone)]
pub struct SyntaxNode(Arc<NodeData>);

impl SyntaxNode {
    /// Wrap a green node as the root of a tree.
    pub fn new_root(green: GreenNode) -> SyntaxNode {
        SyntaxNode(Arc::new(NodeData {
            green,
            parent: None,
            index: 0,
            offset: 0,
        }))
    }

    fn new_child(green: GreenNode, parent: &SyntaxNode, index: usize, offset: usize) -> SyntaxNode {
        SyntaxNode(Arc::new(NodeData {
            green,
            parent: Some(parent.clone()),
            index,
            offset,
        }))
    }

    pub fn green(&self) -> &GreenNode {
        &self.0.green
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.green.kind()
    }

    pub fn parent(&self) -> Option<SyntaxNode> {
        self.0.parent.clone()
    }

    /// Index of this node among its parent's children (tokens included).
    pub fn index(&self) -> usize {
        self.0.index
    }

    /// Range including leading and trailing trivia.
    pub fn full_span(&self) -> Span {
        Span::new(self.0.offset, self.0.offset + self.0.green.full_len())
    }

    /// Range excluding the first token's leading and the last token's
    /// trailing trivia.
    pub fn span(&self) -> Span {
        let full = self.full_span();
        let leading = self.0.green.first_token().map_or(0, GreenToken::leading_len);
        let trailing = self.0.green.last_token().map_or(0, GreenToken::trailing_len);
        if leading + trailing >= full.len() {
            return Span::empty(full.start + leading.min(full.len()));
        }
        Span::new(full.start + leading, full.end - trailing)
    }

    /// Full text including trivia.
    pub fn text(&self) -> String {
        self.0.green.text()
    }

    /// Text without the outer leading and trailing trivia.
    pub fn trimmed_text(&self) -> String {
        let full = self.full_span();
        let span = self.span();
        let text = self.text();
        text[span.start - full.start..span.end - full.start].to_string()
    }

    pub fn root(&self) -> SyntaxNode {
        let mut node = self.clone();
        while let Some(parent) = node.parent() {
            node = parent;
        }
        node
    }

    /// Children, nodes and tokens, in source order.
    pub fn children_with_tokens(&self) -> Vec<SyntaxElement> {
        let mut offset = self.0.offset;
        let mut elements = Vec::with_capacity(self.0.green.children().len());
        for (index, child) in self.0.green.children().iter().enumerate() {
            let element = match child {
                GreenElement::Node(node) => {
                    SyntaxElement::Node(SyntaxNode::new_child(node.clone(), self, index, offset))
                }
                GreenElement::Token(_) => SyntaxElement::Token(SyntaxToken {
                    parent: self.clone(),
                    index,
                    offset,
                }),
            };
            offset += child.full_len();
            elements.push(element);
        }
        elements
    }

    /// Child nodes in source order.
    pub fn children(&self) -> impl Iterator<Item = SyntaxNode> {
        self.children_with_tokens()
            .into_iter()
            .filter_map(SyntaxElement::into_node)
    }

    /// Child tokens in source order.
    pub fn child_tokens(&self) -> impl Iterator<Item = SyntaxToken> {
        self.children_with_tokens()
            .into_iter()
            .filter_map(SyntaxElement::into_token)
    }

    /// First child node of `kind`.
    pub fn child_of_kind(&self, kind: SyntaxKind) -> Option<SyntaxNode> {
        self.children().find(|child| child.kind() == kind)
    }

    /// First child token of `kind`.
    pub fn token_of_kind(&self, kind: SyntaxKind) -> Option<SyntaxToken> {
        self.child_tokens().find(|token| token.kind() == kind)
    }

    /// This node and its ancestors, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode> {
        std::iter::successors(Some(self.clone()), SyntaxNode::parent)
    }

    /// This node and all descendant nodes in pre-order.
    pub fn descendants(&self) -> Descendants {
        Descendants {
            stack: vec![self.clone()],
        }
    }

    /// All tokens under this node in source order.
    pub fn descendant_tokens(&self) -> Vec<SyntaxToken> {
        let mut tokens = Vec::new();
        self.collect_tokens(&mut tokens);
        tokens
    }

    fn collect_tokens(&self, tokens: &mut Vec<SyntaxToken>) {
        for element in self.children_with_tokens() {
            match element {
                SyntaxElement::Node(node) => node.collect_tokens(tokens),
                SyntaxElement::Token(token) => tokens.push(token),
            }
        }
    }

    pub fn first_token(&self) -> Option<SyntaxToken> {
        for element in self.children_with_tokens() {
            match element {
                SyntaxElement::Token(token) => return Some(token),
                SyntaxElement::Node(node) => {
                    if let Some(token) = node.first_token() {
                        return Some(token);
                    }
                }
            }
        }
        None
    }

    pub fn last_token(&self) -> Option<SyntaxToken> {
        for element in self.children_with_tokens().into_iter().rev() {
            match element {
                SyntaxElement::Token(token) => return Some(token),
                SyntaxElement::Node(node) => {
                    if let Some(token) = node.last_token() {
                        return Some(token);
                    }
                }
            }
        }
        None
    }

    /// Descendants carrying an annotation of `kind`.
    pub fn annotated_descendants(&self, kind: &str) -> Vec<SyntaxNode> {
        self.descendants()
            .filter(|node| node.green().has_annotation(kind))
            .collect()
    }

    /// The outermost node whose span exactly covers `target`'s innermost
    /// enclosing node.
    ///
    /// Descends to the deepest node whose span contains `target`, then climbs
    /// while the parent has the same span. Returns `None` when `target` is
    /// outside this node.
    pub fn find_node(&self, target: Span) -> Option<SyntaxNode> {
        if !self.span().contains(&target) {
            return None;
        }
        let mut node = self.clone();
        'descend: loop {
            for child in node.children() {
                if child.span().contains(&target) && !child.span().is_empty() {
                    node = child;
                    continue 'descend;
                }
            }
            break;
        }
        let span = node.span();
        while let Some(parent) = node.parent() {
            if parent.span() != span || node == *self {
                break;
            }
            node = parent;
        }
        Some(node)
    }

    /// The token whose text covers `offset`.
    pub fn token_at_offset(&self, offset: usize) -> Option<SyntaxToken> {
        self.descendant_tokens()
            .into_iter()
            .find(|token| token.span().contains_offset(offset))
    }

    /// Replace this node's green node, returning the new root.
    ///
    /// Only the nodes on the path from this node to the root are rebuilt.
    pub fn replace_with(&self, replacement: GreenNode) -> SyntaxNode {
        let mut green = replacement;
        let mut node = self.clone();
        while let Some(parent) = node.parent() {
            green = parent.green().replace_child(node.index(), green.into());
            node = parent;
        }
        SyntaxNode::new_root(green)
    }
}

impl PartialEq for SyntaxNode {
    fn eq(&self, other: &SyntaxNode) -> bool {
        self.0.green.ptr_eq(&other.0.green) && self.0.offset == other.0.offset
    }
}

impl Eq for SyntaxNode {}

impl Hash for SyntaxNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.offset.hash(state);
        self.0.green.kind().hash(state);
        self.0.green.full_len().hash(state);
    }
}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.kind(), self.full_span())
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants {
    stack: Vec<SyntaxNode>,
}

impl Iterator for Descendants {
    type Item = SyntaxNode;

    fn next(&mut self) -> Option<SyntaxNode> {
        let node = self.stack.pop()?;
        let children: Vec<SyntaxNode> = node.children().collect();
        self.stack.extend(children.into_iter().rev());
        Some(node)
    }
}

// ============================================================================
// Tokens
// ============================================================================

/// A token in a positioned syntax tree.
#[derive(Clone)]
pub struct SyntaxToken {
    parent: SyntaxNode,
    index: usize,
    offset: usize,
}

impl SyntaxToken {
    pub fn green(&self) -> &GreenToken {
        match &self.parent.green().children()[self.index] {
            GreenElement::Token(token) => token,
            GreenElement::Node(_) => unreachable!("token index points at a node"),
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.green().kind()
    }

    pub fn text(&self) -> &str {
        self.green().text()
    }

    pub fn parent(&self) -> SyntaxNode {
        self.parent.clone()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn leading_trivia(&self) -> &[Trivia] {
        self.green().leading_trivia()
    }

    pub fn trailing_trivia(&self) -> &[Trivia] {
        self.green().trailing_trivia()
    }

    /// Range of the token text, trivia excluded.
    pub fn span(&self) -> Span {
        let start = self.offset + self.green().leading_len();
        Span::new(start, start + self.text().len())
    }

    pub fn full_span(&self) -> Span {
        Span::new(self.offset, self.offset + self.green().full_len())
    }

    /// Replace this token, returning the new root.
    pub fn replace_with(&self, replacement: GreenToken) -> SyntaxNode {
        let parent = self.parent.green().replace_child(self.index, replacement.into());
        self.parent.replace_with(parent)
    }
}

impl PartialEq for SyntaxToken {
    fn eq(&self, other: &SyntaxToken) -> bool {
        self.parent == other.parent && self.index == other.index
    }
}

impl Eq for SyntaxToken {}

impl fmt::Debug for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{} {:?}", self.kind(), self.span(), self.text())
    }
}

/// A node or a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxElement {
    Node(SyntaxNode),
    Token(SyntaxToken),
}

impl SyntaxElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            SyntaxElement::Node(node) => node.kind(),
            SyntaxElement::Token(token) => token.kind(),
        }
    }

    pub fn into_node(self) -> Option<SyntaxNode> {
        match self {
            SyntaxElement::Node(node) => Some(node),
            SyntaxElement::Token(_) => None,
        }
    }

    pub fn into_token(self) -> Option<SyntaxToken> {
        match self {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(_) => None,
        }
    }
}

// ============================================================================
// Batched Replacement
// ============================================================================

/// A set of node and token replacements applied to one tree in one pass.
///
/// Replacements are inserted verbatim, trivia included; a caller that wants
/// to keep the replaced node's surrounding whitespace copies it onto the
/// replacement first. When a replaced node contains another replaced node
/// or token, the outer replacement wins.
#[derive(Debug, Default, Clone)]
pub struct TreeEdit {
    nodes: Vec<(SyntaxNode, GreenNode)>,
    tokens: Vec<(SyntaxToken, GreenToken)>,
}

impl TreeEdit {
    pub fn new() -> Self {
        TreeEdit::default()
    }

    pub fn replace_node(&mut self, node: &SyntaxNode, replacement: GreenNode) -> &mut Self {
        self.nodes.push((node.clone(), replacement));
        self
    }

    pub fn replace_token(&mut self, token: &SyntaxToken, replacement: GreenToken) -> &mut Self {
        self.tokens.push((token.clone(), replacement));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.tokens.is_empty()
    }

    /// Apply every replacement under `root`, returning the new root.
    pub fn apply(&self, root: &SyntaxNode) -> SyntaxNode {
        if self.is_empty() {
            return root.clone();
        }
        SyntaxNode::new_root(self.rebuild(root))
    }

    fn touches(&self, span: Span) -> bool {
        self.nodes.iter().any(|(n, _)| span.contains(&n.full_span()))
            || self.tokens.iter().any(|(t, _)| span.contains(&t.full_span()))
    }

    fn rebuild(&self, node: &SyntaxNode) -> GreenNode {
        if let Some((_, replacement)) = self.nodes.iter().find(|(n, _)| n == node) {
            return replacement.clone();
        }
        if !self.touches(node.full_span()) {
            return node.green().clone();
        }
        let children = node
            .children_with_tokens()
            .into_iter()
            .map(|element| match element {
                SyntaxElement::Node(child) => GreenElement::Node(self.rebuild(&child)),
                SyntaxElement::Token(token) => {
                    match self.tokens.iter().find(|(t, _)| *t == token) {
                        Some((_, replacement)) => GreenElement::Token(replacement.clone()),
                        None => GreenElement::Token(token.green().clone()),
                    }
                }
            })
            .collect();
        node.green().with_children(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_compilation_unit, parse_expression};

    const SOURCE: &str = "class C\n{\n    // lead\n    int M() { return a + b; }\n}\n";

    fn root() -> SyntaxNode {
        SyntaxNode::new_root(parse_compilation_unit(SOURCE).unwrap())
    }

    fn first(root: &SyntaxNode, kind: SyntaxKind) -> SyntaxNode {
        root.descendants().find(|n| n.kind() == kind).unwrap()
    }

    fn span_of(text: &str) -> Span {
        let start = SOURCE.find(text).unwrap();
        Span::new(start, start + text.len())
    }

    #[test]
    fn test_span_excludes_outer_trivia() {
        let root = root();
        let method = first(&root, SyntaxKind::MethodDeclaration);
        assert_eq!(method.span(), span_of("int M() { return a + b; }"));
        assert!(method.full_span().contains(&method.span()));
        assert!(method.text().contains("// lead"));
        assert_eq!(method.trimmed_text(), "int M() { return a + b; }");
    }

    #[test]
    fn test_find_node_climbs_to_outermost_same_span() {
        let root = root();
        // `a` is both an IdentifierName and the left operand; the identifier
        // name is the outermost node with exactly that span.
        let left = span_of("a + b");
        let found = root.find_node(Span::new(left.start, left.start + 1)).unwrap();
        assert_eq!(found.kind(), SyntaxKind::IdentifierName);

        let found = root.find_node(span_of("a + b")).unwrap();
        assert_eq!(found.kind(), SyntaxKind::BinaryExpression);

        let found = root.find_node(span_of("return a + b;")).unwrap();
        assert_eq!(found.kind(), SyntaxKind::ReturnStatement);
    }

    #[test]
    fn test_find_node_outside_returns_none() {
        let root = root();
        let method = first(&root, SyntaxKind::MethodDeclaration);
        assert!(method.find_node(span_of("class C")).is_none());
    }

    #[test]
    fn test_ancestors_and_parent_links() {
        let root = root();
        let binary = first(&root, SyntaxKind::BinaryExpression);
        let kinds: Vec<SyntaxKind> = binary.ancestors().map(|n| n.kind()).collect();
        assert_eq!(kinds.first(), Some(&SyntaxKind::BinaryExpression));
        assert!(kinds.contains(&SyntaxKind::MethodDeclaration));
        assert_eq!(kinds.last(), Some(&SyntaxKind::CompilationUnit));
        assert_eq!(binary.root(), root);
    }

    #[test]
    fn test_token_at_offset() {
        let root = root();
        let token = root.token_at_offset(span_of("return").start + 2).unwrap();
        assert_eq!(token.kind(), SyntaxKind::ReturnKeyword);
        assert_eq!(token.span(), span_of("return"));
        // Offsets inside trivia have no token.
        assert!(root.token_at_offset(span_of("// lead").start + 3).is_none());
    }

    #[test]
    fn test_replace_with_keeps_old_tree() {
        let root = root();
        let binary = first(&root, SyntaxKind::BinaryExpression);
        let replacement = parse_expression("a * b").unwrap();
        let new_root = binary.replace_with(replacement);
        assert_eq!(root.text(), SOURCE);
        assert_eq!(new_root.text(), SOURCE.replace("a + b", "a * b"));
        // The class keyword token is shared between versions.
        let old_class = root.first_token().unwrap();
        let new_class = new_root.first_token().unwrap();
        assert!(old_class.green().ptr_eq(new_class.green()));
    }

    #[test]
    fn test_token_replace_with() {
        let root = root();
        let identifier = first(&root, SyntaxKind::MethodDeclaration)
            .token_of_kind(SyntaxKind::Identifier)
            .unwrap();
        let renamed = identifier.green().with_kind(SyntaxKind::Identifier);
        let new_root = identifier.replace_with(renamed);
        assert_eq!(new_root.text(), SOURCE);
    }

    #[test]
    fn test_identity_equality() {
        let a = root();
        let b = root();
        assert_eq!(a.clone(), a);
        assert_ne!(a, b);
        let first_method = first(&a, SyntaxKind::MethodDeclaration);
        let again = first(&a, SyntaxKind::MethodDeclaration);
        assert_eq!(first_method, again);
    }

    #[test]
    fn test_tree_edit_outer_replacement_wins() {
        let root = root();
        let statement = first(&root, SyntaxKind::ReturnStatement);
        let binary = first(&root, SyntaxKind::BinaryExpression);
        let replacement = crate::parser::parse_statement("return 1;")
            .unwrap()
            .with_leading_trivia(statement.green().leading_trivia().to_vec())
            .with_trailing_trivia(statement.green().trailing_trivia().to_vec());
        let mut edit = TreeEdit::new();
        edit.replace_node(&binary, parse_expression("0").unwrap());
        edit.replace_node(&statement, replacement);
        let new_root = edit.apply(&root);
        assert_eq!(
            new_root.text(),
            SOURCE.replace("return a + b;", "return 1;")
        );
    }

    #[test]
    fn test_tree_edit_inserts_replacement_trivia_verbatim() {
        let root = root();
        let statement = first(&root, SyntaxKind::ReturnStatement);
        let mut edit = TreeEdit::new();
        edit.replace_node(
            &statement,
            crate::parser::parse_statement("return 1;").unwrap(),
        );
        let new_root = edit.apply(&root);
        assert_eq!(
            new_root.text(),
            SOURCE.replace("return a + b; ", "return 1;")
        );
    }

    #[test]
    fn test_tree_edit_token_and_node() {
        let root = root();
        let binary = first(&root, SyntaxKind::BinaryExpression);
        let class_keyword = root.first_token().unwrap();
        let mut edit = TreeEdit::new();
        edit.replace_node(&binary, parse_expression("b").unwrap());
        edit.replace_token(
            &class_keyword,
            class_keyword.green().with_kind(SyntaxKind::ClassKeyword),
        );
        let new_root = edit.apply(&root);
        assert_eq!(new_root.text(), SOURCE.replace("a + b", "b"));
        assert!(TreeEdit::new().is_empty());
    }
}
