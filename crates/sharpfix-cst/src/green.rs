// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Green tree: immutable, position-independent syntax storage.
//!
//! Green nodes know their kind, children and total width, but not their
//! parent or absolute offset. They are shared through `Arc`, so a rewrite
//! that replaces one subtree allocates only the nodes on the path from that
//! subtree to the root; every other node is reused by reference.
//!
//! Tokens own their trivia. By convention the trailing trivia of a token runs
//! up to and including the first end-of-line; everything after that belongs to
//! the next token's leading trivia.

use std::fmt;
use std::sync::Arc;

use crate::kind::SyntaxKind;

// ============================================================================
// Trivia
// ============================================================================

/// Kinds of non-semantic text attached to tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriviaKind {
    Whitespace,
    EndOfLine,
    /// `// ...` up to (not including) the line break.
    SingleLineComment,
    /// `/* ... */`, possibly spanning lines.
    MultiLineComment,
    /// `/// ...` documentation line.
    DocumentationComment,
    /// `#region`, `#if` and other preprocessor lines.
    Directive,
    /// Zero-width placeholder left where trivia was removed.
    ElasticMarker,
}

impl TriviaKind {
    /// Line and block comments. Documentation comments are not included.
    pub fn is_comment(self) -> bool {
        matches!(
            self,
            TriviaKind::SingleLineComment | TriviaKind::MultiLineComment
        )
    }
}

/// A single piece of trivia.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Trivia {
    kind: TriviaKind,
    text: String,
}

impl Trivia {
    pub fn new(kind: TriviaKind, text: impl Into<String>) -> Self {
        Trivia {
            kind,
            text: text.into(),
        }
    }

    pub fn whitespace(text: impl Into<String>) -> Self {
        Trivia::new(TriviaKind::Whitespace, text)
    }

    pub fn end_of_line(text: impl Into<String>) -> Self {
        Trivia::new(TriviaKind::EndOfLine, text)
    }

    pub fn elastic_marker() -> Self {
        Trivia::new(TriviaKind::ElasticMarker, "")
    }

    pub fn kind(&self) -> TriviaKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

fn trivia_len(trivia: &[Trivia]) -> usize {
    trivia.iter().map(Trivia::len).sum()
}

/// Compare trivia lists, ignoring elastic markers.
fn trivia_equivalent(a: &[Trivia], b: &[Trivia]) -> bool {
    let mut a = a.iter().filter(|t| t.kind != TriviaKind::ElasticMarker);
    let mut b = b.iter().filter(|t| t.kind != TriviaKind::ElasticMarker);
    loop {
        match (a.next(), b.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if x == y => continue,
            _ => return false,
        }
    }
}

// ============================================================================
// Annotations
// ============================================================================

/// A marker attached to a green node.
///
/// Annotations survive rewrites of other parts of the tree and are ignored by
/// structural equivalence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyntaxAnnotation {
    kind: String,
    data: Option<String>,
}

impl SyntaxAnnotation {
    /// Node needs whitespace re-flow by the formatter.
    pub const FORMATTER: &'static str = "Formatter";
    /// Node was synthesized with placeholder whitespace.
    pub const ELASTIC: &'static str = "Elastic";
    /// Member name used in a fix title.
    pub const MEMBER: &'static str = "MemberAnnotation";
    /// Type name used in a fix title.
    pub const TYPE: &'static str = "TypeAnnotation";

    pub fn new(kind: impl Into<String>, data: Option<String>) -> Self {
        SyntaxAnnotation {
            kind: kind.into(),
            data,
        }
    }

    pub fn formatter() -> Self {
        SyntaxAnnotation::new(Self::FORMATTER, None)
    }

    pub fn elastic() -> Self {
        SyntaxAnnotation::new(Self::ELASTIC, None)
    }

    pub fn member(name: impl Into<String>) -> Self {
        SyntaxAnnotation::new(Self::MEMBER, Some(name.into()))
    }

    pub fn type_name(name: impl Into<String>) -> Self {
        SyntaxAnnotation::new(Self::TYPE, Some(name.into()))
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

// ============================================================================
// Green Token
// ============================================================================

#[derive(Debug)]
struct GreenTokenData {
    kind: SyntaxKind,
    text: String,
    leading: Vec<Trivia>,
    trailing: Vec<Trivia>,
}

/// An immutable token with its trivia.
#[derive(Debug, Clone)]
pub struct GreenToken(Arc<GreenTokenData>);

impl GreenToken {
    pub fn new(kind: SyntaxKind, text: impl Into<String>) -> Self {
        GreenToken::with_trivia(kind, text, Vec::new(), Vec::new())
    }

    pub fn with_trivia(
        kind: SyntaxKind,
        text: impl Into<String>,
        leading: Vec<Trivia>,
        trailing: Vec<Trivia>,
    ) -> Self {
        GreenToken(Arc::new(GreenTokenData {
            kind,
            text: text.into(),
            leading,
            trailing,
        }))
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    pub fn text(&self) -> &str {
        &self.0.text
    }

    pub fn leading_trivia(&self) -> &[Trivia] {
        &self.0.leading
    }

    pub fn trailing_trivia(&self) -> &[Trivia] {
        &self.0.trailing
    }

    pub fn leading_len(&self) -> usize {
        trivia_len(&self.0.leading)
    }

    pub fn trailing_len(&self) -> usize {
        trivia_len(&self.0.trailing)
    }

    /// Width including trivia.
    pub fn full_len(&self) -> usize {
        self.leading_len() + self.0.text.len() + self.trailing_len()
    }

    /// Same text and trivia under another kind (contextual keywords).
    pub fn with_kind(&self, kind: SyntaxKind) -> GreenToken {
        GreenToken::with_trivia(
            kind,
            self.0.text.clone(),
            self.0.leading.clone(),
            self.0.trailing.clone(),
        )
    }

    pub fn with_leading_trivia(&self, leading: Vec<Trivia>) -> GreenToken {
        GreenToken::with_trivia(
            self.0.kind,
            self.0.text.clone(),
            leading,
            self.0.trailing.clone(),
        )
    }

    pub fn with_trailing_trivia(&self, trailing: Vec<Trivia>) -> GreenToken {
        GreenToken::with_trivia(
            self.0.kind,
            self.0.text.clone(),
            self.0.leading.clone(),
            trailing,
        )
    }

    pub fn ptr_eq(&self, other: &GreenToken) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Same kind, text and trivia (elastic markers ignored).
    pub fn is_equivalent_to(&self, other: &GreenToken) -> bool {
        self.ptr_eq(other)
            || (self.0.kind == other.0.kind
                && self.0.text == other.0.text
                && trivia_equivalent(&self.0.leading, &other.0.leading)
                && trivia_equivalent(&self.0.trailing, &other.0.trailing))
    }

    pub(crate) fn write_to(&self, out: &mut String) {
        for trivia in &self.0.leading {
            out.push_str(trivia.text());
        }
        out.push_str(&self.0.text);
        for trivia in &self.0.trailing {
            out.push_str(trivia.text());
        }
    }
}

impl fmt::Display for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_to(&mut out);
        f.write_str(&out)
    }
}

// ============================================================================
// Green Node
// ============================================================================

/// A child of a green node.
#[derive(Debug, Clone)]
pub enum GreenElement {
    Node(GreenNode),
    Token(GreenToken),
}

impl GreenElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            GreenElement::Node(node) => node.kind(),
            GreenElement::Token(token) => token.kind(),
        }
    }

    pub fn full_len(&self) -> usize {
        match self {
            GreenElement::Node(node) => node.full_len(),
            GreenElement::Token(token) => token.full_len(),
        }
    }

    pub fn as_node(&self) -> Option<&GreenNode> {
        match self {
            GreenElement::Node(node) => Some(node),
            GreenElement::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&GreenToken> {
        match self {
            GreenElement::Token(token) => Some(token),
            GreenElement::Node(_) => None,
        }
    }

    pub fn ptr_eq(&self, other: &GreenElement) -> bool {
        match (self, other) {
            (GreenElement::Node(a), GreenElement::Node(b)) => a.ptr_eq(b),
            (GreenElement::Token(a), GreenElement::Token(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    pub fn is_equivalent_to(&self, other: &GreenElement) -> bool {
        match (self, other) {
            (GreenElement::Node(a), GreenElement::Node(b)) => a.is_equivalent_to(b),
            (GreenElement::Token(a), GreenElement::Token(b)) => a.is_equivalent_to(b),
            _ => false,
        }
    }

    pub(crate) fn write_to(&self, out: &mut String) {
        match self {
            GreenElement::Node(node) => node.write_to(out),
            GreenElement::Token(token) => token.write_to(out),
        }
    }
}

impl From<GreenNode> for GreenElement {
    fn from(node: GreenNode) -> Self {
        GreenElement::Node(node)
    }
}

impl From<GreenToken> for GreenElement {
    fn from(token: GreenToken) -> Self {
        GreenElement::Token(token)
    }
}

#[derive(Debug)]
struct GreenNodeData {
    kind: SyntaxKind,
    children: Vec<GreenElement>,
    full_len: usize,
    annotations: Vec<SyntaxAnnotation>,
}

/// An immutable interior node.
#[derive(Debug, Clone)]
pub struct GreenNode(Arc<GreenNodeData>);

impl GreenNode {
    pub fn new(kind: SyntaxKind, children: Vec<GreenElement>) -> Self {
        GreenNode::with_annotations(kind, children, Vec::new())
    }

    fn with_annotations(
        kind: SyntaxKind,
        children: Vec<GreenElement>,
        annotations: Vec<SyntaxAnnotation>,
    ) -> Self {
        let full_len = children.iter().map(GreenElement::full_len).sum();
        GreenNode(Arc::new(GreenNodeData {
            kind,
            children,
            full_len,
            annotations,
        }))
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    pub fn children(&self) -> &[GreenElement] {
        &self.0.children
    }

    /// Width including leading and trailing trivia.
    pub fn full_len(&self) -> usize {
        self.0.full_len
    }

    pub fn annotations(&self) -> &[SyntaxAnnotation] {
        &self.0.annotations
    }

    pub fn has_annotation(&self, kind: &str) -> bool {
        self.0.annotations.iter().any(|a| a.kind() == kind)
    }

    /// Data of the first annotation of `kind`.
    pub fn annotation_data(&self, kind: &str) -> Option<&str> {
        self.0
            .annotations
            .iter()
            .find(|a| a.kind() == kind)
            .and_then(SyntaxAnnotation::data)
    }

    /// The same node with `annotation` added.
    pub fn with_annotation(&self, annotation: SyntaxAnnotation) -> GreenNode {
        let mut annotations = self.0.annotations.clone();
        if !annotations.contains(&annotation) {
            annotations.push(annotation);
        }
        GreenNode::with_annotations(self.0.kind, self.0.children.clone(), annotations)
    }

    /// The same kind and annotations over new children.
    pub fn with_children(&self, children: Vec<GreenElement>) -> GreenNode {
        GreenNode::with_annotations(self.0.kind, children, self.0.annotations.clone())
    }

    /// Replace the child at `index`.
    pub fn replace_child(&self, index: usize, child: GreenElement) -> GreenNode {
        let mut children = self.0.children.clone();
        children[index] = child;
        self.with_children(children)
    }

    /// Replace `range` of children with `replacement`.
    pub fn splice_children(
        &self,
        range: std::ops::Range<usize>,
        replacement: Vec<GreenElement>,
    ) -> GreenNode {
        let mut children = self.0.children.clone();
        children.splice(range, replacement);
        self.with_children(children)
    }

    /// Insert `elements` before the child at `index`.
    pub fn insert_children(&self, index: usize, elements: Vec<GreenElement>) -> GreenNode {
        self.splice_children(index..index, elements)
    }

    pub fn first_token(&self) -> Option<&GreenToken> {
        self.0.children.iter().find_map(|child| match child {
            GreenElement::Token(token) => Some(token),
            GreenElement::Node(node) => node.first_token(),
        })
    }

    pub fn last_token(&self) -> Option<&GreenToken> {
        self.0.children.iter().rev().find_map(|child| match child {
            GreenElement::Token(token) => Some(token),
            GreenElement::Node(node) => node.last_token(),
        })
    }

    /// Leading trivia of the first token.
    pub fn leading_trivia(&self) -> &[Trivia] {
        self.first_token()
            .map(GreenToken::leading_trivia)
            .unwrap_or(&[])
    }

    /// Trailing trivia of the last token.
    pub fn trailing_trivia(&self) -> &[Trivia] {
        self.last_token()
            .map(GreenToken::trailing_trivia)
            .unwrap_or(&[])
    }

    /// The node with its first token's leading trivia replaced.
    pub fn with_leading_trivia(&self, leading: Vec<Trivia>) -> GreenNode {
        self.map_edge_token(true, &mut |token| token.with_leading_trivia(leading.clone()))
            .unwrap_or_else(|| self.clone())
    }

    /// The node with its last token's trailing trivia replaced.
    pub fn with_trailing_trivia(&self, trailing: Vec<Trivia>) -> GreenNode {
        self.map_edge_token(false, &mut |token| {
            token.with_trailing_trivia(trailing.clone())
        })
        .unwrap_or_else(|| self.clone())
    }

    fn map_edge_token(
        &self,
        first: bool,
        f: &mut dyn FnMut(&GreenToken) -> GreenToken,
    ) -> Option<GreenNode> {
        let indices: Box<dyn Iterator<Item = usize>> = if first {
            Box::new(0..self.0.children.len())
        } else {
            Box::new((0..self.0.children.len()).rev())
        };
        for index in indices {
            match &self.0.children[index] {
                GreenElement::Token(token) => {
                    return Some(self.replace_child(index, f(token).into()));
                }
                GreenElement::Node(node) => {
                    if let Some(mapped) = node.map_edge_token(first, f) {
                        return Some(self.replace_child(index, mapped.into()));
                    }
                }
            }
        }
        None
    }

    pub fn ptr_eq(&self, other: &GreenNode) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Deep structural equality.
    ///
    /// Kinds, token text and trivia must match; annotations and elastic
    /// markers are ignored. Shared subtrees compare in constant time.
    pub fn is_equivalent_to(&self, other: &GreenNode) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        self.0.kind == other.0.kind
            && self.0.full_len == other.0.full_len
            && self.0.children.len() == other.0.children.len()
            && self
                .0
                .children
                .iter()
                .zip(&other.0.children)
                .all(|(a, b)| a.is_equivalent_to(b))
    }

    /// Full text including trivia.
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.0.full_len);
        self.write_to(&mut out);
        out
    }

    pub(crate) fn write_to(&self, out: &mut String) {
        for child in &self.0.children {
            child.write_to(out);
        }
    }
}

impl fmt::Display for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: SyntaxKind, text: &str) -> GreenElement {
        GreenToken::new(kind, text).into()
    }

    fn return_true() -> GreenNode {
        let literal = GreenNode::new(
            SyntaxKind::LiteralExpression,
            vec![token(SyntaxKind::TrueKeyword, "true")],
        );
        GreenNode::new(
            SyntaxKind::ReturnStatement,
            vec![
                GreenToken::with_trivia(
                    SyntaxKind::ReturnKeyword,
                    "return",
                    vec![Trivia::whitespace("    ")],
                    vec![Trivia::whitespace(" ")],
                )
                .into(),
                literal.into(),
                GreenToken::with_trivia(
                    SyntaxKind::Semicolon,
                    ";",
                    vec![],
                    vec![Trivia::end_of_line("\n")],
                )
                .into(),
            ],
        )
    }

    #[test]
    fn text_and_width_include_trivia() {
        let node = return_true();
        assert_eq!(node.text(), "    return true;\n");
        assert_eq!(node.full_len(), node.text().len());
    }

    #[test]
    fn equivalence_ignores_annotations() {
        let a = return_true();
        let b = return_true().with_annotation(SyntaxAnnotation::formatter());
        assert!(a.is_equivalent_to(&b));
        assert!(b.has_annotation(SyntaxAnnotation::FORMATTER));
        assert!(!a.has_annotation(SyntaxAnnotation::FORMATTER));
    }

    #[test]
    fn equivalence_sees_trivia_changes() {
        let a = return_true();
        let b = a.with_leading_trivia(vec![Trivia::whitespace("  ")]);
        assert!(!a.is_equivalent_to(&b));
        assert_eq!(b.text(), "  return true;\n");
    }

    #[test]
    fn equivalence_ignores_elastic_markers() {
        let a = return_true();
        let b = a.with_trailing_trivia(vec![
            Trivia::elastic_marker(),
            Trivia::end_of_line("\n"),
        ]);
        assert!(a.is_equivalent_to(&b));
    }

    #[test]
    fn replace_child_shares_siblings() {
        let a = return_true();
        let literal = GreenNode::new(
            SyntaxKind::LiteralExpression,
            vec![token(SyntaxKind::FalseKeyword, "false")],
        );
        let b = a.replace_child(1, literal.into());
        assert_eq!(b.text(), "    return false;\n");
        assert!(a.children()[0].ptr_eq(&b.children()[0]));
        assert!(a.children()[2].ptr_eq(&b.children()[2]));
        assert!(!a.is_equivalent_to(&b));
    }

    #[test]
    fn annotation_data_lookup() {
        let node = return_true()
            .with_annotation(SyntaxAnnotation::member("Method1"))
            .with_annotation(SyntaxAnnotation::type_name("int"));
        assert_eq!(node.annotation_data(SyntaxAnnotation::MEMBER), Some("Method1"));
        assert_eq!(node.annotation_data(SyntaxAnnotation::TYPE), Some("int"));
        assert_eq!(node.annotation_data(SyntaxAnnotation::FORMATTER), None);
    }
}
