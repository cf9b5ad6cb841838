// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! A C# tokenizer, parser and immutable concrete syntax tree.
//!
//! The tree keeps every byte of the source, trivia included, so printing a
//! parsed tree reproduces the input exactly.
//!
//! # Overview
//!
//! - **Green tree** ([`green`]): immutable, position-free nodes and tokens
//!   shared through `Arc`. Rewrites rebuild only the path to the root.
//! - **Red tree** ([`red`]): positioned, parent-aware handles created on
//!   demand while navigating.
//! - **Parsing**: [`parse`] for whole files, and the fragment entry points in
//!   [`parser`] and [`make`] for building replacement nodes.
//! - **Typed views** ([`nodes`]): accessors over nodes of known kinds.
//! - **Traversal** ([`visitor`]): visitors and rewriters.
//! - **Diffing** ([`diff`]): text edits between two trees.
//!
//! # Quick Start
//!
//! ```
//! use sharpfix_cst::parse;
//!
//! let source = "class C { void M() { } }\n";
//! let tree = parse(source).expect("parse error");
//! assert_eq!(tree.text(), source);
//! ```

pub mod diff;
pub mod green;
pub mod kind;
pub mod make;
pub mod nodes;
pub mod parser;
pub mod red;
pub mod tokenizer;
pub mod visitor;

pub use diff::diff_trees;
pub use green::{GreenElement, GreenNode, GreenToken, SyntaxAnnotation, Trivia, TriviaKind};
pub use kind::SyntaxKind;
pub use nodes::AstNode;
pub use parser::{ParseError, ParseResult};
pub use red::{SyntaxElement, SyntaxNode, SyntaxToken, TreeEdit};
pub use visitor::{rewrite, walk, Rewriter, TriviaRewriter, VisitResult, Visitor};

use nodes::CompilationUnit;

/// A parsed source file.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    root: SyntaxNode,
}

impl SyntaxTree {
    /// Wrap a root node. The root is expected to be a compilation unit.
    pub fn new(root: SyntaxNode) -> Self {
        SyntaxTree { root }
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    pub fn compilation_unit(&self) -> Option<CompilationUnit> {
        CompilationUnit::cast(self.root.clone())
    }

    /// Full source text.
    pub fn text(&self) -> String {
        self.root.text()
    }

    /// Structural equivalence of the two roots; annotations are ignored.
    pub fn is_equivalent_to(&self, other: &SyntaxTree) -> bool {
        self.root.green().is_equivalent_to(other.root.green())
    }
}

/// Parse a whole source file.
pub fn parse(source: &str) -> ParseResult<SyntaxTree> {
    let green = parser::parse_compilation_unit(source)?;
    Ok(SyntaxTree::new(SyntaxNode::new_root(green)))
}
