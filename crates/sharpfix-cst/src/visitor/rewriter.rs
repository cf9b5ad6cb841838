// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Tree rewriters.
//!
//! A [`Rewriter`] rebuilds a subtree and returns the root of a new tree.
//! Unchanged subtrees keep their green nodes, so the result shares every
//! untouched node with the input.

use crate::green::{GreenElement, GreenNode, GreenToken, Trivia};
use crate::red::{SyntaxElement, SyntaxNode, SyntaxToken};

/// Bottom-up tree rewriter.
pub trait Rewriter {
    /// Replacement for `node` and its whole subtree. `None` descends into
    /// the children.
    #[allow(unused_variables)]
    fn rewrite_node(&mut self, node: &SyntaxNode) -> Option<GreenNode> {
        None
    }

    /// Replacement for `token`, or `None` to keep it.
    #[allow(unused_variables)]
    fn rewrite_token(&mut self, token: &SyntaxToken) -> Option<GreenToken> {
        None
    }

    /// Called after the children of `node` were rewritten. `rebuilt` is the
    /// node over the rewritten children.
    #[allow(unused_variables)]
    fn leave_node(&mut self, node: &SyntaxNode, rebuilt: GreenNode) -> GreenNode {
        rebuilt
    }
}

/// Rewrite `node` and return the root of the resulting tree.
pub fn rewrite<R: Rewriter + ?Sized>(rewriter: &mut R, node: &SyntaxNode) -> SyntaxNode {
    let green = rewrite_green(rewriter, node);
    if green.ptr_eq(node.green()) {
        return node.root();
    }
    node.replace_with(green)
}

fn rewrite_green<R: Rewriter + ?Sized>(rewriter: &mut R, node: &SyntaxNode) -> GreenNode {
    if let Some(replacement) = rewriter.rewrite_node(node) {
        return replacement;
    }
    let mut changed = false;
    let children: Vec<GreenElement> = node
        .children_with_tokens()
        .into_iter()
        .map(|element| match element {
            SyntaxElement::Node(child) => {
                let green = rewrite_green(rewriter, &child);
                changed |= !green.ptr_eq(child.green());
                GreenElement::Node(green)
            }
            SyntaxElement::Token(token) => match rewriter.rewrite_token(&token) {
                Some(green) => {
                    changed = true;
                    GreenElement::Token(green)
                }
                None => GreenElement::Token(token.green().clone()),
            },
        })
        .collect();
    let rebuilt = if changed {
        node.green().with_children(children)
    } else {
        node.green().clone()
    };
    rewriter.leave_node(node, rebuilt)
}

/// Maps every trivia piece of every token in a subtree.
///
/// The mapping returns `Some(replacement)` to substitute a piece and `None`
/// to keep it.
pub struct TriviaRewriter<F> {
    map: F,
}

impl<F> TriviaRewriter<F>
where
    F: FnMut(&Trivia) -> Option<Trivia>,
{
    pub fn new(map: F) -> Self {
        TriviaRewriter { map }
    }

    fn map_all(&mut self, trivia: &[Trivia]) -> Option<Vec<Trivia>> {
        let mut changed = false;
        let mapped = trivia
            .iter()
            .map(|piece| match (self.map)(piece) {
                Some(replacement) => {
                    changed = true;
                    replacement
                }
                None => piece.clone(),
            })
            .collect();
        changed.then_some(mapped)
    }
}

impl<F> Rewriter for TriviaRewriter<F>
where
    F: FnMut(&Trivia) -> Option<Trivia>,
{
    fn rewrite_token(&mut self, token: &SyntaxToken) -> Option<GreenToken> {
        let leading = self.map_all(token.leading_trivia());
        let trailing = self.map_all(token.trailing_trivia());
        if leading.is_none() && trailing.is_none() {
            return None;
        }
        let mut green = token.green().clone();
        if let Some(leading) = leading {
            green = green.with_leading_trivia(leading);
        }
        if let Some(trailing) = trailing {
            green = green.with_trailing_trivia(trailing);
        }
        Some(green)
    }
}
