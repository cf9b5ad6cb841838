// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Typed views over red nodes.
//!
//! Each typed node wraps a [`SyntaxNode`] of a known kind and exposes
//! accessors for its parts. Positions that admit many node kinds (any
//! expression, any statement, any type) are returned as plain
//! [`SyntaxNode`]s; cast them with [`AstNode::cast`] when a specific kind is
//! expected.

use crate::kind::SyntaxKind;
use crate::red::{SyntaxNode, SyntaxToken};

/// A typed wrapper around a [`SyntaxNode`].
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;

    fn cast(node: SyntaxNode) -> Option<Self>;

    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident => $($kind:ident)|+) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name($crate::red::SyntaxNode);

        impl $crate::nodes::AstNode for $name {
            fn can_cast(kind: $crate::kind::SyntaxKind) -> bool {
                matches!(kind, $($crate::kind::SyntaxKind::$kind)|+)
            }

            fn cast(node: $crate::red::SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some($name(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &$crate::red::SyntaxNode {
                &self.0
            }
        }
    };
}

mod declarations;
mod expressions;
mod statements;
mod types;

pub use declarations::*;
pub use expressions::*;
pub use statements::*;
pub use types::*;

/// First child castable to `N`.
pub(crate) fn child<N: AstNode>(parent: &SyntaxNode) -> Option<N> {
    parent.children().find_map(N::cast)
}

/// All children castable to `N`.
pub(crate) fn children<N: AstNode>(parent: &SyntaxNode) -> Vec<N> {
    parent.children().filter_map(N::cast).collect()
}

/// Modifier tokens of a declaration.
pub fn modifiers(node: &SyntaxNode) -> Vec<SyntaxToken> {
    node.child_tokens()
        .filter(|t| t.kind().is_modifier())
        .collect()
}

pub fn has_modifier(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    node.child_tokens().any(|t| t.kind() == kind)
}

/// The enclosing node castable to `N`, starting at `node` itself.
pub fn ancestor<N: AstNode>(node: &SyntaxNode) -> Option<N> {
    node.ancestors().find_map(N::cast)
}
