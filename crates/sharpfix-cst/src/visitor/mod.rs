// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor and rewriter infrastructure for syntax tree traversal.
//!
//! # Traversal Order
//!
//! - **Depth-first, pre-order** for `visit_*` methods
//! - **Post-order** for `leave_*` methods
//! - Children are visited in source order
//!
//! # Visitor Pattern
//!
//! The [`Visitor`] trait provides read-only traversal. Every node is first
//! offered to [`Visitor::visit_node`]; nodes with a typed view are then
//! offered to the matching typed method:
//!
//! ```ignore
//! use sharpfix_cst::visitor::{walk, Visitor, VisitResult};
//! use sharpfix_cst::nodes::MethodDeclaration;
//!
//! struct MethodCounter {
//!     count: usize,
//! }
//!
//! impl Visitor for MethodCounter {
//!     fn visit_method_declaration(&mut self, _node: &MethodDeclaration) -> VisitResult {
//!         self.count += 1;
//!         VisitResult::Continue
//!     }
//! }
//! ```
//!
//! # Rewriter Pattern
//!
//! The [`Rewriter`] trait rebuilds a tree bottom-up, sharing every subtree it
//! leaves untouched. [`TriviaRewriter`] maps the trivia of every token.

mod rewriter;
mod traits;
mod walk;

pub use rewriter::{rewrite, Rewriter, TriviaRewriter};
pub use traits::{VisitResult, Visitor};
pub use walk::walk;

#[cfg(test)]
mod tests;
