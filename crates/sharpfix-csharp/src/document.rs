//! Documents: one parsed file plus its lazily bound semantic model.
//!
//! A [`Document`] never changes. Fixing produces a new document through
//! [`Document::with_syntax_root`], and the new document binds its own model
//! the first time one is asked for.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use sharpfix_core::error::SharpfixError;
use sharpfix_core::text::byte_offset_to_position;
use sharpfix_cst::{SyntaxNode, SyntaxTree};

use crate::semantic::SemanticModel;

/// A source file with its tree and semantic model.
#[derive(Debug, Clone)]
pub struct Document {
    path: String,
    tree: SyntaxTree,
    model: OnceCell<Arc<SemanticModel>>,
}

impl Document {
    /// Parse `text` into a document.
    pub fn parse(path: impl Into<String>, text: &str) -> Result<Self, SharpfixError> {
        let path = path.into();
        match sharpfix_cst::parse(text) {
            Ok(tree) => Ok(Document::new(path, tree)),
            Err(err) => {
                let (line, col) = byte_offset_to_position(text, err.offset);
                Err(SharpfixError::ParseError {
                    path,
                    line,
                    col,
                    message: err.message,
                })
            }
        }
    }

    pub fn new(path: impl Into<String>, tree: SyntaxTree) -> Self {
        Document {
            path: path.into(),
            tree,
            model: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn root(&self) -> &SyntaxNode {
        self.tree.root()
    }

    pub fn text(&self) -> String {
        self.tree.text()
    }

    /// The semantic model, bound on first use and shared afterwards.
    pub fn semantic_model(&self) -> Arc<SemanticModel> {
        self.model
            .get_or_init(|| Arc::new(SemanticModel::new(self.tree.root().clone())))
            .clone()
    }

    /// A new document over `root`, with the same path.
    pub fn with_syntax_root(&self, root: SyntaxNode) -> Document {
        Document::new(self.path.clone(), SyntaxTree::new(root))
    }

    /// Deep structural equality of the two trees.
    pub fn is_equivalent_to(&self, other: &Document) -> bool {
        self.tree.is_equivalent_to(&other.tree)
    }
}
