// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Names, types, parameters and type parameters.

use super::children;
use crate::kind::SyntaxKind;
use crate::red::{SyntaxNode, SyntaxToken};

ast_node!(IdentifierName => IdentifierName);
ast_node!(GenericName => GenericName);
ast_node!(QualifiedName => QualifiedName);
ast_node!(PredefinedType => PredefinedType);
ast_node!(ArrayType => ArrayType);
ast_node!(NullableType => NullableType);
ast_node!(TypeArgumentList => TypeArgumentList);
ast_node!(TypeParameterList => TypeParameterList);
ast_node!(ParameterList => ParameterList);
ast_node!(Parameter => Parameter);

impl IdentifierName {
    pub fn identifier(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::Identifier)
    }

    pub fn text(&self) -> String {
        self.identifier()
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }
}

impl GenericName {
    pub fn identifier(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::Identifier)
    }

    pub fn text(&self) -> String {
        self.identifier()
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }

    pub fn type_arguments(&self) -> Vec<SyntaxNode> {
        self.0
            .child_of_kind(SyntaxKind::TypeArgumentList)
            .map(|list| list.children().collect())
            .unwrap_or_default()
    }
}

impl QualifiedName {
    pub fn left(&self) -> Option<SyntaxNode> {
        self.0.children().next()
    }

    pub fn right(&self) -> Option<SyntaxNode> {
        self.0.children().nth(1)
    }
}

impl PredefinedType {
    pub fn keyword(&self) -> Option<SyntaxToken> {
        self.0.child_tokens().next()
    }
}

impl ArrayType {
    pub fn element_type(&self) -> Option<SyntaxNode> {
        self.0.children().next()
    }

    /// Number of dimensions of each rank specifier, outermost first.
    pub fn ranks(&self) -> Vec<usize> {
        self.0
            .children()
            .filter(|c| c.kind() == SyntaxKind::ArrayRankSpecifier)
            .map(|rank| {
                1 + rank
                    .child_tokens()
                    .filter(|t| t.kind() == SyntaxKind::Comma)
                    .count()
            })
            .collect()
    }

    /// Size expressions of the first rank specifier (`new int[5]`).
    pub fn sizes(&self) -> Vec<SyntaxNode> {
        self.0
            .child_of_kind(SyntaxKind::ArrayRankSpecifier)
            .map(|rank| rank.children().collect())
            .unwrap_or_default()
    }
}

impl NullableType {
    pub fn element_type(&self) -> Option<SyntaxNode> {
        self.0.children().next()
    }
}

impl TypeArgumentList {
    pub fn types(&self) -> Vec<SyntaxNode> {
        self.0.children().collect()
    }
}

impl TypeParameterList {
    pub fn names(&self) -> Vec<String> {
        self.0
            .children()
            .filter_map(|p| p.token_of_kind(SyntaxKind::Identifier))
            .map(|t| t.text().to_string())
            .collect()
    }
}

impl ParameterList {
    pub fn parameters(&self) -> Vec<Parameter> {
        children(&self.0)
    }
}

impl Parameter {
    /// Declared type; `None` for implicitly typed lambda parameters.
    pub fn ty(&self) -> Option<SyntaxNode> {
        self.0.children().find(|c| c.kind().is_type_syntax())
    }

    pub fn identifier(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::Identifier)
    }

    pub fn name(&self) -> String {
        self.identifier()
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }

    /// `this` on the first parameter of an extension method.
    pub fn is_this(&self) -> bool {
        self.0.token_of_kind(SyntaxKind::ThisKeyword).is_some()
    }

    pub fn is_params(&self) -> bool {
        self.0.token_of_kind(SyntaxKind::ParamsKeyword).is_some()
    }

    pub fn default_value(&self) -> Option<SyntaxNode> {
        self.0
            .child_of_kind(SyntaxKind::EqualsValueClause)?
            .children()
            .next()
    }
}
