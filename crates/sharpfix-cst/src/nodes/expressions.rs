// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Expressions.

use super::{child, children, ArrayType, ParameterList};
use crate::kind::SyntaxKind;
use crate::red::{SyntaxNode, SyntaxToken};

ast_node!(LiteralExpression => LiteralExpression);
ast_node!(ParenthesizedExpression => ParenthesizedExpression);
ast_node!(MemberAccessExpression => MemberAccessExpression);
ast_node!(InvocationExpression => InvocationExpression);
ast_node!(ElementAccessExpression => ElementAccessExpression);
ast_node!(
    /// Parenthesized or bracketed argument list.
    ArgumentList => ArgumentList | BracketedArgumentList
);
ast_node!(Argument => Argument);
ast_node!(ObjectCreationExpression => ObjectCreationExpression);
ast_node!(ArrayCreationExpression => ArrayCreationExpression);
ast_node!(ImplicitArrayCreationExpression => ImplicitArrayCreationExpression);
ast_node!(InitializerExpression => InitializerExpression);
ast_node!(
    /// `x => ...` or `(x, y) => ...`.
    LambdaExpression => SimpleLambdaExpression | ParenthesizedLambdaExpression
);
ast_node!(BinaryExpression => BinaryExpression);
ast_node!(AssignmentExpression => AssignmentExpression);
ast_node!(PrefixUnaryExpression => PrefixUnaryExpression);
ast_node!(PostfixUnaryExpression => PostfixUnaryExpression);
ast_node!(AwaitExpression => AwaitExpression);
ast_node!(ConditionalExpression => ConditionalExpression);
ast_node!(CastExpression => CastExpression);
ast_node!(TypeOfExpression => TypeOfExpression);
ast_node!(DefaultExpression => DefaultExpression);

fn nth_node(node: &SyntaxNode, n: usize) -> Option<SyntaxNode> {
    node.children().nth(n)
}

impl LiteralExpression {
    pub fn token(&self) -> Option<SyntaxToken> {
        self.0.child_tokens().next()
    }

    pub fn kind(&self) -> SyntaxKind {
        self.token().map_or(SyntaxKind::NullKeyword, |t| t.kind())
    }
}

impl ParenthesizedExpression {
    pub fn expression(&self) -> Option<SyntaxNode> {
        nth_node(&self.0, 0)
    }
}

impl MemberAccessExpression {
    pub fn expression(&self) -> Option<SyntaxNode> {
        nth_node(&self.0, 0)
    }

    /// The accessed member name (`IdentifierName` or `GenericName`).
    pub fn name(&self) -> Option<SyntaxNode> {
        nth_node(&self.0, 1)
    }

    pub fn name_text(&self) -> String {
        self.name()
            .and_then(|n| n.token_of_kind(SyntaxKind::Identifier))
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }
}

impl InvocationExpression {
    pub fn expression(&self) -> Option<SyntaxNode> {
        nth_node(&self.0, 0)
    }

    pub fn argument_list(&self) -> Option<ArgumentList> {
        child(&self.0)
    }

    pub fn arguments(&self) -> Vec<Argument> {
        self.argument_list()
            .map(|list| list.arguments())
            .unwrap_or_default()
    }
}

impl ElementAccessExpression {
    pub fn expression(&self) -> Option<SyntaxNode> {
        nth_node(&self.0, 0)
    }

    pub fn arguments(&self) -> Vec<Argument> {
        child::<ArgumentList>(&self.0)
            .map(|list| list.arguments())
            .unwrap_or_default()
    }
}

impl ArgumentList {
    pub fn arguments(&self) -> Vec<Argument> {
        children(&self.0)
    }
}

impl Argument {
    pub fn expression(&self) -> Option<SyntaxNode> {
        self.0.children().find(|c| c.kind().is_expression())
    }

    /// `ref`, `out` or `in`.
    pub fn ref_kind(&self) -> Option<SyntaxKind> {
        self.0.child_tokens().next().map(|t| t.kind())
    }

    /// Name of a named argument (`name: value`).
    pub fn name(&self) -> Option<String> {
        let name_colon = self.0.child_of_kind(SyntaxKind::NameColon)?;
        Some(name_colon.first_token()?.text().to_string())
    }
}

impl ObjectCreationExpression {
    pub fn new_keyword(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::NewKeyword)
    }

    pub fn ty(&self) -> Option<SyntaxNode> {
        self.0.children().find(|c| c.kind().is_type_syntax())
    }

    pub fn arguments(&self) -> Vec<Argument> {
        child::<ArgumentList>(&self.0)
            .map(|list| list.arguments())
            .unwrap_or_default()
    }

    pub fn has_argument_list(&self) -> bool {
        child::<ArgumentList>(&self.0).is_some()
    }

    pub fn initializer(&self) -> Option<InitializerExpression> {
        child(&self.0)
    }
}

impl ArrayCreationExpression {
    pub fn new_keyword(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::NewKeyword)
    }

    pub fn ty(&self) -> Option<ArrayType> {
        child(&self.0)
    }

    pub fn initializer(&self) -> Option<InitializerExpression> {
        child(&self.0)
    }
}

impl ImplicitArrayCreationExpression {
    pub fn new_keyword(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::NewKeyword)
    }

    pub fn initializer(&self) -> Option<InitializerExpression> {
        child(&self.0)
    }
}

impl InitializerExpression {
    pub fn expressions(&self) -> Vec<SyntaxNode> {
        self.0.children().collect()
    }
}

impl LambdaExpression {
    pub fn is_async(&self) -> bool {
        self.0.token_of_kind(SyntaxKind::AsyncKeyword).is_some()
    }

    pub fn is_simple(&self) -> bool {
        self.0.kind() == SyntaxKind::SimpleLambdaExpression
    }

    /// Parameter nodes of either lambda form.
    pub fn parameters(&self) -> Vec<super::Parameter> {
        if self.is_simple() {
            return child(&self.0).into_iter().collect();
        }
        child::<ParameterList>(&self.0)
            .map(|list| list.parameters())
            .unwrap_or_default()
    }

    /// Block or expression body.
    pub fn body(&self) -> Option<SyntaxNode> {
        self.0.children().last()
    }
}

impl BinaryExpression {
    pub fn left(&self) -> Option<SyntaxNode> {
        nth_node(&self.0, 0)
    }

    /// Kind of the first operator token. `>>` is two `Greater` tokens; see
    /// [`BinaryExpression::is_right_shift`].
    pub fn operator(&self) -> Option<SyntaxKind> {
        self.0.child_tokens().next().map(|t| t.kind())
    }

    pub fn is_right_shift(&self) -> bool {
        self.0.child_tokens().count() == 2
    }

    pub fn right(&self) -> Option<SyntaxNode> {
        self.0.children().nth(1)
    }
}

impl AssignmentExpression {
    pub fn left(&self) -> Option<SyntaxNode> {
        nth_node(&self.0, 0)
    }

    pub fn operator(&self) -> Option<SyntaxKind> {
        self.0.child_tokens().next().map(|t| t.kind())
    }

    pub fn right(&self) -> Option<SyntaxNode> {
        nth_node(&self.0, 1)
    }
}

impl PrefixUnaryExpression {
    pub fn operator(&self) -> Option<SyntaxKind> {
        self.0.child_tokens().next().map(|t| t.kind())
    }

    pub fn operand(&self) -> Option<SyntaxNode> {
        nth_node(&self.0, 0)
    }
}

impl PostfixUnaryExpression {
    pub fn operand(&self) -> Option<SyntaxNode> {
        nth_node(&self.0, 0)
    }
}

impl AwaitExpression {
    pub fn expression(&self) -> Option<SyntaxNode> {
        nth_node(&self.0, 0)
    }
}

impl ConditionalExpression {
    pub fn condition(&self) -> Option<SyntaxNode> {
        nth_node(&self.0, 0)
    }

    pub fn when_true(&self) -> Option<SyntaxNode> {
        nth_node(&self.0, 1)
    }

    pub fn when_false(&self) -> Option<SyntaxNode> {
        nth_node(&self.0, 2)
    }
}

impl CastExpression {
    pub fn ty(&self) -> Option<SyntaxNode> {
        nth_node(&self.0, 0)
    }

    pub fn expression(&self) -> Option<SyntaxNode> {
        nth_node(&self.0, 1)
    }
}

impl TypeOfExpression {
    pub fn ty(&self) -> Option<SyntaxNode> {
        nth_node(&self.0, 0)
    }
}

impl DefaultExpression {
    pub fn ty(&self) -> Option<SyntaxNode> {
        nth_node(&self.0, 0)
    }
}
