// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Expressions, by precedence climbing.
//!
//! From loosest to tightest: assignment, conditional, null-coalescing,
//! `||`, `&&`, `|`, `^`, `&`, equality, relational and type testing,
//! shift, additive, multiplicative, switch and `with`, range, unary,
//! postfix, primary.

use super::{node, ParseResult, Parser};
use crate::green::{GreenElement, GreenNode};
use crate::kind::SyntaxKind;

/// Relational level; `is` takes a type or pattern and `as` a type.
const RELATIONAL: u8 = 7;
pub(super) const SHIFT: u8 = 8;

impl Parser {
    pub(crate) fn expression(&mut self) -> ParseResult<GreenNode> {
        if let Some(lambda) = self.lambda_if_present()? {
            return Ok(lambda);
        }
        let left = self.conditional_expression()?;
        let width = if is_assignment_operator(self.peek()) {
            1
        } else if self.at(SyntaxKind::Greater)
            && self.peek_at(1) == SyntaxKind::GreaterEquals
            && self.adjacent_to_next(0)
        {
            2
        } else {
            return Ok(left);
        };
        let mut children = vec![left.into()];
        for _ in 0..width {
            children.push(self.bump());
        }
        let right = if self.at(SyntaxKind::OpenBrace) {
            self.initializer_expression()?
        } else {
            self.expression()?
        };
        children.push(right.into());
        Ok(node(SyntaxKind::AssignmentExpression, children))
    }

    // ------------------------------------------------------------------
    // Lambdas
    // ------------------------------------------------------------------

    fn lambda_if_present(&mut self) -> ParseResult<Option<GreenNode>> {
        let mut start = 0;
        while start < 2
            && self.lambda_modifier_at(start)
            && (self.lambda_starts_at(start + 1) || self.lambda_modifier_at(start + 1))
        {
            start += 1;
        }
        if !self.lambda_starts_at(start) {
            return Ok(None);
        }

        let mut children = Vec::new();
        for _ in 0..start {
            if self.at(SyntaxKind::StaticKeyword) {
                children.push(self.bump());
            } else {
                children.push(self.bump_as(SyntaxKind::AsyncKeyword));
            }
        }
        let kind = if self.at(SyntaxKind::Identifier) {
            let identifier = self.bump();
            children.push(node(SyntaxKind::Parameter, vec![identifier]).into());
            SyntaxKind::SimpleLambdaExpression
        } else {
            let mut parameters = Vec::new();
            self.separated(
                SyntaxKind::OpenParen,
                SyntaxKind::CloseParen,
                &mut parameters,
                |p| {
                    if p.at(SyntaxKind::Identifier)
                        && matches!(p.peek_at(1), SyntaxKind::Comma | SyntaxKind::CloseParen)
                    {
                        let identifier = p.bump();
                        return Ok(node(SyntaxKind::Parameter, vec![identifier]));
                    }
                    p.parameter()
                },
            )?;
            children.push(node(SyntaxKind::ParameterList, parameters).into());
            SyntaxKind::ParenthesizedLambdaExpression
        };
        children.push(self.expect(SyntaxKind::EqualsGreater)?);
        let body = if self.at(SyntaxKind::OpenBrace) {
            self.block()?
        } else {
            self.expression()?
        };
        children.push(body.into());
        Ok(Some(node(kind, children)))
    }

    /// `async` or `static` before a lambda, `n` tokens ahead.
    fn lambda_modifier_at(&self, n: usize) -> bool {
        match self.peek_at(n) {
            SyntaxKind::StaticKeyword => true,
            SyntaxKind::Identifier => self.peek_text_at(n) == "async",
            _ => false,
        }
    }

    /// A lambda parameter section starts `n` tokens ahead.
    fn lambda_starts_at(&self, n: usize) -> bool {
        match self.peek_at(n) {
            SyntaxKind::Identifier => self.peek_at(n + 1) == SyntaxKind::EqualsGreater,
            SyntaxKind::OpenParen => self
                .skip_parens(n)
                .is_some_and(|after| self.peek_at(after) == SyntaxKind::EqualsGreater),
            _ => false,
        }
    }

    // ------------------------------------------------------------------
    // Binary levels
    // ------------------------------------------------------------------

    fn conditional_expression(&mut self) -> ParseResult<GreenNode> {
        let condition = self.coalesce_expression()?;
        if !self.at(SyntaxKind::Question) {
            return Ok(condition);
        }
        let question = self.bump();
        let when_true = self.expression()?;
        let colon = self.expect(SyntaxKind::Colon)?;
        let when_false = self.expression()?;
        Ok(node(
            SyntaxKind::ConditionalExpression,
            vec![
                condition.into(),
                question,
                when_true.into(),
                colon,
                when_false.into(),
            ],
        ))
    }

    fn coalesce_expression(&mut self) -> ParseResult<GreenNode> {
        let left = self.binary_expression(1)?;
        if !self.at(SyntaxKind::QuestionQuestion) {
            return Ok(left);
        }
        let operator = self.bump();
        let right = self.coalesce_expression()?;
        Ok(node(
            SyntaxKind::BinaryExpression,
            vec![left.into(), operator, right.into()],
        ))
    }

    pub(super) fn binary_expression(&mut self, min_precedence: u8) -> ParseResult<GreenNode> {
        let mut left = self.range_expression()?;
        while let Some((precedence, width)) = self.binary_operator() {
            if precedence < min_precedence {
                break;
            }
            if self.at(SyntaxKind::IsKeyword) {
                let keyword = self.bump();
                left = self.is_expression_rest(left, keyword)?;
                continue;
            }
            let type_test = self.at(SyntaxKind::AsKeyword);
            let mut children = vec![left.into()];
            for _ in 0..width {
                children.push(self.bump());
            }
            let right = if type_test {
                match self.try_parse(|p| p.parse_type(false)) {
                    Some(ty) => ty,
                    None => self.binary_expression(SHIFT)?,
                }
            } else {
                self.binary_expression(precedence + 1)?
            };
            children.push(right.into());
            left = node(SyntaxKind::BinaryExpression, children);
        }
        Ok(left)
    }

    /// The right side of `is`: a type when nothing pattern-like follows it,
    /// otherwise a pattern.
    fn is_expression_rest(
        &mut self,
        left: GreenNode,
        keyword: GreenElement,
    ) -> ParseResult<GreenNode> {
        let start = self.save();
        if let Some(ty) = self.try_parse(|p| p.parse_type(false)) {
            let pattern_word = ty.kind() == SyntaxKind::IdentifierName
                && matches!(ty.text().trim(), "not" | "var");
            let continues = matches!(
                self.peek(),
                SyntaxKind::Identifier | SyntaxKind::OpenBrace | SyntaxKind::OpenParen
            );
            if !pattern_word && !continues {
                return Ok(node(
                    SyntaxKind::BinaryExpression,
                    vec![left.into(), keyword, ty.into()],
                ));
            }
            self.restore(start);
        }
        let pattern = self.pattern()?;
        Ok(node(
            SyntaxKind::IsPatternExpression,
            vec![left.into(), keyword, pattern.into()],
        ))
    }

    /// Precedence and token width of the binary operator at the cursor.
    fn binary_operator(&self) -> Option<(u8, usize)> {
        use SyntaxKind::*;
        let operator = match self.peek() {
            BarBar => (1, 1),
            AmpersandAmpersand => (2, 1),
            Bar => (3, 1),
            Caret => (4, 1),
            Ampersand => (5, 1),
            EqualsEquals | ExclamationEquals => (6, 1),
            Greater
                if self.peek_at(1) == Greater
                    && self.peek_at(2) == Greater
                    && self.adjacent_to_next(0)
                    && self.adjacent_to_next(1) =>
            {
                (SHIFT, 3)
            }
            Greater if self.peek_at(1) == Greater && self.adjacent_to_next(0) => (SHIFT, 2),
            // `>>=` is an assignment
            Greater if self.peek_at(1) == GreaterEquals && self.adjacent_to_next(0) => {
                return None
            }
            Less | Greater | LessEquals | GreaterEquals | IsKeyword | AsKeyword => (RELATIONAL, 1),
            LessLess => (SHIFT, 1),
            Plus | Minus => (9, 1),
            Asterisk | Slash | Percent => (10, 1),
            _ => return None,
        };
        Some(operator)
    }

    // ------------------------------------------------------------------
    // Switch, with and range
    // ------------------------------------------------------------------

    /// A unary expression with `switch { }`, `with { }` and `..` suffixes.
    fn range_expression(&mut self) -> ParseResult<GreenNode> {
        let mut operand = self.unary_expression()?;
        loop {
            operand = match self.peek() {
                SyntaxKind::SwitchKeyword if self.peek_at(1) == SyntaxKind::OpenBrace => {
                    self.switch_expression(operand)?
                }
                SyntaxKind::Identifier
                    if self.peek_text() == "with" && self.peek_at(1) == SyntaxKind::OpenBrace =>
                {
                    let keyword = self.bump_as(SyntaxKind::WithKeyword);
                    let initializer = self.initializer_expression()?;
                    node(
                        SyntaxKind::WithExpression,
                        vec![operand.into(), keyword, initializer.into()],
                    )
                }
                SyntaxKind::DotDot => {
                    let mut children = vec![operand.into(), self.bump()];
                    if starts_range_operand(self.peek()) {
                        children.push(self.unary_expression()?.into());
                    }
                    node(SyntaxKind::RangeExpression, children)
                }
                _ => return Ok(operand),
            };
        }
    }

    /// `governing switch { pattern [when condition] => result, ... }`
    fn switch_expression(&mut self, governing: GreenNode) -> ParseResult<GreenNode> {
        let mut children = vec![governing.into(), self.expect(SyntaxKind::SwitchKeyword)?];
        children.push(self.expect(SyntaxKind::OpenBrace)?);
        while !self.at(SyntaxKind::CloseBrace) {
            let mut arm = vec![self.pattern()?.into()];
            if self.at_contextual("when") {
                arm.push(self.when_clause()?.into());
            }
            arm.push(self.expect(SyntaxKind::EqualsGreater)?);
            arm.push(self.expression()?.into());
            children.push(node(SyntaxKind::SwitchExpressionArm, arm).into());
            if !self.eat(SyntaxKind::Comma, &mut children) {
                break;
            }
        }
        children.push(self.expect(SyntaxKind::CloseBrace)?);
        Ok(node(SyntaxKind::SwitchExpression, children))
    }

    // ------------------------------------------------------------------
    // Unary and postfix
    // ------------------------------------------------------------------

    fn unary_expression(&mut self) -> ParseResult<GreenNode> {
        match self.peek() {
            SyntaxKind::Plus
            | SyntaxKind::Minus
            | SyntaxKind::Exclamation
            | SyntaxKind::Tilde
            | SyntaxKind::Caret
            | SyntaxKind::PlusPlus
            | SyntaxKind::MinusMinus => {
                let operator = self.bump();
                let operand = self.unary_expression()?;
                Ok(node(
                    SyntaxKind::PrefixUnaryExpression,
                    vec![operator, operand.into()],
                ))
            }
            SyntaxKind::DotDot => {
                let mut children = vec![self.bump()];
                if starts_range_operand(self.peek()) {
                    children.push(self.unary_expression()?.into());
                }
                Ok(node(SyntaxKind::RangeExpression, children))
            }
            SyntaxKind::ThrowKeyword => {
                let keyword = self.bump();
                let thrown = self.expression()?;
                Ok(node(
                    SyntaxKind::ThrowExpression,
                    vec![keyword, thrown.into()],
                ))
            }
            SyntaxKind::Identifier
                if self.peek_text() == "await" && starts_operand(self.peek_at(1)) =>
            {
                let keyword = self.bump_as(SyntaxKind::AwaitKeyword);
                let operand = self.unary_expression()?;
                Ok(node(
                    SyntaxKind::AwaitExpression,
                    vec![keyword, operand.into()],
                ))
            }
            SyntaxKind::OpenParen => match self.try_parse(Parser::cast_expression) {
                Some(cast) => Ok(cast),
                None => {
                    let primary = self.primary_expression()?;
                    self.postfix_expression(primary)
                }
            },
            _ => {
                let primary = self.primary_expression()?;
                self.postfix_expression(primary)
            }
        }
    }

    fn cast_expression(&mut self) -> ParseResult<GreenNode> {
        let open = self.expect(SyntaxKind::OpenParen)?;
        let ty = self.parse_type(true)?;
        let close = self.expect(SyntaxKind::CloseParen)?;
        let predefined = ty.kind() == SyntaxKind::PredefinedType;
        let next = self.peek();
        let is_cast = starts_operand(next)
            || matches!(next, SyntaxKind::Exclamation | SyntaxKind::Tilde)
            || (predefined
                && matches!(
                    next,
                    SyntaxKind::Plus
                        | SyntaxKind::Minus
                        | SyntaxKind::PlusPlus
                        | SyntaxKind::MinusMinus
                ));
        if !is_cast {
            return Err(self.error("not a cast"));
        }
        let operand = self.unary_expression()?;
        Ok(node(
            SyntaxKind::CastExpression,
            vec![open, ty.into(), close, operand.into()],
        ))
    }

    fn postfix_expression(&mut self, mut expression: GreenNode) -> ParseResult<GreenNode> {
        loop {
            expression = match self.peek() {
                SyntaxKind::Dot => {
                    let dot = self.bump();
                    let name = self.expression_name()?;
                    node(
                        SyntaxKind::MemberAccessExpression,
                        vec![expression.into(), dot, name.into()],
                    )
                }
                SyntaxKind::OpenParen => {
                    let arguments = self.argument_list()?;
                    node(
                        SyntaxKind::InvocationExpression,
                        vec![expression.into(), arguments.into()],
                    )
                }
                SyntaxKind::OpenBracket => {
                    let arguments = self.bracketed_argument_list()?;
                    node(
                        SyntaxKind::ElementAccessExpression,
                        vec![expression.into(), arguments.into()],
                    )
                }
                SyntaxKind::PlusPlus | SyntaxKind::MinusMinus => {
                    let operator = self.bump();
                    node(
                        SyntaxKind::PostfixUnaryExpression,
                        vec![expression.into(), operator],
                    )
                }
                // `x!`: null-forgiving, written against its operand
                SyntaxKind::Exclamation if self.adjacent_to_previous() => {
                    let operator = self.bump();
                    node(
                        SyntaxKind::PostfixUnaryExpression,
                        vec![expression.into(), operator],
                    )
                }
                SyntaxKind::Question
                    if self.adjacent_to_next(0)
                        && matches!(
                            self.peek_at(1),
                            SyntaxKind::Dot | SyntaxKind::OpenBracket
                        ) =>
                {
                    return self.conditional_access(expression);
                }
                _ => return Ok(expression),
            };
        }
    }

    /// `expression?.rest` and `expression?[index]rest`. The rest of the
    /// postfix chain belongs to the access.
    fn conditional_access(&mut self, expression: GreenNode) -> ParseResult<GreenNode> {
        let question = self.expect(SyntaxKind::Question)?;
        let binding = if self.at(SyntaxKind::Dot) {
            let dot = self.bump();
            let name = self.expression_name()?;
            node(SyntaxKind::MemberBindingExpression, vec![dot, name.into()])
        } else {
            let arguments = self.bracketed_argument_list()?;
            node(SyntaxKind::ElementBindingExpression, vec![arguments.into()])
        };
        let when_not_null = self.postfix_expression(binding)?;
        Ok(node(
            SyntaxKind::ConditionalAccessExpression,
            vec![expression.into(), question, when_not_null.into()],
        ))
    }

    fn bracketed_argument_list(&mut self) -> ParseResult<GreenNode> {
        let mut arguments = Vec::new();
        self.separated(
            SyntaxKind::OpenBracket,
            SyntaxKind::CloseBracket,
            &mut arguments,
            Parser::argument,
        )?;
        Ok(node(SyntaxKind::BracketedArgumentList, arguments))
    }

    // ------------------------------------------------------------------
    // Primary
    // ------------------------------------------------------------------

    fn primary_expression(&mut self) -> ParseResult<GreenNode> {
        match self.peek() {
            SyntaxKind::NumericLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::CharacterLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword => {
                Ok(node(SyntaxKind::LiteralExpression, vec![self.bump()]))
            }
            SyntaxKind::ThisKeyword => Ok(node(SyntaxKind::ThisExpression, vec![self.bump()])),
            SyntaxKind::BaseKeyword => Ok(node(SyntaxKind::BaseExpression, vec![self.bump()])),
            SyntaxKind::OpenParen => self.parenthesized_or_tuple(),
            SyntaxKind::OpenBracket => self.collection_expression(),
            SyntaxKind::NewKeyword => self.creation_expression(),
            SyntaxKind::DelegateKeyword => {
                let mut children = vec![self.bump()];
                if self.at(SyntaxKind::OpenParen) {
                    children.push(self.parameter_list()?.into());
                }
                children.push(self.block()?.into());
                Ok(node(SyntaxKind::AnonymousMethodExpression, children))
            }
            SyntaxKind::TypeofKeyword => {
                self.keyword_of_type(SyntaxKind::TypeOfExpression)
            }
            SyntaxKind::SizeofKeyword => {
                self.keyword_of_type(SyntaxKind::SizeOfExpression)
            }
            SyntaxKind::CheckedKeyword | SyntaxKind::UncheckedKeyword => {
                let keyword = self.bump();
                let open = self.expect(SyntaxKind::OpenParen)?;
                let inner = self.expression()?;
                let close = self.expect(SyntaxKind::CloseParen)?;
                Ok(node(
                    SyntaxKind::CheckedExpression,
                    vec![keyword, open, inner.into(), close],
                ))
            }
            SyntaxKind::DefaultKeyword if self.peek_at(1) == SyntaxKind::OpenParen => {
                self.keyword_of_type(SyntaxKind::DefaultExpression)
            }
            SyntaxKind::DefaultKeyword => {
                Ok(node(SyntaxKind::LiteralExpression, vec![self.bump()]))
            }
            kind if kind.is_predefined_type() => {
                Ok(node(SyntaxKind::PredefinedType, vec![self.bump()]))
            }
            SyntaxKind::Identifier if self.peek_at(1) == SyntaxKind::ColonColon => {
                let alias = self.identifier_name()?;
                let colons = self.bump();
                let name = self.expression_name()?;
                Ok(node(
                    SyntaxKind::AliasQualifiedName,
                    vec![alias.into(), colons, name.into()],
                ))
            }
            // `var (a, b) = ...`
            SyntaxKind::Identifier
                if self.peek_text() == "var"
                    && self.peek_at(1) == SyntaxKind::OpenParen
                    && self
                        .skip_parens(1)
                        .is_some_and(|after| self.peek_at(after) == SyntaxKind::Equals) =>
            {
                self.deconstruction_target()
            }
            SyntaxKind::Identifier => self.expression_name(),
            _ => Err(self.error("expected expression")),
        }
    }

    /// `(expr)`, or a tuple `(a, name: b, var c)` when there is a comma.
    fn parenthesized_or_tuple(&mut self) -> ParseResult<GreenNode> {
        let open = self.expect(SyntaxKind::OpenParen)?;
        let first = if self.at(SyntaxKind::Identifier) && self.peek_at(1) == SyntaxKind::Colon {
            self.tuple_element()?
        } else if let Some(declaration) = self.try_parse(Parser::tuple_declaration) {
            node(SyntaxKind::Argument, vec![declaration.into()])
        } else {
            let inner = self.expression()?;
            if !self.at(SyntaxKind::Comma) {
                let close = self.expect(SyntaxKind::CloseParen)?;
                return Ok(node(
                    SyntaxKind::ParenthesizedExpression,
                    vec![open, inner.into(), close],
                ));
            }
            node(SyntaxKind::Argument, vec![inner.into()])
        };
        let mut children = vec![open, first.into()];
        while self.eat(SyntaxKind::Comma, &mut children) {
            children.push(self.tuple_element()?.into());
        }
        children.push(self.expect(SyntaxKind::CloseParen)?);
        Ok(node(SyntaxKind::TupleExpression, children))
    }

    fn tuple_element(&mut self) -> ParseResult<GreenNode> {
        match self.try_parse(Parser::tuple_declaration) {
            Some(declaration) => Ok(node(SyntaxKind::Argument, vec![declaration.into()])),
            None => self.argument(),
        }
    }

    /// `Type name` inside a tuple that is being deconstructed into.
    fn tuple_declaration(&mut self) -> ParseResult<GreenNode> {
        let ty = self.parse_type(true)?;
        if !(self.at(SyntaxKind::Identifier)
            && matches!(self.peek_at(1), SyntaxKind::Comma | SyntaxKind::CloseParen))
        {
            return Err(self.error("not a declaration"));
        }
        let designation = self.designation()?;
        Ok(node(
            SyntaxKind::DeclarationExpression,
            vec![ty.into(), designation.into()],
        ))
    }

    /// `var (a, b)` or a tuple of declarations, as an assignment or
    /// `foreach` target.
    pub(crate) fn deconstruction_target(&mut self) -> ParseResult<GreenNode> {
        if self.at_contextual("var") && self.peek_at(1) == SyntaxKind::OpenParen {
            let var = self.identifier_name()?;
            let designation = self.designation()?;
            return Ok(node(
                SyntaxKind::DeclarationExpression,
                vec![var.into(), designation.into()],
            ));
        }
        self.parenthesized_or_tuple()
    }

    /// `[a, b, ..rest]`
    fn collection_expression(&mut self) -> ParseResult<GreenNode> {
        let mut children = vec![self.expect(SyntaxKind::OpenBracket)?];
        while !self.at(SyntaxKind::CloseBracket) {
            let element = if self.at(SyntaxKind::DotDot) {
                let dots = self.bump();
                let spread = self.expression()?;
                node(SyntaxKind::SpreadElement, vec![dots, spread.into()])
            } else {
                self.expression()?
            };
            children.push(element.into());
            if !self.eat(SyntaxKind::Comma, &mut children) {
                break;
            }
        }
        children.push(self.expect(SyntaxKind::CloseBracket)?);
        Ok(node(SyntaxKind::CollectionExpression, children))
    }

    /// `typeof(T)`, `sizeof(T)` and `default(T)`.
    fn keyword_of_type(&mut self, kind: SyntaxKind) -> ParseResult<GreenNode> {
        let keyword = self.bump();
        let open = self.expect(SyntaxKind::OpenParen)?;
        let ty = self.parse_type(true)?;
        let close = self.expect(SyntaxKind::CloseParen)?;
        Ok(node(kind, vec![keyword, open, ty.into(), close]))
    }

    /// A simple name in expression position.
    ///
    /// `Name<...>` is read as a generic name only when the token after the
    /// closing `>` cannot continue a comparison.
    fn expression_name(&mut self) -> ParseResult<GreenNode> {
        let identifier = self.expect_identifier()?;
        if self.at(SyntaxKind::Less) {
            let arguments = self.try_parse(|p| {
                let arguments = p.type_argument_list()?;
                if follows_type_arguments(p.peek()) {
                    Ok(arguments)
                } else {
                    Err(p.error("not a generic name"))
                }
            });
            if let Some(arguments) = arguments {
                return Ok(node(
                    SyntaxKind::GenericName,
                    vec![identifier, arguments.into()],
                ));
            }
        }
        Ok(node(SyntaxKind::IdentifierName, vec![identifier]))
    }

    fn creation_expression(&mut self) -> ParseResult<GreenNode> {
        let keyword = self.expect(SyntaxKind::NewKeyword)?;

        if self.at(SyntaxKind::OpenBracket) {
            let mut children = vec![keyword, self.bump()];
            while self.eat(SyntaxKind::Comma, &mut children) {}
            children.push(self.expect(SyntaxKind::CloseBracket)?);
            children.push(self.initializer_expression()?.into());
            return Ok(node(SyntaxKind::ImplicitArrayCreationExpression, children));
        }

        // `new { Name = value }`
        if self.at(SyntaxKind::OpenBrace) {
            let initializer = self.initializer_expression()?;
            return Ok(node(
                SyntaxKind::AnonymousObjectCreationExpression,
                vec![keyword, initializer.into()],
            ));
        }

        // `new(...)` with the type taken from the target
        if self.at(SyntaxKind::OpenParen) {
            let mut children = vec![keyword, self.argument_list()?.into()];
            if self.at(SyntaxKind::OpenBrace) {
                children.push(self.initializer_expression()?.into());
            }
            return Ok(node(SyntaxKind::ImplicitObjectCreationExpression, children));
        }

        let ty = self.non_array_type()?;
        if self.at(SyntaxKind::OpenBracket) {
            let mut array = vec![ty.into()];
            while self.at(SyntaxKind::OpenBracket) {
                let mut rank = vec![self.bump()];
                while !self.at(SyntaxKind::CloseBracket) {
                    if !self.eat(SyntaxKind::Comma, &mut rank) {
                        rank.push(self.expression()?.into());
                    }
                }
                rank.push(self.bump());
                array.push(node(SyntaxKind::ArrayRankSpecifier, rank).into());
            }
            let mut children = vec![keyword, node(SyntaxKind::ArrayType, array).into()];
            if self.at(SyntaxKind::OpenBrace) {
                children.push(self.initializer_expression()?.into());
            }
            return Ok(node(SyntaxKind::ArrayCreationExpression, children));
        }

        let mut children = vec![keyword, ty.into()];
        if self.at(SyntaxKind::OpenParen) {
            children.push(self.argument_list()?.into());
        }
        if self.at(SyntaxKind::OpenBrace) {
            children.push(self.initializer_expression()?.into());
        }
        if children.len() == 2 {
            return Err(self.error("expected '(' or '{'"));
        }
        Ok(node(SyntaxKind::ObjectCreationExpression, children))
    }

    /// `{ a, b, { c }, }`
    pub(crate) fn initializer_expression(&mut self) -> ParseResult<GreenNode> {
        let mut children = vec![self.expect(SyntaxKind::OpenBrace)?];
        while !self.at(SyntaxKind::CloseBrace) {
            let element = if self.at(SyntaxKind::OpenBrace) {
                self.initializer_expression()?
            } else {
                self.expression()?
            };
            children.push(element.into());
            if !self.eat(SyntaxKind::Comma, &mut children) {
                break;
            }
        }
        children.push(self.expect(SyntaxKind::CloseBrace)?);
        Ok(node(SyntaxKind::InitializerExpression, children))
    }

    pub(crate) fn argument_list(&mut self) -> ParseResult<GreenNode> {
        let mut children = Vec::new();
        self.separated(
            SyntaxKind::OpenParen,
            SyntaxKind::CloseParen,
            &mut children,
            Parser::argument,
        )?;
        Ok(node(SyntaxKind::ArgumentList, children))
    }

    fn argument(&mut self) -> ParseResult<GreenNode> {
        let mut children = Vec::new();
        if self.at(SyntaxKind::Identifier) && self.peek_at(1) == SyntaxKind::Colon {
            let name = self.identifier_name()?;
            let colon = self.bump();
            children.push(node(SyntaxKind::NameColon, vec![name.into(), colon]).into());
        }
        if matches!(
            self.peek(),
            SyntaxKind::RefKeyword | SyntaxKind::OutKeyword | SyntaxKind::InKeyword
        ) {
            let is_out = self.at(SyntaxKind::OutKeyword);
            children.push(self.bump());
            // `out var x` and `out T x`
            if is_out {
                if let Some(declaration) = self.try_parse(Parser::out_declaration) {
                    children.push(declaration.into());
                    return Ok(node(SyntaxKind::Argument, children));
                }
            }
        }
        children.push(self.expression()?.into());
        Ok(node(SyntaxKind::Argument, children))
    }

    fn out_declaration(&mut self) -> ParseResult<GreenNode> {
        let ty = self.parse_type(true)?;
        if !self.at(SyntaxKind::Identifier) {
            return Err(self.error("not a declaration"));
        }
        let designation = self.designation()?;
        if !matches!(
            self.peek(),
            SyntaxKind::Comma | SyntaxKind::CloseParen | SyntaxKind::CloseBracket
        ) {
            return Err(self.error("not a declaration"));
        }
        Ok(node(
            SyntaxKind::DeclarationExpression,
            vec![ty.into(), designation.into()],
        ))
    }
}

fn is_assignment_operator(kind: SyntaxKind) -> bool {
    use SyntaxKind::*;
    matches!(
        kind,
        Equals
            | PlusEquals
            | MinusEquals
            | AsteriskEquals
            | SlashEquals
            | PercentEquals
            | AmpersandEquals
            | BarEquals
            | CaretEquals
            | QuestionQuestionEquals
            | LessLessEquals
    )
}

/// Tokens that can begin the operand of a cast or `await`.
fn starts_operand(kind: SyntaxKind) -> bool {
    use SyntaxKind::*;
    matches!(
        kind,
        Identifier
            | NumericLiteral
            | StringLiteral
            | CharacterLiteral
            | TrueKeyword
            | FalseKeyword
            | NullKeyword
            | ThisKeyword
            | BaseKeyword
            | NewKeyword
            | TypeofKeyword
            | DefaultKeyword
            | DelegateKeyword
            | SizeofKeyword
            | CheckedKeyword
            | UncheckedKeyword
            | OpenParen
    ) || kind.is_predefined_type()
}

/// Tokens that can begin the operand after `..`.
fn starts_range_operand(kind: SyntaxKind) -> bool {
    starts_operand(kind) || matches!(kind, SyntaxKind::Caret | SyntaxKind::Minus)
}

/// Tokens that may follow a type argument list in expression position.
fn follows_type_arguments(kind: SyntaxKind) -> bool {
    use SyntaxKind::*;
    matches!(
        kind,
        OpenParen
            | CloseParen
            | CloseBracket
            | CloseBrace
            | Colon
            | Semicolon
            | Comma
            | Dot
            | Question
            | EqualsEquals
            | ExclamationEquals
            | Bar
            | Caret
            | Ampersand
            | AmpersandAmpersand
            | BarBar
            | OpenBracket
            | EndOfFile
    )
}
