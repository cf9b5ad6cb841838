// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Patterns, for `is`, `case` labels and switch expression arms.
//!
//! A name followed by a designation, `{` or `(` is read as a type;
//! anything else falls back to a constant pattern at shift precedence, so
//! relational operators stay with the pattern.

use super::expressions::SHIFT;
use super::{node, ParseResult, Parser};
use crate::green::{GreenElement, GreenNode};
use crate::kind::SyntaxKind;

impl Parser {
    /// `p or p`, `p and p`, `not p` and primary patterns.
    pub(crate) fn pattern(&mut self) -> ParseResult<GreenNode> {
        let mut left = self.and_pattern()?;
        while self.at_contextual("or") {
            let operator = self.bump_as(SyntaxKind::OrKeyword);
            let right = self.and_pattern()?;
            left = node(
                SyntaxKind::BinaryPattern,
                vec![left.into(), operator, right.into()],
            );
        }
        Ok(left)
    }

    fn and_pattern(&mut self) -> ParseResult<GreenNode> {
        let mut left = self.not_pattern()?;
        while self.at_contextual("and") {
            let operator = self.bump_as(SyntaxKind::AndKeyword);
            let right = self.not_pattern()?;
            left = node(
                SyntaxKind::BinaryPattern,
                vec![left.into(), operator, right.into()],
            );
        }
        Ok(left)
    }

    fn not_pattern(&mut self) -> ParseResult<GreenNode> {
        if self.at_contextual("not") {
            let operator = self.bump_as(SyntaxKind::NotKeyword);
            let operand = self.not_pattern()?;
            return Ok(node(
                SyntaxKind::UnaryPattern,
                vec![operator, operand.into()],
            ));
        }
        self.primary_pattern()
    }

    fn primary_pattern(&mut self) -> ParseResult<GreenNode> {
        match self.peek() {
            SyntaxKind::OpenParen => match self.try_parse(Parser::parenthesized_pattern) {
                Some(pattern) => Ok(pattern),
                None => self.constant_pattern(),
            },
            SyntaxKind::OpenBrace => self.recursive_pattern(Vec::new()),
            SyntaxKind::Less
            | SyntaxKind::LessEquals
            | SyntaxKind::Greater
            | SyntaxKind::GreaterEquals => {
                let operator = self.bump();
                let value = self.binary_expression(SHIFT)?;
                Ok(node(
                    SyntaxKind::RelationalPattern,
                    vec![operator, value.into()],
                ))
            }
            SyntaxKind::Identifier
                if self.peek_text() == "var"
                    && matches!(
                        self.peek_at(1),
                        SyntaxKind::Identifier | SyntaxKind::OpenParen
                    ) =>
            {
                let keyword = self.bump_as(SyntaxKind::VarKeyword);
                let designation = self.designation()?;
                Ok(node(
                    SyntaxKind::VarPattern,
                    vec![keyword, designation.into()],
                ))
            }
            SyntaxKind::Identifier
                if self.peek_text() == "_"
                    && !matches!(
                        self.peek_at(1),
                        SyntaxKind::Dot
                            | SyntaxKind::OpenParen
                            | SyntaxKind::OpenBracket
                            | SyntaxKind::Less
                    ) =>
            {
                Ok(node(SyntaxKind::DiscardPattern, vec![self.bump()]))
            }
            _ => match self.try_parse(Parser::type_pattern) {
                Some(pattern) => Ok(pattern),
                None => self.constant_pattern(),
            },
        }
    }

    /// `Type name`, `Type { ... }` or `Type ( ... )`.
    fn type_pattern(&mut self) -> ParseResult<GreenNode> {
        let ty = self.parse_type(false)?;
        match self.peek() {
            SyntaxKind::OpenBrace | SyntaxKind::OpenParen => self.recursive_pattern(vec![ty.into()]),
            SyntaxKind::Identifier if !is_pattern_keyword(self.peek_text()) => {
                let designation = self.designation()?;
                Ok(node(
                    SyntaxKind::DeclarationPattern,
                    vec![ty.into(), designation.into()],
                ))
            }
            _ => Err(self.error("not a type pattern")),
        }
    }

    fn constant_pattern(&mut self) -> ParseResult<GreenNode> {
        let value = self.binary_expression(SHIFT)?;
        Ok(node(SyntaxKind::ConstantPattern, vec![value.into()]))
    }

    /// `( pattern )`, or a positional pattern when there is a comma.
    fn parenthesized_pattern(&mut self) -> ParseResult<GreenNode> {
        let start = self.save();
        let open = self.expect(SyntaxKind::OpenParen)?;
        let inner = self.pattern()?;
        if self.at(SyntaxKind::CloseParen) {
            let close = self.bump();
            return Ok(node(
                SyntaxKind::ParenthesizedPattern,
                vec![open, inner.into(), close],
            ));
        }
        self.restore(start);
        self.recursive_pattern(Vec::new())
    }

    /// `[Type] [( subpatterns )] [{ subpatterns }] [designation]`
    fn recursive_pattern(&mut self, mut children: Vec<GreenElement>) -> ParseResult<GreenNode> {
        if self.at(SyntaxKind::OpenParen) {
            let mut clause = Vec::new();
            self.separated(
                SyntaxKind::OpenParen,
                SyntaxKind::CloseParen,
                &mut clause,
                Parser::subpattern,
            )?;
            children.push(node(SyntaxKind::PositionalPatternClause, clause).into());
        }
        if self.at(SyntaxKind::OpenBrace) {
            let mut clause = vec![self.bump()];
            while !self.at(SyntaxKind::CloseBrace) {
                clause.push(self.subpattern()?.into());
                if !self.eat(SyntaxKind::Comma, &mut clause) {
                    break;
                }
            }
            clause.push(self.expect(SyntaxKind::CloseBrace)?);
            children.push(node(SyntaxKind::PropertyPatternClause, clause).into());
        }
        if children.is_empty() {
            return Err(self.error("expected pattern"));
        }
        if self.at(SyntaxKind::Identifier) && !is_pattern_keyword(self.peek_text()) {
            children.push(self.designation()?.into());
        }
        Ok(node(SyntaxKind::RecursivePattern, children))
    }

    /// `[name:] pattern`
    fn subpattern(&mut self) -> ParseResult<GreenNode> {
        let mut children = Vec::new();
        if self.at(SyntaxKind::Identifier) && self.peek_at(1) == SyntaxKind::Colon {
            let name = self.identifier_name()?;
            let colon = self.bump();
            children.push(node(SyntaxKind::NameColon, vec![name.into(), colon]).into());
        }
        children.push(self.pattern()?.into());
        Ok(node(SyntaxKind::Subpattern, children))
    }

    /// `x`, `_` or `(x, y)` after a type or `var`.
    pub(crate) fn designation(&mut self) -> ParseResult<GreenNode> {
        if self.at(SyntaxKind::OpenParen) {
            let mut children = Vec::new();
            self.separated(
                SyntaxKind::OpenParen,
                SyntaxKind::CloseParen,
                &mut children,
                Parser::designation,
            )?;
            return Ok(node(SyntaxKind::ParenthesizedVariableDesignation, children));
        }
        if self.at_contextual("_") {
            return Ok(node(SyntaxKind::DiscardDesignation, vec![self.bump()]));
        }
        let identifier = self.expect_identifier()?;
        Ok(node(SyntaxKind::SingleVariableDesignation, vec![identifier]))
    }

    /// `when condition` on a case label or switch expression arm.
    pub(crate) fn when_clause(&mut self) -> ParseResult<GreenNode> {
        let keyword = self.bump_as(SyntaxKind::WhenKeyword);
        let condition = self.expression()?;
        Ok(node(SyntaxKind::WhenClause, vec![keyword, condition.into()]))
    }
}

/// Contextual words that continue a pattern rather than name a variable.
pub(crate) fn is_pattern_keyword(text: &str) -> bool {
    matches!(text, "and" | "or" | "when")
}
