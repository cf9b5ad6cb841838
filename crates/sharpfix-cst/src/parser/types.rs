// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Types and names.

use super::{node, ParseResult, Parser};
use crate::green::GreenNode;
use crate::kind::SyntaxKind;

impl Parser {
    /// Entry point: a complete type, nullable suffix allowed.
    pub(crate) fn type_syntax(&mut self) -> ParseResult<GreenNode> {
        self.parse_type(true)
    }

    /// A type, optionally with `?` nullable suffixes and array ranks.
    ///
    /// Nullable suffixes are disabled after `is` and `as`, where `?` starts a
    /// conditional expression.
    pub(crate) fn parse_type(&mut self, allow_nullable: bool) -> ParseResult<GreenNode> {
        let mut ty = self.non_array_type()?;
        loop {
            if allow_nullable && self.at(SyntaxKind::Question) {
                let question = self.bump();
                ty = node(SyntaxKind::NullableType, vec![ty.into(), question]);
            } else if self.at_empty_rank() {
                let mut children = vec![ty.into()];
                while self.at_empty_rank() {
                    children.push(self.empty_rank_specifier()?.into());
                }
                ty = node(SyntaxKind::ArrayType, children);
            } else {
                return Ok(ty);
            }
        }
    }

    fn at_empty_rank(&self) -> bool {
        self.at(SyntaxKind::OpenBracket)
            && matches!(
                self.peek_at(1),
                SyntaxKind::CloseBracket | SyntaxKind::Comma
            )
    }

    /// A predefined type, a tuple type or a possibly qualified, possibly
    /// generic name.
    pub(crate) fn non_array_type(&mut self) -> ParseResult<GreenNode> {
        if self.peek().is_predefined_type() {
            let keyword = self.bump();
            return Ok(node(SyntaxKind::PredefinedType, vec![keyword]));
        }
        if self.at(SyntaxKind::OpenParen) {
            return self.tuple_type();
        }
        self.name(true)
    }

    /// `(int, string name)`, at least two elements.
    fn tuple_type(&mut self) -> ParseResult<GreenNode> {
        let mut children = Vec::new();
        self.separated(
            SyntaxKind::OpenParen,
            SyntaxKind::CloseParen,
            &mut children,
            |p| {
                let mut element = vec![p.parse_type(true)?.into()];
                if p.at(SyntaxKind::Identifier) {
                    element.push(p.bump());
                }
                Ok(node(SyntaxKind::TupleElement, element))
            },
        )?;
        let elements = children
            .iter()
            .filter(|c| c.kind() == SyntaxKind::TupleElement)
            .count();
        if elements < 2 {
            return Err(self.error("expected a tuple type"));
        }
        Ok(node(SyntaxKind::TupleType, children))
    }

    /// `[ , , ]` with no sizes.
    fn empty_rank_specifier(&mut self) -> ParseResult<GreenNode> {
        let mut children = vec![self.expect(SyntaxKind::OpenBracket)?];
        while self.eat(SyntaxKind::Comma, &mut children) {}
        children.push(self.expect(SyntaxKind::CloseBracket)?);
        Ok(node(SyntaxKind::ArrayRankSpecifier, children))
    }

    /// `A.B<C>.D` or `alias::A.B`. Type argument lists are attempted when
    /// `generic` is set.
    pub(crate) fn name(&mut self, generic: bool) -> ParseResult<GreenNode> {
        let mut name = if self.at(SyntaxKind::Identifier)
            && self.peek_at(1) == SyntaxKind::ColonColon
        {
            let alias = self.identifier_name()?;
            let colons = self.bump();
            let right = self.simple_name(generic)?;
            node(
                SyntaxKind::AliasQualifiedName,
                vec![alias.into(), colons, right.into()],
            )
        } else {
            self.simple_name(generic)?
        };
        while self.at(SyntaxKind::Dot) && self.peek_at(1) == SyntaxKind::Identifier {
            let dot = self.bump();
            let right = self.simple_name(generic)?;
            name = node(
                SyntaxKind::QualifiedName,
                vec![name.into(), dot, right.into()],
            );
        }
        Ok(name)
    }

    /// `Identifier` or `Identifier<TypeArgs>`.
    pub(crate) fn simple_name(&mut self, generic: bool) -> ParseResult<GreenNode> {
        let identifier = self.expect_identifier()?;
        if generic && self.at(SyntaxKind::Less) {
            if let Some(arguments) = self.try_parse(Parser::type_argument_list) {
                return Ok(node(
                    SyntaxKind::GenericName,
                    vec![identifier, arguments.into()],
                ));
            }
        }
        Ok(node(SyntaxKind::IdentifierName, vec![identifier]))
    }

    pub(crate) fn identifier_name(&mut self) -> ParseResult<GreenNode> {
        let identifier = self.expect_identifier()?;
        Ok(node(SyntaxKind::IdentifierName, vec![identifier]))
    }

    pub(crate) fn type_argument_list(&mut self) -> ParseResult<GreenNode> {
        let mut children = Vec::new();
        self.separated(SyntaxKind::Less, SyntaxKind::Greater, &mut children, |p| {
            p.parse_type(true)
        })?;
        Ok(node(SyntaxKind::TypeArgumentList, children))
    }
}
